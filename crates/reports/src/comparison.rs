use analytics::metrics;
use chrono::NaiveDate;
use core_types::CultivationCycle;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of the cycle comparison sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleComparisonRow {
    pub cycle_id: Uuid,
    pub name: String,
    pub stock_date: NaiveDate,
    pub harvest_date: Option<NaiveDate>,
    pub cultivation_days: i64,
    pub fca: Option<Decimal>, // None until harvest, or when it was not computable
    pub survival_pct: Option<Decimal>,
    pub final_weight_kg: Option<Decimal>,
    pub revenue: Option<Decimal>,
}

impl CycleComparisonRow {
    pub fn from_cycle(cycle: &CultivationCycle, today: NaiveDate) -> Self {
        let harvest = cycle.harvest.as_ref();
        Self {
            cycle_id: cycle.id,
            name: cycle.name.clone(),
            stock_date: cycle.stock_date,
            harvest_date: cycle.harvest_date(),
            cultivation_days: metrics::cultivation_days(
                cycle.stock_date,
                metrics::reference_date(cycle, today),
            ),
            fca: harvest.map(|h| h.fca).filter(|f| *f > Decimal::ZERO),
            survival_pct: harvest.and_then(|h| h.survival_pct),
            final_weight_kg: harvest.map(|h| h.final_weight_kg),
            revenue: harvest.map(|h| h.revenue),
        }
    }

    /// `stock - harvest` in ISO dates, open-ended while the cycle runs.
    pub fn period_label(&self) -> String {
        match self.harvest_date {
            Some(end) => format!("{} - {}", self.stock_date, end),
            None => format!("{} -", self.stock_date),
        }
    }
}

/// Summary sheet of a cycle comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub cycle_count: usize,
    pub average_fca: Option<Decimal>,
    pub average_survival_pct: Option<Decimal>,
    pub total_revenue: Decimal,
}

/// Averages over every row, with a missing metric counting as zero.
/// Averages are `None` when there are no rows.
pub fn comparison_summary(rows: &[CycleComparisonRow]) -> ComparisonSummary {
    let count = rows.len();
    let average = |value: fn(&CycleComparisonRow) -> Option<Decimal>| {
        (count > 0).then(|| {
            rows.iter().map(|r| value(r).unwrap_or(Decimal::ZERO)).sum::<Decimal>()
                / Decimal::from(count)
        })
    };

    ComparisonSummary {
        cycle_count: count,
        average_fca: average(|r| r.fca),
        average_survival_pct: average(|r| r.survival_pct),
        total_revenue: rows.iter().filter_map(|r| r.revenue).sum(),
    }
}

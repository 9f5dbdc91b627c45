use crate::error::ReportError;
use chrono::NaiveDate;
use core_types::{FinanceRecord, FlowDirection};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Total of one calendar month. `label` is `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthTotal {
    pub label: String,
    pub total: Decimal,
}

/// Inflow and outflow of one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyFlow {
    pub day: NaiveDate,
    pub inflow: Decimal,
    pub outflow: Decimal,
}

impl DailyFlow {
    fn empty(day: NaiveDate) -> Self {
        Self {
            day,
            inflow: Decimal::ZERO,
            outflow: Decimal::ZERO,
        }
    }

    pub fn net(&self) -> Decimal {
        self.inflow - self.outflow
    }
}

pub fn month_label(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Sums the records of one direction per calendar month.
///
/// Months appear in the order they are first seen in `records`, so the result
/// is chronological only when the input is.
pub fn group_by_month(records: &[FinanceRecord], direction: FlowDirection) -> Vec<MonthTotal> {
    let mut months: Vec<MonthTotal> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records.iter().filter(|r| r.direction == direction) {
        let label = month_label(record.date);
        match index.get(&label) {
            Some(&i) => months[i].total += record.amount,
            None => {
                index.insert(label.clone(), months.len());
                months.push(MonthTotal {
                    label,
                    total: record.amount,
                });
            }
        }
    }

    months
}

/// Sums the records of one direction per category, keyed in category order.
pub fn group_by_category(
    records: &[FinanceRecord],
    direction: FlowDirection,
) -> BTreeMap<String, Decimal> {
    let mut categories = BTreeMap::new();
    for record in records.iter().filter(|r| r.direction == direction) {
        *categories
            .entry(record.category.clone())
            .or_insert(Decimal::ZERO) += record.amount;
    }
    categories
}

/// One entry per day of `start..=end`, zero-filled where nothing happened.
///
/// Records dated outside the range are ignored.
pub fn daily_series(
    records: &[FinanceRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DailyFlow>, ReportError> {
    if end < start {
        return Err(ReportError::InvalidRange { start, end });
    }

    let mut series: Vec<DailyFlow> = start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(DailyFlow::empty)
        .collect();

    for record in records {
        if record.date < start || record.date > end {
            continue;
        }
        let slot = &mut series[(record.date - start).num_days() as usize];
        match record.direction {
            FlowDirection::Inflow => slot.inflow += record.amount,
            FlowDirection::Outflow => slot.outflow += record.amount,
        }
    }

    tracing::debug!(%start, %end, days = series.len(), "Daily series built.");
    Ok(series)
}

use chrono::NaiveDate;
use core_types::CycleStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Snapshot of a cycle's productivity indicators.
///
/// This struct is the output of `MetricsCalculator::cycle_report` and is what
/// the cycle detail view and the exporters consume. Values are numeric and
/// unformatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleReport {
    pub cycle_id: Uuid,
    pub status: CycleStatus,
    pub cultivation_days: i64,

    // I. Feeding
    pub total_feed_kg: Decimal,
    pub total_mortality: u64,

    // II. Growth
    pub initial_weight_kg: Decimal,
    pub current_weight_kg: Decimal,
    pub weight_gain_kg: Decimal,
    pub fca: Decimal, // 0 when not computable, see `fca_available`
    pub fca_available: bool,

    // III. Stock
    pub survival_pct: Option<Decimal>, // None without a stocked count
}

impl CycleReport {
    /// The FCA when it could be computed.
    pub fn fca(&self) -> Option<Decimal> {
        self.fca_available.then_some(self.fca)
    }
}

/// Values entered on the harvest form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestInput {
    pub harvest_date: NaiveDate,
    pub final_weight_kg: Decimal,
    pub price_per_kg: Decimal,
    #[serde(default)]
    pub harvest_cost: Option<Decimal>,
}

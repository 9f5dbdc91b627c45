use crate::RiskClassifier;
use crate::thresholds;
use core_types::{FeedingRecord, RiskLevel, WaterQualityRecord};
use rust_decimal::Decimal;

/// Implementation of the `RiskClassifier` trait over the fixed thresholds.
///
/// Rules are checked in order and the first match wins:
/// 1. `Critical` on any dissolved oxygen reading below 3 mg/L, or average mortality above 5.
/// 2. `Warning` on any pH reading outside 6.5..=9.0.
/// 3. `Warning` on a computable FCA above 2.0.
/// 4. `Normal` otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdClassifier;

impl RiskClassifier for ThresholdClassifier {
    fn classify(
        &self,
        water: &[WaterQualityRecord],
        feedings: &[FeedingRecord],
        fca: Decimal,
    ) -> RiskLevel {
        // --- 1. Life-threatening conditions ---
        let low_oxygen = water
            .iter()
            .filter_map(|w| w.dissolved_oxygen_mg_l)
            .any(thresholds::is_low_oxygen);
        let high_mortality = average_mortality(feedings).is_some_and(thresholds::is_high_mortality);
        if low_oxygen || high_mortality {
            return RiskLevel::Critical;
        }

        // --- 2. Water chemistry ---
        if water
            .iter()
            .filter_map(|w| w.ph)
            .any(thresholds::is_ph_out_of_range)
        {
            return RiskLevel::Warning;
        }

        // --- 3. Feed efficiency ---
        if thresholds::is_high_fca(fca) {
            return RiskLevel::Warning;
        }

        RiskLevel::Normal
    }
}

/// Mean mortality per feeding record. Records without a count weigh in as `0`.
///
/// `None` for an empty collection.
pub fn average_mortality(feedings: &[FeedingRecord]) -> Option<Decimal> {
    if feedings.is_empty() {
        return None;
    }
    let total: u64 = feedings.iter().map(|f| u64::from(f.mortality_or_zero())).sum();
    Some(Decimal::from(total) / Decimal::from(feedings.len()))
}

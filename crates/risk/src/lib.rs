//! # Cycle Risk Classification
//!
//! Classifies a cultivation cycle into a `RiskLevel` from its water-quality and
//! feeding records, and lists the individual alerts behind that level.
//!
//! The thresholds are fixed farm policy (see [`thresholds`]) and are not
//! configurable per call. Nothing in this crate can fail: a missing reading is
//! "no evidence" and never triggers the rule that reads it.

pub mod alerts;
pub mod threshold_classifier;
pub mod thresholds;

pub use alerts::{Alert, AlertKind, generate_alerts};
pub use threshold_classifier::{ThresholdClassifier, average_mortality};

use core_types::{
    BiometricSample, CultivationCycle, FeedingRecord, RiskLevel, WaterQualityRecord,
};
use rust_decimal::Decimal;

/// The seam between the cycle views and the classification policy.
pub trait RiskClassifier {
    /// Classifies one cycle from its readings.
    ///
    /// `fca` is the cycle's feed conversion ratio, where `0` means "not computable".
    fn classify(
        &self,
        water: &[WaterQualityRecord],
        feedings: &[FeedingRecord],
        fca: Decimal,
    ) -> RiskLevel;
}

/// Classifies a cycle with the fixed thresholds, computing its FCA over the
/// full feeding and biometric history first.
pub fn evaluate_cycle(
    cycle: &CultivationCycle,
    biometrics: &[BiometricSample],
    feedings: &[FeedingRecord],
    water: &[WaterQualityRecord],
) -> RiskLevel {
    let fca = analytics::metrics::cycle_fca(cycle, biometrics, feedings);
    let level = ThresholdClassifier.classify(water, feedings, fca);
    tracing::debug!(cycle_id = %cycle.id, %fca, %level, "Cycle risk evaluated.");
    level
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn history(feed_kg: Decimal) -> (CultivationCycle, Vec<BiometricSample>, Vec<FeedingRecord>) {
        let cycle = CultivationCycle::stocked(Uuid::new_v4(), "Viveiro 4", date(1, 10), Some(dec!(100)), None);
        let biometrics = vec![BiometricSample {
            id: Uuid::new_v4(),
            cycle_id: cycle.id,
            collected_on: date(3, 1),
            mean_weight_g: dec!(11),
            sample_size: Some(60),
            estimated_biomass_kg: Some(dec!(250)),
            notes: None,
        }];
        let feedings = vec![FeedingRecord {
            id: Uuid::new_v4(),
            cycle_id: cycle.id,
            fed_on: date(2, 15),
            feed_kg,
            feed_type: None,
            mortality: Some(2),
            feed_lot: None,
            supplier: None,
            notes: None,
        }];
        (cycle, biometrics, feedings)
    }

    #[test]
    fn efficient_cycle_is_normal() {
        let (cycle, biometrics, feedings) = history(dec!(270));
        assert_eq!(evaluate_cycle(&cycle, &biometrics, &feedings, &[]), RiskLevel::Normal);
    }

    #[test]
    fn poor_conversion_over_full_history_warns() {
        let (cycle, biometrics, feedings) = history(dec!(400));
        assert_eq!(evaluate_cycle(&cycle, &biometrics, &feedings, &[]), RiskLevel::Warning);
    }

    #[test]
    fn without_biometrics_fca_is_not_computable() {
        let (cycle, _, feedings) = history(dec!(400));
        assert_eq!(evaluate_cycle(&cycle, &[], &feedings, &[]), RiskLevel::Normal);
    }
}

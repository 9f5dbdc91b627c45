use crate::thresholds;
use crate::threshold_classifier::average_mortality;
use chrono::NaiveDate;
use core_types::{FeedingRecord, RiskLevel, WaterQualityRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    LowOxygen,
    PhOutOfRange,
    HighMortality,
    HighFca,
}

impl AlertKind {
    pub fn level(&self) -> RiskLevel {
        match self {
            AlertKind::LowOxygen | AlertKind::HighMortality => RiskLevel::Critical,
            AlertKind::PhOutOfRange | AlertKind::HighFca => RiskLevel::Warning,
        }
    }
}

/// A single condition behind a cycle's risk level, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Stable key: the kind plus the reading it came from, when there is one.
    pub id: String,
    pub level: RiskLevel,
    pub kind: AlertKind,
    pub message: String,
    pub observed_at: NaiveDate,
}

impl Alert {
    fn new(id: String, kind: AlertKind, message: String, observed_at: NaiveDate) -> Self {
        Self {
            id,
            level: kind.level(),
            kind,
            message,
            observed_at,
        }
    }
}

/// Lists every alert raised by the readings of one cycle, newest first.
///
/// Each out-of-band water reading gives its own alert. Mortality and FCA are
/// judged over the whole collection and are stamped with `today`. The most
/// severe level in the list is always the level `ThresholdClassifier` assigns
/// to the same input.
pub fn generate_alerts(
    water: &[WaterQualityRecord],
    feedings: &[FeedingRecord],
    fca: Decimal,
    today: NaiveDate,
) -> Vec<Alert> {
    let mut alerts = Vec::new();

    for reading in water {
        if let Some(oxygen) = reading.dissolved_oxygen_mg_l.filter(|o| thresholds::is_low_oxygen(*o)) {
            alerts.push(Alert::new(
                format!("oxygen-{}", reading.id),
                AlertKind::LowOxygen,
                format!("Critical dissolved oxygen: {oxygen} mg/L"),
                reading.collected_on,
            ));
        }
        if let Some(ph) = reading.ph.filter(|p| thresholds::is_ph_out_of_range(*p)) {
            alerts.push(Alert::new(
                format!("ph-{}", reading.id),
                AlertKind::PhOutOfRange,
                format!("pH outside the ideal range: {ph}"),
                reading.collected_on,
            ));
        }
    }

    if let Some(average) = average_mortality(feedings).filter(|a| thresholds::is_high_mortality(*a)) {
        alerts.push(Alert::new(
            "mortality-high".to_string(),
            AlertKind::HighMortality,
            format!("High average mortality: {:.1}", average),
            today,
        ));
    }

    if thresholds::is_high_fca(fca) {
        alerts.push(Alert::new(
            "fca-high".to_string(),
            AlertKind::HighFca,
            format!("Feed conversion ratio above {}: {:.2}", thresholds::WARNING_FCA, fca),
            today,
        ));
    }

    // Stable, so same-day alerts keep their generation order.
    alerts.sort_by(|a, b| b.observed_at.cmp(&a.observed_at));

    if !alerts.is_empty() {
        tracing::debug!(count = alerts.len(), "Alerts generated.");
    }
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RiskClassifier, ThresholdClassifier};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn water(on: u32, ph: Option<Decimal>, oxygen: Option<Decimal>) -> WaterQualityRecord {
        WaterQualityRecord {
            id: Uuid::new_v4(),
            cycle_id: Uuid::nil(),
            collected_on: day(on),
            ph,
            dissolved_oxygen_mg_l: oxygen,
            ..Default::default()
        }
    }

    fn feeding(mortality: u32) -> FeedingRecord {
        FeedingRecord {
            id: Uuid::new_v4(),
            cycle_id: Uuid::nil(),
            fed_on: day(1),
            feed_kg: dec!(15),
            feed_type: None,
            mortality: Some(mortality),
            feed_lot: None,
            supplier: None,
            notes: None,
        }
    }

    #[test]
    fn quiet_cycle_has_no_alerts() {
        let readings = vec![water(2, Some(dec!(7.5)), Some(dec!(5.2)))];
        assert!(generate_alerts(&readings, &[feeding(1)], dec!(1.4), day(10)).is_empty());
        assert!(generate_alerts(&[], &[], Decimal::ZERO, day(10)).is_empty());
    }

    #[test]
    fn one_alert_per_triggering_reading() {
        let first = water(2, Some(dec!(6.1)), Some(dec!(2.1)));
        let second = water(5, Some(dec!(9.4)), Some(dec!(4.0)));
        let alerts = generate_alerts(&[first.clone(), second.clone()], &[], Decimal::ZERO, day(10));

        let kinds: Vec<AlertKind> = alerts.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![AlertKind::PhOutOfRange, AlertKind::LowOxygen, AlertKind::PhOutOfRange]
        );
        assert_eq!(alerts[0].id, format!("ph-{}", second.id));
        assert_eq!(alerts[1].id, format!("oxygen-{}", first.id));
        assert_eq!(alerts[1].level, RiskLevel::Critical);
    }

    #[test]
    fn collection_alerts_use_today_and_sort_first() {
        let readings = vec![water(2, Some(dec!(5.0)), None)];
        let feedings = vec![feeding(8), feeding(6)];
        let alerts = generate_alerts(&readings, &feedings, dec!(2.4), day(10));

        assert_eq!(alerts.len(), 3);
        assert_eq!(alerts[0].kind, AlertKind::HighMortality);
        assert_eq!(alerts[0].observed_at, day(10));
        assert_eq!(alerts[0].message, "High average mortality: 7.0");
        assert_eq!(alerts[1].kind, AlertKind::HighFca);
        assert_eq!(alerts[2].kind, AlertKind::PhOutOfRange);
    }

    #[test]
    fn worst_alert_matches_classification() {
        let cases = vec![
            (vec![water(1, Some(dec!(7.0)), Some(dec!(2.5)))], vec![], Decimal::ZERO),
            (vec![water(1, Some(dec!(10.0)), Some(dec!(6)))], vec![feeding(2)], dec!(1.5)),
            (vec![], vec![feeding(1)], dec!(3.0)),
            (vec![water(1, Some(dec!(7.0)), Some(dec!(6)))], vec![feeding(1)], dec!(1.2)),
        ];
        for (readings, feedings, fca) in cases {
            let worst = generate_alerts(&readings, &feedings, fca, day(10))
                .iter()
                .map(|a| a.level)
                .max()
                .unwrap_or(RiskLevel::Normal);
            assert_eq!(worst, ThresholdClassifier.classify(&readings, &feedings, fca));
        }
    }
}

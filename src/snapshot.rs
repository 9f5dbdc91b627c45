use anyhow::{Context, Result, bail};
use core_types::{
    BiometricSample, CultivationCycle, FeedingRecord, FinanceRecord, WaterQualityRecord,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use uuid::Uuid;

/// Every record the calculators need, as exported from the hosted database.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FarmSnapshot {
    pub cycles: Vec<CultivationCycle>,
    pub biometrics: Vec<BiometricSample>,
    pub feedings: Vec<FeedingRecord>,
    pub water_quality: Vec<WaterQualityRecord>,
    pub finance: Vec<FinanceRecord>,
}

/// The child records of one cycle.
#[derive(Debug, Clone, Default)]
pub struct CycleRecords {
    pub biometrics: Vec<BiometricSample>,
    pub feedings: Vec<FeedingRecord>,
    pub water: Vec<WaterQualityRecord>,
}

impl FarmSnapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        let snapshot: FarmSnapshot = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse snapshot {}", path.display()))?;
        snapshot.validate()?;

        tracing::info!(
            cycles = snapshot.cycles.len(),
            feedings = snapshot.feedings.len(),
            finance = snapshot.finance.len(),
            "Snapshot loaded."
        );
        Ok(snapshot)
    }

    /// Checks every cycle's lifecycle invariant.
    pub fn validate(&self) -> Result<()> {
        for cycle in &self.cycles {
            cycle.validate()?;
        }
        Ok(())
    }

    /// Finds a cycle by id or, failing that, by exact name.
    pub fn find_cycle(&self, key: &str) -> Result<&CultivationCycle> {
        if let Ok(id) = Uuid::parse_str(key) {
            if let Some(cycle) = self.cycles.iter().find(|c| c.id == id) {
                return Ok(cycle);
            }
        }
        let mut named = self.cycles.iter().filter(|c| c.name == key);
        match (named.next(), named.next()) {
            (Some(cycle), None) => Ok(cycle),
            (Some(_), Some(_)) => bail!("Several cycles are named '{key}', use the id instead"),
            (None, _) => bail!("No cycle matches '{key}'"),
        }
    }

    pub fn records_for(&self, cycle_id: Uuid) -> CycleRecords {
        CycleRecords {
            biometrics: self
                .biometrics
                .iter()
                .filter(|b| b.cycle_id == cycle_id)
                .cloned()
                .collect(),
            feedings: self
                .feedings
                .iter()
                .filter(|f| f.cycle_id == cycle_id)
                .cloned()
                .collect(),
            water: self
                .water_quality
                .iter()
                .filter(|w| w.cycle_id == cycle_id)
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn snapshot() -> FarmSnapshot {
        let stocked = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let a = CultivationCycle::stocked(Uuid::new_v4(), "Viveiro 1", stocked, Some(dec!(100)), None);
        let b = CultivationCycle::stocked(Uuid::new_v4(), "Viveiro 2", stocked, None, None);
        let feeding = |cycle_id| FeedingRecord {
            id: Uuid::new_v4(),
            cycle_id,
            fed_on: stocked,
            feed_kg: dec!(10),
            feed_type: None,
            mortality: None,
            feed_lot: None,
            supplier: None,
            notes: None,
        };
        FarmSnapshot {
            feedings: vec![feeding(a.id), feeding(b.id), feeding(a.id)],
            cycles: vec![a, b],
            ..Default::default()
        }
    }

    #[test]
    fn finds_cycles_by_id_or_name() {
        let snapshot = snapshot();
        let id = snapshot.cycles[1].id;
        assert_eq!(snapshot.find_cycle(&id.to_string()).unwrap().id, id);
        assert_eq!(snapshot.find_cycle("Viveiro 1").unwrap().id, snapshot.cycles[0].id);
        assert!(snapshot.find_cycle("Viveiro 9").is_err());
    }

    #[test]
    fn ambiguous_names_are_refused() {
        let mut snapshot = snapshot();
        snapshot.cycles[1].name = "Viveiro 1".to_string();
        assert!(snapshot.find_cycle("Viveiro 1").is_err());
    }

    #[test]
    fn records_are_split_per_cycle() {
        let snapshot = snapshot();
        let records = snapshot.records_for(snapshot.cycles[0].id);
        assert_eq!(records.feedings.len(), 2);
        assert!(records.biometrics.is_empty());
    }

    #[test]
    fn empty_document_is_a_valid_snapshot() {
        let snapshot: FarmSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.cycles.is_empty());
        assert!(snapshot.validate().is_ok());
    }
}

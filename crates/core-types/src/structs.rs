use crate::enums::{CycleStatus, FlowDirection};
use crate::error::CoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One stocking-to-harvest run of a pond.
///
/// Harvest data lives in `harvest` and is only present once the cycle is
/// `Finalized`. Biometric, feeding and water-quality entries reference the
/// cycle by id; they never mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CultivationCycle {
    pub id: Uuid,
    pub pond_id: Uuid,
    pub name: String,
    /// The stocking date, which is also the start of the cycle.
    pub stock_date: NaiveDate,
    /// Biomass estimate at stocking, in kg. Stands in for `initial_weight_kg`
    /// when only this one was entered.
    pub initial_biomass_kg: Option<Decimal>,
    /// Total weight of the stock at stocking time, in kg.
    pub initial_weight_kg: Option<Decimal>,
    /// Number of animals introduced at stocking. Needed for survival.
    #[serde(default)]
    pub stocked_count: Option<u64>,
    pub status: CycleStatus,
    #[serde(default)]
    pub harvest: Option<HarvestRecord>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// The values fixed by the harvest transaction that finalizes a cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestRecord {
    pub harvest_date: NaiveDate,
    pub final_weight_kg: Decimal,
    pub price_per_kg: Decimal,
    pub harvest_cost: Option<Decimal>,
    pub weight_gain_kg: Decimal,
    /// Feed conversion ratio at harvest. `0` means it was not computable.
    pub fca: Decimal,
    pub survival_pct: Option<Decimal>,
    pub revenue: Decimal,
    pub profit: Decimal,
}

impl CultivationCycle {
    /// Creates a freshly stocked, active cycle.
    pub fn stocked(
        pond_id: Uuid,
        name: impl Into<String>,
        stock_date: NaiveDate,
        initial_weight_kg: Option<Decimal>,
        stocked_count: Option<u64>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            pond_id,
            name: name.into(),
            stock_date,
            initial_biomass_kg: None,
            initial_weight_kg,
            stocked_count,
            status: CycleStatus::Active,
            harvest: None,
            notes: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// The recorded initial weight, else the stocking biomass estimate, else `0`.
    pub fn initial_weight_or_zero(&self) -> Decimal {
        self.initial_weight_kg
            .or(self.initial_biomass_kg)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn harvest_date(&self) -> Option<NaiveDate> {
        self.harvest.as_ref().map(|h| h.harvest_date)
    }

    /// Checks that harvest data is present exactly when the cycle is finalized.
    pub fn validate(&self) -> Result<(), CoreError> {
        match (self.status, &self.harvest) {
            (CycleStatus::Active, Some(_)) => Err(CoreError::InconsistentCycle(
                self.id,
                "active cycle carries harvest data".to_string(),
            )),
            (CycleStatus::Finalized, None) => Err(CoreError::InconsistentCycle(
                self.id,
                "finalized cycle has no harvest data".to_string(),
            )),
            (CycleStatus::Finalized, Some(h)) if h.harvest_date < self.stock_date => {
                Err(CoreError::InconsistentCycle(
                    self.id,
                    format!(
                        "harvest date {} precedes stocking date {}",
                        h.harvest_date, self.stock_date
                    ),
                ))
            }
            _ => Ok(()),
        }
    }

    /// Applies the harvest transaction. A cycle can only be finalized once.
    pub fn finalize(&mut self, harvest: HarvestRecord) -> Result<(), CoreError> {
        if !self.is_active() {
            return Err(CoreError::AlreadyFinalized(self.id));
        }
        if harvest.harvest_date < self.stock_date {
            return Err(CoreError::InvalidInput(
                "harvest_date".to_string(),
                format!("{} is before stocking on {}", harvest.harvest_date, self.stock_date),
            ));
        }
        self.harvest = Some(harvest);
        self.status = CycleStatus::Finalized;
        Ok(())
    }
}

/// A point-in-time weight estimate for a cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiometricSample {
    pub id: Uuid,
    pub cycle_id: Uuid,
    pub collected_on: NaiveDate,
    /// Mean individual weight of the sampled animals, in grams.
    pub mean_weight_g: Decimal,
    #[serde(default)]
    pub sample_size: Option<u32>,
    #[serde(default)]
    pub estimated_biomass_kg: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Feed given to a cycle on one day, with the mortality seen that day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedingRecord {
    pub id: Uuid,
    pub cycle_id: Uuid,
    pub fed_on: NaiveDate,
    pub feed_kg: Decimal,
    #[serde(default)]
    pub feed_type: Option<String>,
    #[serde(default)]
    pub mortality: Option<u32>,
    #[serde(default)]
    pub feed_lot: Option<String>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl FeedingRecord {
    pub fn mortality_or_zero(&self) -> u32 {
        self.mortality.unwrap_or(0)
    }
}

/// Water chemistry readings taken for a cycle. Every reading is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterQualityRecord {
    pub id: Uuid,
    pub cycle_id: Uuid,
    pub collected_on: NaiveDate,
    pub ph: Option<Decimal>,
    pub dissolved_oxygen_mg_l: Option<Decimal>,
    pub temperature_c: Option<Decimal>,
    pub salinity_ppt: Option<Decimal>,
    pub turbidity: Option<Decimal>,
    pub alkalinity: Option<Decimal>,
    pub water_color: Option<String>,
    pub notes: Option<String>,
}

/// A dated monetary entry. Independent of cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceRecord {
    pub id: Uuid,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: String,
    pub direction: FlowDirection,
    #[serde(default)]
    pub description: Option<String>,
}

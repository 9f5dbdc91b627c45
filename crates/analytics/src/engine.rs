use crate::error::AnalyticsError;
use crate::metrics::{self, DEFAULT_FEED_COST_PER_KG};
use crate::report::{CycleReport, HarvestInput};
use chrono::NaiveDate;
use core_types::{BiometricSample, CultivationCycle, FeedingRecord, HarvestRecord};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

const MIN_FINAL_WEIGHT_KG: Decimal = dec!(0.1);
const MIN_PRICE_PER_KG: Decimal = dec!(0.01);

/// A stateless calculator for deriving cycle indicators from raw records.
#[derive(Debug, Clone, Copy)]
pub struct MetricsCalculator {
    feed_cost_per_kg: Decimal,
}

impl Default for MetricsCalculator {
    fn default() -> Self {
        Self {
            feed_cost_per_kg: DEFAULT_FEED_COST_PER_KG,
        }
    }
}

impl MetricsCalculator {
    pub fn new(feed_cost_per_kg: Decimal) -> Result<Self, AnalyticsError> {
        if feed_cost_per_kg < Decimal::ZERO {
            return Err(AnalyticsError::NegativeFeedCost(feed_cost_per_kg));
        }
        Ok(Self { feed_cost_per_kg })
    }

    pub fn feed_cost_per_kg(&self) -> Decimal {
        self.feed_cost_per_kg
    }

    /// Computes the productivity indicators of a cycle.
    ///
    /// # Arguments
    ///
    /// * `cycle` - The cycle being reported on.
    /// * `biometrics` - Every biometric sample of the cycle, in any order.
    /// * `feedings` - Every feeding record of the cycle.
    /// * `today` - Reference date for active cycles.
    ///
    /// The current weight is the latest biometric estimate for an active cycle
    /// and the harvest weight for a finalized one. Weight gain is always taken
    /// against the cycle's recorded initial weight.
    pub fn cycle_report(
        &self,
        cycle: &CultivationCycle,
        biometrics: &[BiometricSample],
        feedings: &[FeedingRecord],
        today: NaiveDate,
    ) -> Result<CycleReport, AnalyticsError> {
        ensure_owned(cycle.id, biometrics.iter().map(|b| (b.id, b.cycle_id)))?;
        ensure_owned(cycle.id, feedings.iter().map(|f| (f.id, f.cycle_id)))?;

        let total_feed_kg = metrics::total_feed_consumed(feedings);
        let total_mortality = metrics::total_mortality(feedings);
        let initial_weight_kg = cycle.initial_weight_or_zero();
        let current_weight_kg = metrics::cycle_weight(cycle, biometrics);

        let weight_gain_kg = metrics::weight_gain(initial_weight_kg, current_weight_kg);
        if weight_gain_kg < Decimal::ZERO {
            tracing::warn!(
                cycle_id = %cycle.id,
                %initial_weight_kg,
                %current_weight_kg,
                "Negative weight gain, check the biometric entries."
            );
        }
        let fca = metrics::feed_conversion_ratio(total_feed_kg, weight_gain_kg);

        let days = metrics::cultivation_days(cycle.stock_date, metrics::reference_date(cycle, today));

        tracing::debug!(cycle_id = %cycle.id, %total_feed_kg, %weight_gain_kg, %fca, days, "Cycle report computed.");

        Ok(CycleReport {
            cycle_id: cycle.id,
            status: cycle.status,
            cultivation_days: days,
            total_feed_kg,
            total_mortality,
            initial_weight_kg,
            current_weight_kg,
            weight_gain_kg,
            fca,
            // A positive gain whose ratio overflowed also reports the `0` sentinel.
            fca_available: weight_gain_kg > Decimal::ZERO
                && (fca > Decimal::ZERO || total_feed_kg.is_zero()),
            survival_pct: metrics::survival_rate(cycle.stocked_count, total_mortality),
        })
    }

    /// Computes the values the harvest transaction will persist, without
    /// touching the cycle.
    pub fn settle_harvest(
        &self,
        cycle: &CultivationCycle,
        input: &HarvestInput,
        feedings: &[FeedingRecord],
    ) -> Result<HarvestRecord, AnalyticsError> {
        ensure_owned(cycle.id, feedings.iter().map(|f| (f.id, f.cycle_id)))?;
        validate_harvest_input(cycle, input)?;

        let total_feed = metrics::total_feed_consumed(feedings);
        let weight_gain_kg = metrics::weight_gain(cycle.initial_weight_or_zero(), input.final_weight_kg);
        let fca = metrics::feed_conversion_ratio(total_feed, weight_gain_kg);
        let economics = metrics::harvest_profit(
            input.final_weight_kg,
            input.price_per_kg,
            input.harvest_cost.unwrap_or(Decimal::ZERO),
            self.feed_cost_per_kg,
            total_feed,
        )?;

        Ok(HarvestRecord {
            harvest_date: input.harvest_date,
            final_weight_kg: input.final_weight_kg,
            price_per_kg: input.price_per_kg,
            harvest_cost: input.harvest_cost,
            weight_gain_kg,
            fca,
            survival_pct: metrics::survival_rate(cycle.stocked_count, metrics::total_mortality(feedings)),
            revenue: economics.revenue,
            profit: economics.profit,
        })
    }

    /// Settles the harvest and applies it, returning the finalized cycle.
    pub fn finalize_cycle(
        &self,
        cycle: &CultivationCycle,
        input: &HarvestInput,
        feedings: &[FeedingRecord],
    ) -> Result<CultivationCycle, AnalyticsError> {
        let harvest = self.settle_harvest(cycle, input, feedings)?;
        let mut finalized = cycle.clone();
        finalized.finalize(harvest)?;
        tracing::info!(cycle_id = %finalized.id, "Cycle finalized.");
        Ok(finalized)
    }
}

/// Rejects child records that reference another cycle.
fn ensure_owned(
    cycle_id: Uuid,
    children: impl IntoIterator<Item = (Uuid, Uuid)>,
) -> Result<(), AnalyticsError> {
    for (record, found) in children {
        if found != cycle_id {
            return Err(AnalyticsError::ForeignRecord {
                record,
                expected: cycle_id,
                found,
            });
        }
    }
    Ok(())
}

fn validate_harvest_input(cycle: &CultivationCycle, input: &HarvestInput) -> Result<(), AnalyticsError> {
    if !cycle.is_active() {
        return Err(core_types::CoreError::AlreadyFinalized(cycle.id).into());
    }
    if input.final_weight_kg < MIN_FINAL_WEIGHT_KG {
        return Err(AnalyticsError::InvalidHarvest(
            "final_weight_kg".to_string(),
            format!("must be at least {MIN_FINAL_WEIGHT_KG} kg"),
        ));
    }
    if input.price_per_kg < MIN_PRICE_PER_KG {
        return Err(AnalyticsError::InvalidHarvest(
            "price_per_kg".to_string(),
            format!("must be at least {MIN_PRICE_PER_KG}"),
        ));
    }
    if input.harvest_cost.is_some_and(|c| c < Decimal::ZERO) {
        return Err(AnalyticsError::InvalidHarvest(
            "harvest_cost".to_string(),
            "cannot be negative".to_string(),
        ));
    }
    if input.harvest_date < cycle.stock_date {
        return Err(AnalyticsError::InvalidHarvest(
            "harvest_date".to_string(),
            format!("{} is before stocking on {}", input.harvest_date, cycle.stock_date),
        ));
    }
    Ok(())
}

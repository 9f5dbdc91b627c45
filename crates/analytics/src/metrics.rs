use crate::error::AnalyticsError;
use chrono::NaiveDate;
use core_types::{BiometricSample, CultivationCycle, FeedingRecord};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Estimated feed price in R$/kg used for harvest profit. There is no live
/// market-price lookup.
pub const DEFAULT_FEED_COST_PER_KG: Decimal = dec!(5);

/// Revenue and cost breakdown of a harvest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestEconomics {
    pub revenue: Decimal,
    pub feed_cost: Decimal,
    pub harvest_cost: Decimal,
    pub profit: Decimal,
}

/// `final - initial`. Negative values are returned as they are.
pub fn weight_gain(initial_weight: Decimal, final_or_current_weight: Decimal) -> Decimal {
    final_or_current_weight.saturating_sub(initial_weight)
}

/// `total_feed / weight_gain`, or `0` when the gain is not positive.
///
/// A result of `0` means "not computable" and must never be read as an FCA of zero.
/// A gain so small that the ratio does not fit in a `Decimal` is not computable either.
pub fn feed_conversion_ratio(total_feed: Decimal, weight_gain: Decimal) -> Decimal {
    if weight_gain <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    total_feed.checked_div(weight_gain).unwrap_or_else(|| {
        tracing::warn!(%total_feed, %weight_gain, "FCA out of range, reported as not computable.");
        Decimal::ZERO
    })
}

/// Plain sum of the feed amounts, saturating at `Decimal::MAX`.
pub fn total_feed_consumed(feedings: &[FeedingRecord]) -> Decimal {
    feedings
        .iter()
        .fold(Decimal::ZERO, |total, f| total.saturating_add(f.feed_kg))
}

/// Sum of observed mortality. Records without a count contribute nothing.
pub fn total_mortality(feedings: &[FeedingRecord]) -> u64 {
    feedings
        .iter()
        .fold(0u64, |total, f| total.saturating_add(u64::from(f.mortality_or_zero())))
}

/// Revenue minus estimated feed cost minus harvest cost.
///
/// Fails with [`AnalyticsError::Overflow`] when any of the amounts does not fit
/// in a `Decimal`.
pub fn harvest_profit(
    final_weight: Decimal,
    price_per_kg: Decimal,
    harvest_cost: Decimal,
    feed_cost_per_kg: Decimal,
    total_feed: Decimal,
) -> Result<HarvestEconomics, AnalyticsError> {
    let revenue = final_weight
        .checked_mul(price_per_kg)
        .ok_or(AnalyticsError::Overflow("revenue"))?;
    let feed_cost = total_feed
        .checked_mul(feed_cost_per_kg)
        .ok_or(AnalyticsError::Overflow("feed cost"))?;
    let profit = revenue
        .checked_sub(feed_cost)
        .and_then(|p| p.checked_sub(harvest_cost))
        .ok_or(AnalyticsError::Overflow("profit"))?;

    Ok(HarvestEconomics {
        revenue,
        feed_cost,
        harvest_cost,
        profit,
    })
}

/// Whole days between stocking and `reference_date`.
pub fn cultivation_days(stock_date: NaiveDate, reference_date: NaiveDate) -> i64 {
    (reference_date - stock_date).num_days()
}

/// The date cultivation days are counted up to: `today` while the cycle is
/// active, the harvest date once it is finalized.
pub fn reference_date(cycle: &CultivationCycle, today: NaiveDate) -> NaiveDate {
    cycle.harvest_date().unwrap_or(today)
}

/// Percentage of stocked animals still alive, floored at zero.
///
/// `None` when the stocked count was never recorded or is zero.
pub fn survival_rate(stocked_count: Option<u64>, total_mortality: u64) -> Option<Decimal> {
    let stocked = stocked_count.filter(|n| *n > 0)?;
    let alive = stocked.saturating_sub(total_mortality);
    Some(Decimal::from(alive) / Decimal::from(stocked) * dec!(100))
}

/// The most recent sample by collection date. On equal dates the one that
/// comes later in the input wins.
pub fn latest_biometric(samples: &[BiometricSample]) -> Option<&BiometricSample> {
    samples.iter().max_by_key(|s| s.collected_on)
}

/// Current biomass estimate taken from the latest sample, `0` when unknown.
pub fn current_weight(samples: &[BiometricSample]) -> Decimal {
    latest_biometric(samples)
        .and_then(|s| s.estimated_biomass_kg)
        .unwrap_or(Decimal::ZERO)
}

/// Current weight of a cycle: the harvest weight once finalized, otherwise
/// the latest biometric estimate.
pub fn cycle_weight(cycle: &CultivationCycle, biometrics: &[BiometricSample]) -> Decimal {
    match &cycle.harvest {
        Some(harvest) => harvest.final_weight_kg,
        None => current_weight(biometrics),
    }
}

/// FCA over the full feeding and biometric history of a cycle, with weight
/// gain taken against the cycle's recorded initial weight.
pub fn cycle_fca(
    cycle: &CultivationCycle,
    biometrics: &[BiometricSample],
    feedings: &[FeedingRecord],
) -> Decimal {
    let gain = weight_gain(cycle.initial_weight_or_zero(), cycle_weight(cycle, biometrics));
    feed_conversion_ratio(total_feed_consumed(feedings), gain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn feeding(feed_kg: Decimal, mortality: Option<u32>) -> FeedingRecord {
        FeedingRecord {
            id: Uuid::new_v4(),
            cycle_id: Uuid::nil(),
            fed_on: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            feed_kg,
            feed_type: None,
            mortality,
            feed_lot: None,
            supplier: None,
            notes: None,
        }
    }

    fn sample(day: u32, biomass: Option<Decimal>) -> BiometricSample {
        BiometricSample {
            id: Uuid::new_v4(),
            cycle_id: Uuid::nil(),
            collected_on: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            mean_weight_g: dec!(12.5),
            sample_size: Some(100),
            estimated_biomass_kg: biomass,
            notes: None,
        }
    }

    #[test]
    fn total_feed_is_the_plain_sum() {
        let records = vec![
            feeding(dec!(12.5), Some(1)),
            feeding(dec!(30), None),
            feeding(dec!(0.25), Some(4)),
        ];
        assert_eq!(total_feed_consumed(&records), dec!(42.75));
        assert_eq!(total_feed_consumed(&[]), Decimal::ZERO);
    }

    #[test]
    fn total_mortality_skips_missing_counts() {
        let records = vec![feeding(dec!(1), Some(3)), feeding(dec!(1), None), feeding(dec!(1), Some(9))];
        assert_eq!(total_mortality(&records), 12);
        assert_eq!(total_mortality(&[]), 0);
    }

    #[test]
    fn fca_is_sentinel_for_non_positive_gain() {
        for gain in [dec!(0), dec!(-0.001), dec!(-150)] {
            for feed in [dec!(0), dec!(1), dec!(270)] {
                assert_eq!(feed_conversion_ratio(feed, gain), Decimal::ZERO);
            }
        }
    }

    #[test]
    fn fca_divides_feed_by_gain() {
        assert_eq!(feed_conversion_ratio(dec!(270), dec!(150)), dec!(1.8));
        assert_eq!(feed_conversion_ratio(dec!(0), dec!(150)), Decimal::ZERO);
        let ratio = feed_conversion_ratio(dec!(100), dec!(3));
        assert!((ratio * dec!(3) - dec!(100)).abs() < dec!(0.000000001));
    }

    #[test]
    fn reference_scenario_gain_and_fca() {
        let gain = weight_gain(dec!(100), dec!(250));
        assert_eq!(gain, dec!(150));
        assert_eq!(feed_conversion_ratio(dec!(270), gain), dec!(1.8));
    }

    #[test]
    fn negative_gain_is_reported_not_clamped() {
        let gain = weight_gain(dec!(300), dec!(250));
        assert_eq!(gain, dec!(-50));
        assert_eq!(feed_conversion_ratio(dec!(270), gain), Decimal::ZERO);
    }

    #[test]
    fn harvest_profit_reference_scenario() {
        let economics = harvest_profit(dec!(500), dec!(18.5), dec!(200), dec!(5), dec!(300)).unwrap();
        assert_eq!(economics.revenue, dec!(9250));
        assert_eq!(economics.feed_cost, dec!(1500));
        assert_eq!(economics.profit, dec!(7550));
    }

    #[test]
    fn doubling_price_shifts_profit_by_revenue_delta() {
        let base = harvest_profit(dec!(420), dec!(17), dec!(150), DEFAULT_FEED_COST_PER_KG, dec!(610)).unwrap();
        let doubled = harvest_profit(dec!(420), dec!(34), dec!(150), DEFAULT_FEED_COST_PER_KG, dec!(610)).unwrap();
        assert_eq!(doubled.revenue, base.revenue * dec!(2));
        assert_eq!(doubled.profit - base.profit, doubled.revenue - base.revenue);

        let heavier = harvest_profit(dec!(840), dec!(17), dec!(150), DEFAULT_FEED_COST_PER_KG, dec!(610)).unwrap();
        assert_eq!(heavier.revenue, base.revenue * dec!(2));
        assert_eq!(heavier.profit - base.profit, base.revenue);
    }

    #[test]
    fn unrepresentable_fca_is_not_computable() {
        let gain = weight_gain(dec!(100), dec!(100.00000000000000000000000001));
        assert!(gain > Decimal::ZERO);
        assert_eq!(feed_conversion_ratio(dec!(1000000), gain), Decimal::ZERO);
    }

    #[test]
    fn extreme_weights_saturate_the_gain() {
        assert_eq!(weight_gain(Decimal::MIN, Decimal::MAX), Decimal::MAX);
        let records = vec![feeding(Decimal::MAX, None), feeding(dec!(1), None)];
        assert_eq!(total_feed_consumed(&records), Decimal::MAX);
    }

    #[test]
    fn overflowing_harvest_amounts_are_errors() {
        let revenue = harvest_profit(dec!(1000000000000000), dec!(100000000000000), dec!(0), dec!(5), dec!(1));
        assert_eq!(revenue, Err(AnalyticsError::Overflow("revenue")));

        let feed_cost = harvest_profit(dec!(500), dec!(18.5), dec!(0), dec!(1000000000000000), dec!(100000000000000));
        assert_eq!(feed_cost, Err(AnalyticsError::Overflow("feed cost")));

        let profit = harvest_profit(dec!(1), dec!(1), Decimal::MIN, dec!(5), dec!(0));
        assert_eq!(profit, Err(AnalyticsError::Overflow("profit")));
    }

    #[test]
    fn cultivation_days_counts_whole_days() {
        let stocked = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(cultivation_days(stocked, stocked), 0);
        assert_eq!(
            cultivation_days(stocked, NaiveDate::from_ymd_opt(2024, 4, 19).unwrap()),
            100
        );
    }

    #[test]
    fn survival_needs_a_stocked_count() {
        assert_eq!(survival_rate(None, 10), None);
        assert_eq!(survival_rate(Some(0), 0), None);
        assert_eq!(survival_rate(Some(1000), 150), Some(dec!(85)));
        assert_eq!(survival_rate(Some(100), 250), Some(Decimal::ZERO));
    }

    #[test]
    fn latest_sample_drives_current_weight() {
        let samples = vec![
            sample(5, Some(dec!(180))),
            sample(20, Some(dec!(240))),
            sample(12, Some(dec!(210))),
        ];
        assert_eq!(latest_biometric(&samples).unwrap().collected_on.to_string(), "2024-03-20");
        assert_eq!(current_weight(&samples), dec!(240));

        let unknown = vec![sample(5, Some(dec!(180))), sample(9, None)];
        assert_eq!(current_weight(&unknown), Decimal::ZERO);
        assert_eq!(current_weight(&[]), Decimal::ZERO);
    }

    #[test]
    fn cycle_fca_uses_recorded_initial_weight() {
        let stocked = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let cycle = CultivationCycle::stocked(Uuid::nil(), "C", stocked, Some(dec!(100)), None);
        // The first sample is ignored as a baseline; only the latest one counts.
        let samples = vec![sample(1, Some(dec!(130))), sample(15, Some(dec!(250)))];
        let feedings = vec![feeding(dec!(200), None), feeding(dec!(70), None)];
        assert_eq!(cycle_weight(&cycle, &samples), dec!(250));
        assert_eq!(cycle_fca(&cycle, &samples, &feedings), dec!(1.8));
        assert_eq!(cycle_fca(&cycle, &[], &feedings), Decimal::ZERO);
    }
}

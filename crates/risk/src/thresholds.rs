//! Fixed alert policy. Units follow the readings they apply to.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Dissolved oxygen below this (mg/L) is critical.
pub const CRITICAL_DISSOLVED_OXYGEN: Decimal = dec!(3);
/// Average daily mortality above this is critical.
pub const CRITICAL_AVG_MORTALITY: Decimal = dec!(5);
pub const PH_MIN: Decimal = dec!(6.5);
pub const PH_MAX: Decimal = dec!(9.0);
/// A computable FCA above this is a warning.
pub const WARNING_FCA: Decimal = dec!(2.0);

pub fn is_low_oxygen(dissolved_oxygen: Decimal) -> bool {
    dissolved_oxygen < CRITICAL_DISSOLVED_OXYGEN
}

pub fn is_ph_out_of_range(ph: Decimal) -> bool {
    ph < PH_MIN || ph > PH_MAX
}

pub fn is_high_mortality(average: Decimal) -> bool {
    average > CRITICAL_AVG_MORTALITY
}

/// The `0` "not computable" sentinel sits below the threshold and never warns.
pub fn is_high_fca(fca: Decimal) -> bool {
    fca > WARNING_FCA
}

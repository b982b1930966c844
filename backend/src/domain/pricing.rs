//! Fixed rates and total computation for bookable services.
//!
//! Totals are always derived here from a validated quantity and a rate
//! constant; clients never supply them.

/// Nurse hire, per hour.
pub const NURSE_RATE_PER_HOUR: i64 = 200;
/// Subscription plans, per day (day and night plans share the rate).
pub const SUBSCRIPTION_RATE_PER_DAY: i64 = 1000;
/// Ambulance dispatch, per kilometre.
pub const AMBULANCE_RATE_PER_KM: i64 = 50;

/// Largest total that survives the trip through `f64` exactly (2^53).
const MAX_EXACT_FLOAT_TOTAL: f64 = 9_007_199_254_740_992.0;

/// Total for a whole number of units.
///
/// Returns `None` when the product does not fit in an `i64`.
///
/// # Examples
/// ```
/// use carebook::domain::pricing::{total_for_units, NURSE_RATE_PER_HOUR};
///
/// assert_eq!(total_for_units(NURSE_RATE_PER_HOUR, 3), Some(600));
/// assert_eq!(total_for_units(NURSE_RATE_PER_HOUR, i64::MAX), None);
/// ```
pub fn total_for_units(rate: i64, units: i64) -> Option<i64> {
    rate.checked_mul(units)
}

/// Total for a fractional quantity (kilometres, days), rounded half away
/// from zero.
///
/// Returns `None` for non-finite input or totals too large to round
/// exactly.
///
/// # Examples
/// ```
/// use carebook::domain::pricing::{
///     total_for_quantity, AMBULANCE_RATE_PER_KM, SUBSCRIPTION_RATE_PER_DAY,
/// };
///
/// assert_eq!(total_for_quantity(AMBULANCE_RATE_PER_KM, 4.5), Some(225));
/// assert_eq!(total_for_quantity(AMBULANCE_RATE_PER_KM, 0.01), Some(1));
/// assert_eq!(total_for_quantity(SUBSCRIPTION_RATE_PER_DAY, 1.5), Some(1500));
/// ```
pub fn total_for_quantity(rate: i64, quantity: f64) -> Option<i64> {
    // Rate constants are small, so the i64 -> f64 conversion is exact.
    let total = (rate as f64 * quantity).round();
    if total.is_finite() && total.abs() <= MAX_EXACT_FLOAT_TOTAL {
        Some(total as i64)
    } else {
        None
    }
}

//! Rounding policy for minutes, hours and rates.

/// Round to one decimal place, halves away from zero.
///
/// Every derived minute, hour and percentage value goes through this
/// function so the policy is applied uniformly.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

//! Unit scaling.

/// One million.
pub const MILLION: f64 = 1_000_000.0;

/// Round `value` half away from zero to `places` decimal places.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Express a raw amount in millions, rounded to two decimals.
///
/// Absent stays absent; zero stays zero.
#[must_use]
pub fn to_millions(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite()).map(|v| round_to(v / MILLION, 2))
}

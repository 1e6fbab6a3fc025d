//! Price-to-NAV ratio.

/// Fund price over NAV price.
///
/// Present only when both prices are present and finite and the NAV price
/// is non-zero. A fund price of zero yields a ratio of zero.
#[must_use]
pub fn discount(fund_price: Option<f64>, nav_price: Option<f64>) -> Option<f64> {
    match (fund_price, nav_price) {
        (Some(fund), Some(nav)) if fund.is_finite() && nav.is_finite() && nav != 0.0 => {
            Some(fund / nav)
        }
        _ => None,
    }
}

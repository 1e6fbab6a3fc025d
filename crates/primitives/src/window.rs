//! Valuation-date window.

use chrono::Days;
use serde::{Deserialize, Serialize};

use crate::Date;

/// Calendar-date format used for every date key and file name.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Days on either side of the valuation date covered by price lookups.
pub const DEFAULT_LOOKBACK_DAYS: u64 = 2;

/// Price lookup window around a valuation date.
///
/// The window spans `target - radius` (inclusive) to `target + radius`
/// (exclusive), matching the half-open range daily-bar providers use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    /// Valuation date chosen by the user.
    pub target: Date,
    /// First calendar date of the window.
    pub start: Date,
    /// Calendar date one past the end of the window.
    pub end: Date,
}

impl DateWindow {
    /// Window of [`DEFAULT_LOOKBACK_DAYS`] around `target`.
    #[must_use]
    pub fn around(target: Date) -> Self {
        Self::with_radius(target, DEFAULT_LOOKBACK_DAYS)
    }

    /// Window of `days` on either side of `target`.
    ///
    /// Saturates at the representable date range instead of failing.
    #[must_use]
    pub fn with_radius(target: Date, days: u64) -> Self {
        let offset = Days::new(days);
        let start = target.checked_sub_days(offset).unwrap_or(Date::MIN);
        let end = target.checked_add_days(offset).unwrap_or(Date::MAX);
        Self { target, start, end }
    }

    /// Whether `date` falls inside the half-open window.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date < self.end
    }

    /// Same window bounds, re-targeted on another date (e.g. a fallback
    /// trading day).
    #[must_use]
    pub const fn retarget(self, target: Date) -> Self {
        Self { target, ..self }
    }

    /// Target date as `YYYY-MM-DD`.
    #[must_use]
    pub fn target_str(&self) -> String {
        self.target.format(DATE_FORMAT).to_string()
    }

    /// Window start as `YYYY-MM-DD`.
    #[must_use]
    pub fn start_str(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    /// Window end as `YYYY-MM-DD`.
    #[must_use]
    pub fn end_str(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }

    /// `(target, start, end)` formatted as `YYYY-MM-DD`.
    #[must_use]
    pub fn to_strings(&self) -> (String, String, String) {
        (self.target_str(), self.start_str(), self.end_str())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_around_target() {
        let window = DateWindow::around(date(2024, 6, 28));
        assert_eq!(
            window.to_strings(),
            ("2024-06-28".to_string(), "2024-06-26".to_string(), "2024-06-30".to_string())
        );
    }

    #[test]
    fn window_crosses_year_boundary() {
        let window = DateWindow::around(date(2024, 1, 1));
        assert_eq!(window.start_str(), "2023-12-30");
        assert_eq!(window.end_str(), "2024-01-03");
    }

    #[test]
    fn window_handles_leap_day() {
        let window = DateWindow::around(date(2024, 3, 1));
        assert_eq!(window.start, date(2024, 2, 28));
    }

    #[rstest]
    #[case(date(2024, 6, 26), true)]
    #[case(date(2024, 6, 28), true)]
    #[case(date(2024, 6, 29), true)]
    #[case(date(2024, 6, 30), false)]
    #[case(date(2024, 6, 25), false)]
    fn window_is_half_open(#[case] day: Date, #[case] expected: bool) {
        let window = DateWindow::around(date(2024, 6, 28));
        assert_eq!(window.contains(day), expected);
    }

    #[test]
    fn retarget_keeps_bounds() {
        let window = DateWindow::around(date(2024, 6, 29)).retarget(date(2024, 6, 28));
        assert_eq!(window.target, date(2024, 6, 28));
        assert_eq!(window.start, date(2024, 6, 27));
        assert_eq!(window.end, date(2024, 7, 1));
    }

    #[test]
    fn window_saturates_at_min_date() {
        let window = DateWindow::around(Date::MIN);
        assert_eq!(window.start, Date::MIN);
    }
}

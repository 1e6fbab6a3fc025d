//! Balance-sheet history and fundamentals snapshots.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::Date;

/// Reporting granularity of the balance sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportingPeriod {
    /// Quarterly filings.
    #[default]
    Quarterly,
    /// Annual filings.
    Annual,
}

impl ReportingPeriod {
    /// Prefix the fundamentals provider puts in front of line-item keys.
    #[must_use]
    pub const fn key_prefix(self) -> &'static str {
        match self {
            Self::Quarterly => "quarterly",
            Self::Annual => "annual",
        }
    }
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key_prefix())
    }
}

/// Named line items of one balance-sheet report.
pub type LineItems = BTreeMap<String, f64>;

/// Balance-sheet history: report date to line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    reports: BTreeMap<Date, LineItems>,
}

impl BalanceSheet {
    /// Create an empty balance sheet.
    #[must_use]
    pub const fn new() -> Self {
        Self { reports: BTreeMap::new() }
    }

    /// Record one line item. Non-finite values are ignored.
    pub fn insert(&mut self, report_date: Date, item: impl Into<String>, value: f64) {
        if value.is_finite() {
            self.reports.entry(report_date).or_default().insert(item.into(), value);
        }
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Report dates, ascending.
    pub fn report_dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.reports.keys().copied()
    }

    /// Line items of the report dated exactly `date`.
    #[must_use]
    pub fn report(&self, date: Date) -> Option<&LineItems> {
        self.reports.get(&date)
    }

    /// Most recent report dated on or before `date`.
    #[must_use]
    pub fn as_of(&self, date: Date) -> Option<(Date, &LineItems)> {
        self.reports.range(..=date).next_back().map(|(d, items)| (*d, items))
    }
}

impl<S: Into<String>> FromIterator<(Date, S, f64)> for BalanceSheet {
    fn from_iter<I: IntoIterator<Item = (Date, S, f64)>>(iter: I) -> Self {
        let mut sheet = Self::new();
        for (date, item, value) in iter {
            sheet.insert(date, item, value);
        }
        sheet
    }
}

/// Latest disclosed fundamentals of a fund as of the valuation date.
///
/// Every field is absent when no qualifying report exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FundamentalsSnapshot {
    /// Shares outstanding.
    pub shares_outstanding: Option<f64>,
    /// Total debt.
    pub total_debt: Option<f64>,
    /// Preferred securities carried outside stock equity.
    pub outside_equity: Option<f64>,
    /// Date of the report the values came from.
    pub report_date: Option<Date>,
}

impl FundamentalsSnapshot {
    /// Snapshot with every field absent.
    #[must_use]
    pub const fn empty() -> Self {
        Self { shares_outstanding: None, total_debt: None, outside_equity: None, report_date: None }
    }

    /// Whether no report qualified.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.report_date.is_none()
    }
}

//! Final report row.

use serde::{Deserialize, Serialize};

use crate::{Date, Symbol};

/// Column headers of the exported report, in output order.
pub const REPORT_COLUMNS: [&str; 14] = [
    "Fund Name",
    "Broad Category",
    "Fund Type",
    "Subcategory",
    "Geographic Focus",
    "Date",
    "Fund Ticker",
    "Fund Close Price",
    "NAV Ticker",
    "NAV Close Price",
    "Discount",
    "Shares Outstanding(M)",
    "Total Debt(M)",
    "Outside Equity (M)",
];

/// One output row per reference fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Display name, or the fund ticker when no name is known.
    pub fund_name: String,
    /// Coarse classification.
    pub broad_category: String,
    /// Fund type.
    pub fund_type: String,
    /// Finer-grained classification.
    pub subcategory: String,
    /// Geographic focus.
    pub region: String,
    /// Trading date the prices were taken from.
    pub date: Date,
    /// Fund ticker.
    pub fund_ticker: Symbol,
    /// Fund close price.
    pub fund_price: Option<f64>,
    /// NAV ticker.
    pub nav_ticker: Symbol,
    /// NAV close price.
    pub nav_price: Option<f64>,
    /// `fund_price / nav_price`.
    pub discount: Option<f64>,
    /// Shares outstanding in millions.
    pub shares_outstanding_m: Option<f64>,
    /// Total debt in millions.
    pub total_debt_m: Option<f64>,
    /// Outside equity in millions.
    pub outside_equity_m: Option<f64>,
}

/// A single report cell, borrowed from a [`ReportRow`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReportCell<'a> {
    /// Free text.
    Text(&'a str),
    /// Calendar date.
    Date(Date),
    /// Number, or an empty cell when absent.
    Number(Option<f64>),
}

impl ReportRow {
    /// Cells in [`REPORT_COLUMNS`] order.
    #[must_use]
    pub fn cells(&self) -> [ReportCell<'_>; 14] {
        [
            ReportCell::Text(&self.fund_name),
            ReportCell::Text(&self.broad_category),
            ReportCell::Text(&self.fund_type),
            ReportCell::Text(&self.subcategory),
            ReportCell::Text(&self.region),
            ReportCell::Date(self.date),
            ReportCell::Text(self.fund_ticker.as_str()),
            ReportCell::Number(self.fund_price),
            ReportCell::Text(self.nav_ticker.as_str()),
            ReportCell::Number(self.nav_price),
            ReportCell::Number(self.discount),
            ReportCell::Number(self.shares_outstanding_m),
            ReportCell::Number(self.total_debt_m),
            ReportCell::Number(self.outside_equity_m),
        ]
    }
}

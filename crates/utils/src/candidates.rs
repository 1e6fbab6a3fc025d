//! Ordered line-item candidate resolution.

use cefnav_primitives::LineItems;

/// Shares outstanding, most specific name first.
pub const SHARES_OUTSTANDING_ITEMS: CandidateList =
    CandidateList::new(&["Ordinary Shares Number", "Share Issued"]);

/// Total debt, falling back to its components.
pub const TOTAL_DEBT_ITEMS: CandidateList =
    CandidateList::new(&["Total Debt", "Long Term Debt", "Current Debt"]);

/// Preferred securities carried outside stock equity.
pub const OUTSIDE_EQUITY_ITEMS: CandidateList =
    CandidateList::new(&["Preferred Securities Outside Stock Equity"]);

/// Line-item names in priority order; the first one present wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateList {
    names: &'static [&'static str],
}

impl CandidateList {
    /// Create a candidate list.
    #[must_use]
    pub const fn new(names: &'static [&'static str]) -> Self {
        Self { names }
    }

    /// Candidate names in priority order.
    #[must_use]
    pub const fn names(&self) -> &'static [&'static str] {
        self.names
    }

    /// First candidate present in `items`, with the name that matched.
    ///
    /// A present value of zero is a match; it is not skipped.
    #[must_use]
    pub fn resolve_named(&self, items: &LineItems) -> Option<(&'static str, f64)> {
        self.names.iter().find_map(|&name| items.get(name).map(|value| (name, *value)))
    }

    /// Value of the first candidate present in `items`.
    #[must_use]
    pub fn resolve(&self, items: &LineItems) -> Option<f64> {
        self.resolve_named(items).map(|(_, value)| value)
    }
}

//! Ticker and reference-row definitions.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Exchange ticker symbol, for either a fund or its NAV proxy.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl Symbol {
    /// Create a new symbol.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One row of the fund reference sheet.
///
/// Rows are only constructed when both tickers are present, so a
/// `FundRecord` always carries a usable fund and NAV symbol. The
/// classification fields are free text and may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundRecord {
    /// Fund ticker.
    pub fund: Symbol,
    /// NAV ticker published for the fund.
    pub nav: Symbol,
    /// Fund type, e.g. "Equity" or "Fixed Income".
    pub fund_type: String,
    /// Finer-grained classification.
    pub subcategory: String,
    /// Coarse classification.
    pub broad_category: String,
    /// Geographic focus.
    pub region: String,
}

impl FundRecord {
    /// Create a record with empty classification fields.
    #[must_use]
    pub fn new(fund: impl Into<Symbol>, nav: impl Into<Symbol>) -> Self {
        Self {
            fund: fund.into(),
            nav: nav.into(),
            fund_type: String::new(),
            subcategory: String::new(),
            broad_category: String::new(),
            region: String::new(),
        }
    }

    /// Set the classification fields.
    #[must_use]
    pub fn with_classification(
        mut self,
        fund_type: impl Into<String>,
        subcategory: impl Into<String>,
        broad_category: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        self.fund_type = fund_type.into();
        self.subcategory = subcategory.into();
        self.broad_category = broad_category.into();
        self.region = region.into();
        self
    }
}

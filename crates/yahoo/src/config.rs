//! Endpoint and client configuration.

use std::time::Duration;

use cefnav_traits::SourceError;

/// Published fund/NAV ticker workbook.
pub const DEFAULT_REFERENCE_URL: &str =
    "https://github.com/Lukasmc92/NAV-Tickers/raw/refs/heads/main/Tickers.xlsx";

/// Configuration for [`crate::YahooSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YahooConfig {
    /// Host serving quoteSummary and the crumb endpoint.
    pub query1_url: String,
    /// Host serving fundamentals-timeseries.
    pub query2_url: String,
    /// URL that hands out the session cookie.
    pub cookie_url: String,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Chart requests kept in flight during a bulk price fetch.
    pub max_concurrent_requests: usize,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            query1_url: "https://query1.finance.yahoo.com".to_string(),
            query2_url: "https://query2.finance.yahoo.com".to_string(),
            cookie_url: "https://fc.yahoo.com".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            timeout: Duration::from_secs(30),
            max_concurrent_requests: 8,
        }
    }
}

impl YahooConfig {
    /// Point every endpoint at `base`.
    #[must_use]
    pub fn with_base_url(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            query1_url: base.clone(),
            query2_url: base.clone(),
            cookie_url: base,
            ..Self::default()
        }
    }

    /// Check the configuration.
    ///
    /// # Errors
    /// Returns `SourceError::Malformed` if no requests would be allowed in
    /// flight.
    pub fn validate(&self) -> Result<(), SourceError> {
        if self.max_concurrent_requests == 0 {
            return Err(SourceError::Malformed(
                "max_concurrent_requests must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

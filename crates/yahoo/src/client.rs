//! Shared Yahoo Finance client state.

use std::{
    fmt,
    sync::{PoisonError, RwLock},
};

use cefnav_primitives::Symbol;
use cefnav_traits::SourceError;
use reqwest::{StatusCode, header};
use tracing::debug;
use yahoo_finance_api as yahoo;

use crate::YahooConfig;

/// Session cookie and crumb required by quoteSummary.
#[derive(Debug, Clone)]
pub(crate) struct Crumb {
    pub(crate) cookie: String,
    pub(crate) crumb: String,
}

/// Yahoo Finance price, fundamentals and profile source.
///
/// Chart history goes through `yahoo_finance_api`; quoteSummary and
/// fundamentals-timeseries are plain JSON requests on a shared
/// `reqwest` client. The crumb is fetched on first use and dropped when
/// Yahoo answers 401.
pub struct YahooSource {
    pub(crate) connector: yahoo::YahooConnector,
    pub(crate) http: reqwest::Client,
    pub(crate) config: YahooConfig,
    crumb: RwLock<Option<Crumb>>,
}

impl fmt::Debug for YahooSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YahooSource")
            .field("config", &self.config)
            .field("has_crumb", &self.has_crumb())
            .finish_non_exhaustive()
    }
}

impl YahooSource {
    /// Create a source with the default configuration.
    ///
    /// # Errors
    /// Returns `SourceError::Http` if an HTTP client cannot be built.
    pub fn new() -> Result<Self, SourceError> {
        Self::with_config(YahooConfig::default())
    }

    /// Create a source with a custom configuration.
    ///
    /// # Errors
    /// Returns `SourceError` if the configuration is invalid or an HTTP
    /// client cannot be built.
    pub fn with_config(config: YahooConfig) -> Result<Self, SourceError> {
        config.validate()?;
        let connector = yahoo::YahooConnector::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| SourceError::Http(format!("failed to initialize Yahoo connector: {e}")))?;
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(http_error)?;
        Ok(Self { connector, http, config, crumb: RwLock::new(None) })
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &YahooConfig {
        &self.config
    }

    pub(crate) fn has_crumb(&self) -> bool {
        self.crumb.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    /// Cached crumb, performing the cookie/crumb handshake if needed.
    pub(crate) async fn crumb(&self) -> Result<Crumb, SourceError> {
        let cached = self.crumb.read().unwrap_or_else(PoisonError::into_inner).clone();
        if let Some(crumb) = cached {
            return Ok(crumb);
        }

        let crumb = self.fetch_crumb().await?;
        *self.crumb.write().unwrap_or_else(PoisonError::into_inner) = Some(crumb.clone());
        Ok(crumb)
    }

    async fn fetch_crumb(&self) -> Result<Crumb, SourceError> {
        debug!(url = %self.config.cookie_url, "requesting session cookie");
        let response = self.http.get(&self.config.cookie_url).send().await.map_err(http_error)?;
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split(';').next())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .ok_or_else(|| SourceError::Malformed("no session cookie in response".to_string()))?;

        let url = format!("{}/v1/test/getcrumb", self.config.query1_url);
        let response =
            self.http.get(&url).header(header::COOKIE, &cookie).send().await.map_err(http_error)?;
        let response = check_status(response, &url)?;
        let crumb = response.text().await.map_err(http_error)?.trim().to_string();
        if crumb.is_empty() {
            return Err(SourceError::Malformed("empty crumb".to_string()));
        }

        debug!("obtained Yahoo crumb");
        Ok(Crumb { cookie, crumb })
    }

    /// Forget the crumb so the next request performs a new handshake.
    pub(crate) fn clear_crumb(&self) {
        *self.crumb.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

pub(crate) fn http_error(e: reqwest::Error) -> SourceError {
    SourceError::Http(e.to_string())
}

/// Pass successful responses through, map the rest to `SourceError::Status`.
pub(crate) fn check_status(
    response: reqwest::Response,
    url: &str,
) -> Result<reqwest::Response, SourceError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(SourceError::Status { status: status.as_u16(), url: url.to_string() })
    }
}

pub(crate) const fn is_unauthorized(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED)
}

pub(crate) fn yahoo_error(symbol: &Symbol, e: yahoo::YahooError) -> SourceError {
    match e {
        yahoo::YahooError::NoQuotes => SourceError::NoData(symbol.to_string()),
        yahoo::YahooError::NoResult => SourceError::SymbolNotFound(symbol.to_string()),
        other => SourceError::Http(format!("{symbol}: {other}")),
    }
}

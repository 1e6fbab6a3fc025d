//! Display names.

use async_trait::async_trait;
use cefnav_primitives::Symbol;
use cefnav_traits::{ProfileSource, SourceError};
use reqwest::{StatusCode, header};
use tracing::debug;
use urlencoding::encode;

use crate::{
    YahooSource,
    client::{check_status, http_error, is_unauthorized, yahoo_error},
    models::QuoteSummaryResponse,
};

impl YahooSource {
    /// Name from the quoteSummary `price` module.
    pub(crate) async fn summary_name(
        &self,
        symbol: &Symbol,
    ) -> Result<Option<String>, SourceError> {
        let crumb = self.crumb().await?;
        let endpoint = format!(
            "{}/v10/finance/quoteSummary/{}",
            self.config.query1_url,
            encode(symbol.as_str())
        );

        let response = self
            .http
            .get(&endpoint)
            .query(&[("modules", "price"), ("crumb", crumb.crumb.as_str())])
            .header(header::COOKIE, &crumb.cookie)
            .send()
            .await
            .map_err(http_error)?;

        if is_unauthorized(response.status()) {
            debug!("Yahoo authentication expired, clearing crumb");
            self.clear_crumb();
        }
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let summary: QuoteSummaryResponse = check_status(response, &endpoint)?
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;
        Ok(summary.display_name())
    }

    /// Name from the ticker search endpoint, exact symbol matches only.
    async fn search_name(&self, symbol: &Symbol) -> Result<Option<String>, SourceError> {
        let result = self
            .connector
            .search_ticker(&encode(symbol.as_str()))
            .await
            .map_err(|e| yahoo_error(symbol, e))?;

        Ok(result
            .quotes
            .iter()
            .find(|q| q.symbol.eq_ignore_ascii_case(symbol.as_str()))
            .and_then(|q| {
                [q.long_name.trim(), q.short_name.trim()].into_iter().find(|n| !n.is_empty())
            })
            .map(str::to_string))
    }
}

#[async_trait]
impl ProfileSource for YahooSource {
    async fn display_name(&self, symbol: &Symbol) -> Result<Option<String>, SourceError> {
        match self.summary_name(symbol).await {
            Ok(Some(name)) => return Ok(Some(name)),
            Ok(None) => debug!(%symbol, "quoteSummary has no name, trying search"),
            Err(e) => debug!(%symbol, error = %e, "quoteSummary failed, trying search"),
        }
        self.search_name(symbol).await
    }
}

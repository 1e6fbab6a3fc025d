//! Yahoo Finance response models.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// quoteSummary envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuoteSummaryResponse {
    pub(crate) quote_summary: QuoteSummary,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuoteSummary {
    #[serde(default)]
    pub(crate) result: Option<Vec<QuoteSummaryResult>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuoteSummaryResult {
    pub(crate) price: Option<PriceModule>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PriceModule {
    pub(crate) long_name: Option<String>,
    pub(crate) short_name: Option<String>,
}

impl QuoteSummaryResponse {
    /// First non-blank of `longName`, `shortName`.
    pub(crate) fn display_name(&self) -> Option<String> {
        let price = self.quote_summary.result.as_ref()?.first()?.price.as_ref()?;
        [price.long_name.as_deref(), price.short_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|name| !name.is_empty())
            .map(str::to_string)
    }
}

/// fundamentals-timeseries envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct TimeseriesResponse {
    pub(crate) timeseries: Timeseries,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Timeseries {
    #[serde(default)]
    pub(crate) result: Vec<TimeseriesResult>,
}

/// One requested line item. The points live under a key equal to the
/// item's type name, so everything besides `meta` is collected loosely.
#[derive(Debug, Deserialize)]
pub(crate) struct TimeseriesResult {
    pub(crate) meta: TimeseriesMeta,
    #[serde(flatten)]
    pub(crate) series: HashMap<String, Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TimeseriesMeta {
    #[serde(rename = "type", default)]
    pub(crate) kind: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TimeseriesPoint {
    pub(crate) as_of_date: String,
    pub(crate) reported_value: Option<ReportedValue>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReportedValue {
    pub(crate) raw: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_long_name() {
        let body = r#"{"quoteSummary":{"result":[{"price":{
            "longName":"PIMCO Dynamic Income Fund","shortName":"PIMCO Dyn"}}],"error":null}}"#;
        let response: QuoteSummaryResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.display_name().as_deref(), Some("PIMCO Dynamic Income Fund"));
    }

    #[test]
    fn display_name_skips_blank_long_name() {
        let body = r#"{"quoteSummary":{"result":[{"price":{
            "longName":"  ","shortName":"Adams Divers Eq"}}]}}"#;
        let response: QuoteSummaryResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.display_name().as_deref(), Some("Adams Divers Eq"));
    }

    #[test]
    fn display_name_absent_without_result() {
        let body = r#"{"quoteSummary":{"result":null,"error":{"code":"Not Found"}}}"#;
        let response: QuoteSummaryResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.display_name(), None);
    }
}

//! Balance-sheet history from the fundamentals-timeseries endpoint.

use async_trait::async_trait;
use cefnav_primitives::{BalanceSheet, DATE_FORMAT, Date, ReportingPeriod, Symbol};
use cefnav_traits::{FundamentalsSource, SourceError};
use cefnav_utils::{CandidateList, OUTSIDE_EQUITY_ITEMS, SHARES_OUTSTANDING_ITEMS, TOTAL_DEBT_ITEMS};
use chrono::Utc;
use tracing::debug;
use urlencoding::encode;

use crate::{
    YahooSource,
    client::{check_status, http_error},
    models::{TimeseriesPoint, TimeseriesResponse},
};

/// Earliest report time requested, in unix seconds.
const HISTORY_START: i64 = 493_590_046;

const LISTS: [CandidateList; 3] =
    [SHARES_OUTSTANDING_ITEMS, TOTAL_DEBT_ITEMS, OUTSIDE_EQUITY_ITEMS];

fn line_items() -> impl Iterator<Item = &'static str> {
    LISTS.into_iter().flat_map(|list| list.names().iter().copied())
}

fn type_key(period: ReportingPeriod, item: &str) -> String {
    format!("{}{}", period.key_prefix(), item.replace(' ', ""))
}

/// Timeseries type names for every line item the pipeline reads, e.g.
/// `quarterlyTotalDebt`.
#[must_use]
pub fn timeseries_types(period: ReportingPeriod) -> Vec<String> {
    line_items().map(|item| type_key(period, item)).collect()
}

/// Assemble a [`BalanceSheet`] from a fundamentals-timeseries body.
///
/// Series for types other than the requested line items are ignored, as
/// are null points and points without a raw value.
///
/// # Errors
/// Returns `SourceError::Parse` if the body is not a timeseries response.
pub fn balance_sheet_from_timeseries(
    body: &str,
    period: ReportingPeriod,
) -> Result<BalanceSheet, SourceError> {
    let response: TimeseriesResponse =
        serde_json::from_str(body).map_err(|e| SourceError::Parse(e.to_string()))?;

    let mut sheet = BalanceSheet::new();
    for result in response.timeseries.result {
        let Some(kind) = result.meta.kind.first() else { continue };
        let Some(item) = line_items().find(|item| type_key(period, item) == *kind) else {
            continue;
        };
        let Some(raw) = result.series.get(kind) else { continue };

        let points: Vec<Option<TimeseriesPoint>> = serde_json::from_value(raw.clone())
            .map_err(|e| SourceError::Parse(format!("{kind}: {e}")))?;
        for point in points.into_iter().flatten() {
            let Some(value) = point.reported_value.and_then(|v| v.raw) else { continue };
            let date = Date::parse_from_str(&point.as_of_date, DATE_FORMAT)
                .map_err(|e| SourceError::Parse(format!("{kind} asOfDate: {e}")))?;
            sheet.insert(date, item, value);
        }
    }
    Ok(sheet)
}

#[async_trait]
impl FundamentalsSource for YahooSource {
    async fn balance_sheet(
        &self,
        symbol: &Symbol,
        period: ReportingPeriod,
    ) -> Result<BalanceSheet, SourceError> {
        let url = format!(
            "{}/ws/fundamentals-timeseries/v1/finance/timeseries/{}",
            self.config.query2_url,
            encode(symbol.as_str())
        );
        let types = timeseries_types(period).join(",");
        let period2 = Utc::now().timestamp().to_string();
        debug!(%symbol, %period, "fetching balance sheet");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("symbol", symbol.as_str()),
                ("type", types.as_str()),
                ("period1", HISTORY_START.to_string().as_str()),
                ("period2", period2.as_str()),
            ])
            .send()
            .await
            .map_err(http_error)?;
        let body = check_status(response, &url)?.text().await.map_err(http_error)?;

        let sheet = balance_sheet_from_timeseries(&body, period)?;
        debug!(%symbol, reports = sheet.report_dates().count(), "balance sheet parsed");
        Ok(sheet)
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;

    use super::*;
    use crate::YahooConfig;

    const BODY: &str = r#"{"timeseries":{"result":[
        {"meta":{"symbol":["PDI"],"type":["quarterlyOrdinarySharesNumber"]},
         "timestamp":[1704067200,1711843200],
         "quarterlyOrdinarySharesNumber":[
            {"asOfDate":"2023-12-31","periodType":"3M",
             "reportedValue":{"raw":229000000.0,"fmt":"229M"}},
            {"asOfDate":"2024-03-31","periodType":"3M",
             "reportedValue":{"raw":231500000.0,"fmt":"231.5M"}}]},
        {"meta":{"symbol":["PDI"],"type":["quarterlyTotalDebt"]},
         "timestamp":[1711843200],
         "quarterlyTotalDebt":[null,
            {"asOfDate":"2024-03-31","periodType":"3M","reportedValue":{"raw":0.0,"fmt":"0"}}]},
        {"meta":{"symbol":["PDI"],"type":["quarterlyPreferredSecuritiesOutsideStockEquity"]}},
        {"meta":{"symbol":["PDI"],"type":["quarterlyNetDebt"]},
         "quarterlyNetDebt":[{"asOfDate":"2024-03-31","reportedValue":{"raw":5.0}}]}
    ],"error":null}}"#;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn types_cover_every_candidate() {
        let types = timeseries_types(ReportingPeriod::Quarterly);
        assert_eq!(types.len(), 6);
        assert_eq!(types[0], "quarterlyOrdinarySharesNumber");
        assert!(types.contains(&"quarterlyPreferredSecuritiesOutsideStockEquity".to_string()));
        assert_eq!(timeseries_types(ReportingPeriod::Annual)[2], "annualTotalDebt");
    }

    #[test]
    fn timeseries_becomes_balance_sheet() {
        let sheet = balance_sheet_from_timeseries(BODY, ReportingPeriod::Quarterly).unwrap();

        assert_eq!(sheet.report_dates().collect::<Vec<_>>(), vec![
            date(2023, 12, 31),
            date(2024, 3, 31)
        ]);
        let report = sheet.report(date(2024, 3, 31)).unwrap();
        assert_eq!(report["Ordinary Shares Number"], 231_500_000.0);
        assert_eq!(report["Total Debt"], 0.0);
        assert!(!report.contains_key("Net Debt"));
        assert!(!report.contains_key("Preferred Securities Outside Stock Equity"));
    }

    #[test]
    fn annual_request_ignores_quarterly_series() {
        let sheet = balance_sheet_from_timeseries(BODY, ReportingPeriod::Annual).unwrap();
        assert!(sheet.is_empty());
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(
            balance_sheet_from_timeseries("<html>", ReportingPeriod::Quarterly),
            Err(SourceError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn balance_sheet_over_http() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/ws/fundamentals-timeseries/v1/finance/timeseries/PDI")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("symbol".into(), "PDI".into()),
                Matcher::Regex("type=quarterlyOrdinarySharesNumber".into()),
            ]))
            .with_header("content-type", "application/json")
            .with_body(BODY)
            .create_async()
            .await;

        let source = YahooSource::with_config(YahooConfig::with_base_url(server.url())).unwrap();
        let sheet =
            source.balance_sheet(&Symbol::new("PDI"), ReportingPeriod::Quarterly).await.unwrap();

        mock.assert_async().await;
        assert_eq!(sheet.as_of(date(2024, 1, 15)).unwrap().0, date(2023, 12, 31));
    }

    #[tokio::test]
    async fn not_found_is_a_status_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/ws/fundamentals-timeseries/v1/finance/timeseries/ZZZZ")
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let source = YahooSource::with_config(YahooConfig::with_base_url(server.url())).unwrap();
        let result = source.balance_sheet(&Symbol::new("ZZZZ"), ReportingPeriod::Annual).await;
        assert!(matches!(result, Err(SourceError::Status { status: 404, .. })));
    }
}

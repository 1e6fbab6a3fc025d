//! Bulk price fetch, date fallback and gap filling.

use cefnav_primitives::{Date, DateWindow, PriceBatch, PriceTable, Symbol};
use cefnav_traits::{PriceSource, SourceError};
use tracing::{debug, info, warn};

use crate::PipelineError;

/// Close prices resolved for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSnapshot {
    /// Prices over the lookup window, gaps patched where possible.
    pub table: PriceTable,
    /// Trading date the report uses.
    pub date: Date,
    /// Requested date, when `date` is a fallback.
    pub fallback_from: Option<Date>,
    /// Symbols still without a price on `date` after gap filling.
    pub unresolved: Vec<Symbol>,
}

impl PriceSnapshot {
    /// Close of `symbol` on the resolved date.
    #[must_use]
    pub fn close(&self, symbol: &Symbol) -> Option<f64> {
        self.table.close(self.date, symbol)
    }
}

/// Collapse a bulk response into a [`PriceTable`] restricted to `window`.
///
/// A flat series is attributed to the single requested symbol.
///
/// # Errors
/// Returns `SourceError::Malformed` if a flat series answers a request for
/// anything other than exactly one symbol.
pub fn normalize_batch(
    batch: PriceBatch,
    requested: &[Symbol],
    window: &DateWindow,
) -> Result<PriceTable, SourceError> {
    let table = match batch {
        PriceBatch::Flat(series) => match requested {
            [only] => PriceTable::from_series([(only.clone(), series)]),
            _ => {
                return Err(SourceError::Malformed(format!(
                    "flat price series returned for {} requested symbols",
                    requested.len()
                )));
            }
        },
        PriceBatch::Nested(map) => PriceTable::from_series(map),
    };
    Ok(table.within(window))
}

/// Trading date to report for `window.target`.
///
/// Uses the target itself when the table has any price on it, otherwise
/// the latest earlier date inside the window.
///
/// # Errors
/// Returns `PipelineError::NoPriceData` if no such date exists.
pub fn resolve_price_date(table: &PriceTable, window: &DateWindow) -> Result<Date, PipelineError> {
    if table.has_date(window.target) {
        return Ok(window.target);
    }
    table.latest_on_or_before(window).ok_or(PipelineError::NoPriceData {
        target: window.target,
        start: window.start,
        end: window.end,
    })
}

/// Retry every symbol without a close on `date`, once each, and merge the
/// recovered prices into a new table.
///
/// Fetch errors are logged and leave the symbol absent.
pub async fn fill_gaps(
    source: &dyn PriceSource,
    table: &PriceTable,
    symbols: &[Symbol],
    date: Date,
    window: &DateWindow,
) -> PriceTable {
    let missing = table.missing_on(date, symbols);
    if missing.is_empty() {
        return table.clone();
    }
    debug!(count = missing.len(), %date, "retrying symbols without a close");

    let mut recovered = Vec::new();
    for symbol in missing {
        match source.fetch_symbol(&symbol, window).await {
            Ok(series) => {
                let hit: Vec<_> =
                    series.into_iter().filter(|p| p.date == date && p.close.is_finite()).collect();
                if hit.is_empty() {
                    debug!(%symbol, %date, "retry returned no close for date");
                } else {
                    recovered.push((symbol, hit));
                }
            }
            Err(e) => warn!(%symbol, error = %e, "retry failed"),
        }
    }

    table.merge(&PriceTable::from_series(recovered))
}

/// Bulk-fetch closes for `symbols`, resolve the trading date and fill gaps.
///
/// # Errors
/// Returns `PipelineError::Prices` if the bulk request fails as a whole and
/// `PipelineError::NoPriceData` if no usable trading day exists.
pub async fn fetch_prices(
    source: &dyn PriceSource,
    symbols: &[Symbol],
    window: &DateWindow,
) -> Result<PriceSnapshot, PipelineError> {
    info!(
        symbols = symbols.len(),
        start = %window.start,
        end = %window.end,
        "downloading prices in bulk"
    );
    let batch = source.fetch_batch(symbols, window).await.map_err(PipelineError::Prices)?;
    let table = normalize_batch(batch, symbols, window).map_err(PipelineError::Prices)?;

    let date = resolve_price_date(&table, window)?;
    let fallback_from = (date != window.target).then_some(window.target);
    if let Some(requested) = fallback_from {
        warn!(%requested, fallback = %date, "no data for requested date, using fallback date");
    }

    let table = fill_gaps(source, &table, symbols, date, window).await;
    let unresolved = table.missing_on(date, symbols);
    for symbol in &unresolved {
        warn!(%symbol, %date, "no close price after retry");
    }

    Ok(PriceSnapshot { table, date, fallback_from, unresolved })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use cefnav_primitives::DailyClose;
    use rstest::rstest;

    use super::*;
    use crate::testing::{FakePrices, date, sym};

    #[test]
    fn flat_and_nested_collapse_to_same_shape() {
        let window = DateWindow::around(date(2024, 6, 28));
        let series = vec![DailyClose::new(date(2024, 6, 28), 19.1)];

        let flat =
            normalize_batch(PriceBatch::Flat(series.clone()), &[sym("PDI")], &window).unwrap();
        let nested = normalize_batch(
            PriceBatch::Nested(BTreeMap::from([(sym("PDI"), series)])),
            &[sym("PDI")],
            &window,
        )
        .unwrap();

        assert_eq!(flat, nested);
        assert_eq!(flat.close(date(2024, 6, 28), &sym("PDI")), Some(19.1));
    }

    #[test]
    fn flat_series_for_many_symbols_is_malformed() {
        let window = DateWindow::around(date(2024, 6, 28));
        let result =
            normalize_batch(PriceBatch::Flat(vec![]), &[sym("PDI"), sym("XPDIX")], &window);
        assert!(matches!(result, Err(SourceError::Malformed(_))));
    }

    #[rstest]
    #[case::trading_day(date(2024, 6, 28), date(2024, 6, 28))]
    #[case::saturday(date(2024, 6, 29), date(2024, 6, 28))]
    #[case::sunday(date(2024, 6, 30), date(2024, 6, 28))]
    #[case::monday(date(2024, 7, 1), date(2024, 7, 1))]
    fn resolve_price_date_cases(#[case] target: Date, #[case] expected: Date) {
        let window = DateWindow::around(target);
        let table = PriceTable::from_series([(
            sym("PDI"),
            vec![
                DailyClose::new(date(2024, 6, 27), 18.9),
                DailyClose::new(date(2024, 6, 28), 19.1),
                DailyClose::new(date(2024, 7, 1), 19.4),
            ],
        )]);
        assert_eq!(resolve_price_date(&table, &window).unwrap(), expected);
    }

    #[test]
    fn resolve_without_earlier_date_fails() {
        let window = DateWindow::around(date(2024, 6, 29));
        let table = PriceTable::from_series([(
            sym("PDI"),
            vec![DailyClose::new(date(2024, 6, 30), 19.4)],
        )]);
        assert!(matches!(
            resolve_price_date(&table, &window),
            Err(PipelineError::NoPriceData { .. })
        ));
    }

    #[tokio::test]
    async fn gap_fill_patches_recovered_price() {
        let target = date(2024, 6, 28);
        let window = DateWindow::around(target);
        let source = FakePrices::default()
            .with_bulk("NAVX", &[(target, 10.0)])
            .with_retry("FUNDX", &[(date(2024, 6, 27), 9.4), (target, 9.5)]);

        let symbols = [sym("FUNDX"), sym("NAVX")];
        let snapshot = fetch_prices(&source, &symbols, &window).await.unwrap();

        assert_eq!(snapshot.close(&sym("FUNDX")), Some(9.5));
        assert_eq!(snapshot.close(&sym("NAVX")), Some(10.0));
        assert!(snapshot.unresolved.is_empty());
        assert_eq!(source.retried(), vec![sym("FUNDX")]);
    }

    #[tokio::test]
    async fn gap_fill_failure_leaves_symbol_absent() {
        let target = date(2024, 6, 28);
        let window = DateWindow::around(target);
        let source = FakePrices::default()
            .with_bulk("NAVX", &[(target, 10.0)])
            .with_bulk("ADX", &[(target, 20.0)]);

        let symbols = [sym("FUNDX"), sym("NAVX"), sym("ADX")];
        let snapshot = fetch_prices(&source, &symbols, &window).await.unwrap();

        assert_eq!(snapshot.close(&sym("FUNDX")), None);
        assert_eq!(snapshot.close(&sym("ADX")), Some(20.0));
        assert_eq!(snapshot.unresolved, vec![sym("FUNDX")]);
    }

    #[tokio::test]
    async fn gap_fill_ignores_other_dates_in_retry() {
        let target = date(2024, 6, 28);
        let window = DateWindow::around(target);
        let table = PriceTable::new();
        let source = FakePrices::default().with_retry("FUNDX", &[(date(2024, 6, 27), 9.4)]);

        let filled = fill_gaps(&source, &table, &[sym("FUNDX")], target, &window).await;
        assert_eq!(filled.close(target, &sym("FUNDX")), None);
        assert_eq!(filled.close(date(2024, 6, 27), &sym("FUNDX")), None);
    }

    #[tokio::test]
    async fn fallback_date_is_reported() {
        let window = DateWindow::around(date(2024, 6, 29));
        let source = FakePrices::default()
            .with_bulk("FUNDX", &[(date(2024, 6, 28), 9.5)])
            .with_bulk("NAVX", &[(date(2024, 6, 28), 10.0)]);

        let snapshot = fetch_prices(&source, &[sym("FUNDX"), sym("NAVX")], &window).await.unwrap();

        assert_eq!(snapshot.date, date(2024, 6, 28));
        assert_eq!(snapshot.fallback_from, Some(date(2024, 6, 29)));
        assert!(source.retried().is_empty());
    }

    #[tokio::test]
    async fn bulk_failure_is_fatal() {
        let window = DateWindow::around(date(2024, 6, 28));
        let source = FakePrices { fail_bulk: true, ..FakePrices::default() };
        let result = fetch_prices(&source, &[sym("FUNDX"), sym("NAVX")], &window).await;
        assert!(matches!(result, Err(PipelineError::Prices(_))));
    }

    #[tokio::test]
    async fn empty_window_is_fatal() {
        let window = DateWindow::around(date(2024, 12, 25));
        let source = FakePrices::default();
        let result = fetch_prices(&source, &[sym("FUNDX"), sym("NAVX")], &window).await;
        assert!(matches!(result, Err(PipelineError::NoPriceData { .. })));
    }
}

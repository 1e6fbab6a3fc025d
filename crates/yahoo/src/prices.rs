//! Daily close history.

use std::collections::BTreeMap;

use async_trait::async_trait;
use cefnav_primitives::{DailyClose, Date, DateWindow, PriceBatch, Symbol};
use cefnav_traits::{PriceSource, SourceError};
use chrono::{NaiveTime, TimeZone, Utc};
use futures::{StreamExt, stream};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::{YahooSource, client::yahoo_error};

fn midnight_utc(date: Date) -> Result<OffsetDateTime, SourceError> {
    let seconds = date.and_time(NaiveTime::MIN).and_utc().timestamp();
    OffsetDateTime::from_unix_timestamp(seconds)
        .map_err(|e| SourceError::Malformed(format!("date {date} out of range: {e}")))
}

/// Chart request bounds for `window`: midnight UTC of the first day and of
/// the exclusive end.
///
/// # Errors
/// Returns `SourceError::Malformed` if a bound cannot be represented.
pub fn window_bounds(window: &DateWindow) -> Result<(OffsetDateTime, OffsetDateTime), SourceError> {
    Ok((midnight_utc(window.start)?, midnight_utc(window.end)?))
}

/// Convert `(unix timestamp, close)` points to daily closes inside
/// `window`, dropping non-finite closes.
///
/// Bars are dated in exchange time, `gmt_offset` seconds ahead of UTC.
pub fn daily_closes<I>(points: I, gmt_offset: i32, window: &DateWindow) -> Vec<DailyClose>
where
    I: IntoIterator<Item = (i64, f64)>,
{
    let offset = i64::from(gmt_offset);
    points
        .into_iter()
        .filter(|(_, close)| close.is_finite())
        .filter_map(|(ts, close)| {
            let date = Utc.timestamp_opt(ts.checked_add(offset)?, 0).single()?.date_naive();
            window.contains(date).then(|| DailyClose::new(date, close))
        })
        .collect()
}

/// Fold per-symbol results into one batch.
///
/// Symbols that failed are left out. The batch only fails if nothing
/// succeeded and at least one failure was more than a per-symbol miss.
pub(crate) fn collect_batch(
    requested: usize,
    results: Vec<(Symbol, Result<Vec<DailyClose>, SourceError>)>,
) -> Result<PriceBatch, SourceError> {
    let mut series = BTreeMap::new();
    let mut fatal = None;
    for (symbol, result) in results {
        match result {
            Ok(closes) => {
                series.insert(symbol, closes);
            }
            Err(e) if e.is_recoverable() => debug!(%symbol, error = %e, "no history"),
            Err(e) => {
                warn!(%symbol, error = %e, "history request failed");
                fatal.get_or_insert(e);
            }
        }
    }

    if let (true, Some(e)) = (series.is_empty(), fatal) {
        return Err(e);
    }
    if requested == 1 {
        return Ok(PriceBatch::Flat(series.into_values().next().unwrap_or_default()));
    }
    Ok(PriceBatch::Nested(series))
}

impl YahooSource {
    async fn history(
        &self,
        symbol: &Symbol,
        window: &DateWindow,
    ) -> Result<Vec<DailyClose>, SourceError> {
        let (start, end) = window_bounds(window)?;
        debug!(%symbol, start = %window.start, end = %window.end, "fetching chart history");

        let response = self
            .connector
            .get_quote_history(symbol.as_str(), start, end)
            .await
            .map_err(|e| yahoo_error(symbol, e))?;
        let quotes = response.quotes().map_err(|e| yahoo_error(symbol, e))?;
        let gmt_offset = response.metadata().map_err(|e| yahoo_error(symbol, e))?.gmtoffset;

        Ok(daily_closes(quotes.iter().map(|q| (q.timestamp, q.close)), gmt_offset, window))
    }
}

#[async_trait]
impl PriceSource for YahooSource {
    async fn fetch_batch(
        &self,
        symbols: &[Symbol],
        window: &DateWindow,
    ) -> Result<PriceBatch, SourceError> {
        info!(
            symbols = symbols.len(),
            in_flight = self.config.max_concurrent_requests,
            "requesting chart history"
        );
        let results: Vec<_> = stream::iter(symbols.iter().cloned())
            .map(|symbol| async move {
                let result = self.history(&symbol, window).await;
                (symbol, result)
            })
            .buffered(self.config.max_concurrent_requests)
            .collect()
            .await;

        collect_batch(symbols.len(), results)
    }

    async fn fetch_symbol(
        &self,
        symbol: &Symbol,
        window: &DateWindow,
    ) -> Result<Vec<DailyClose>, SourceError> {
        self.history(symbol, window).await
    }
}

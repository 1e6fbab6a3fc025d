//! Daily close prices and the date-indexed price table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Date, DateWindow, Symbol};

/// A single daily closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyClose {
    /// Trading date.
    pub date: Date,
    /// Closing price. May be NaN when the provider reports a gap.
    pub close: f64,
}

impl DailyClose {
    /// Create a new daily close.
    #[must_use]
    pub const fn new(date: Date, close: f64) -> Self {
        Self { date, close }
    }
}

/// Raw response of a bulk price request.
///
/// Providers answer a one-symbol request with a flat series and a
/// multi-symbol request with one series per symbol. Symbols the provider
/// failed on are simply absent from [`PriceBatch::Nested`].
#[derive(Debug, Clone, PartialEq)]
pub enum PriceBatch {
    /// Series for the single requested symbol.
    Flat(Vec<DailyClose>),
    /// Series keyed by symbol.
    Nested(BTreeMap<Symbol, Vec<DailyClose>>),
}

impl PriceBatch {
    /// Whether the batch carries no observations at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Flat(series) => series.is_empty(),
            Self::Nested(map) => map.values().all(Vec::is_empty),
        }
    }
}

/// Closing prices keyed by calendar date, then by symbol.
///
/// Only finite prices are stored; a missing entry means "absent". The
/// table is never patched in place: [`PriceTable::merge`] returns a new
/// table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    rows: BTreeMap<Date, BTreeMap<Symbol, f64>>,
}

impl PriceTable {
    /// Create an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self { rows: BTreeMap::new() }
    }

    /// Build a table from per-symbol series, dropping non-finite closes.
    pub fn from_series<I>(series: I) -> Self
    where
        I: IntoIterator<Item = (Symbol, Vec<DailyClose>)>,
    {
        let mut rows: BTreeMap<Date, BTreeMap<Symbol, f64>> = BTreeMap::new();
        for (symbol, closes) in series {
            for point in closes.into_iter().filter(|p| p.close.is_finite()) {
                rows.entry(point.date).or_default().insert(symbol.clone(), point.close);
            }
        }
        Self { rows }
    }

    /// Number of dates with at least one price.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Dates present in the table, ascending.
    pub fn dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.rows.keys().copied()
    }

    /// Whether any price exists on `date`.
    #[must_use]
    pub fn has_date(&self, date: Date) -> bool {
        self.rows.contains_key(&date)
    }

    /// Close price of `symbol` on `date`.
    #[must_use]
    pub fn close(&self, date: Date, symbol: &Symbol) -> Option<f64> {
        self.rows.get(&date).and_then(|row| row.get(symbol)).copied()
    }

    /// All closes recorded on `date`.
    #[must_use]
    pub fn closes_on(&self, date: Date) -> Option<&BTreeMap<Symbol, f64>> {
        self.rows.get(&date)
    }

    /// Latest date in the table that is on or before the window target and
    /// not before the window start.
    #[must_use]
    pub fn latest_on_or_before(&self, window: &DateWindow) -> Option<Date> {
        self.rows.range(window.start..=window.target).next_back().map(|(date, _)| *date)
    }

    /// Symbols from `symbols` without a price on `date`, in input order.
    #[must_use]
    pub fn missing_on<'a, I>(&self, date: Date, symbols: I) -> Vec<Symbol>
    where
        I: IntoIterator<Item = &'a Symbol>,
    {
        symbols.into_iter().filter(|s| self.close(date, s).is_none()).cloned().collect()
    }

    /// Keep only dates inside `window`.
    #[must_use]
    pub fn within(&self, window: &DateWindow) -> Self {
        let rows = self
            .rows
            .range(window.start..window.end)
            .map(|(date, row)| (*date, row.clone()))
            .collect();
        Self { rows }
    }

    /// New table with every price of `patch` laid over this one.
    #[must_use]
    pub fn merge(&self, patch: &Self) -> Self {
        let mut rows = self.rows.clone();
        for (date, row) in &patch.rows {
            let target = rows.entry(*date).or_default();
            for (symbol, close) in row {
                target.insert(symbol.clone(), *close);
            }
        }
        Self { rows }
    }
}

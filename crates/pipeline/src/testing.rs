//! In-memory collaborators for pipeline tests.

use std::{
    collections::BTreeMap,
    sync::{
        Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use cefnav_primitives::{
    BalanceSheet, DailyClose, Date, DateWindow, FundRecord, PriceBatch, ReportingPeriod, Symbol,
};
use cefnav_traits::{
    FundamentalsSource, PriceSource, ProfileSource, ProgressSink, ReferenceSource, SourceError,
};

pub(crate) fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd_opt(y, m, d).unwrap()
}

pub(crate) fn sym(s: &str) -> Symbol {
    Symbol::new(s)
}

#[derive(Debug, Default)]
pub(crate) struct FakeReference {
    pub(crate) records: Vec<FundRecord>,
}

#[async_trait]
impl ReferenceSource for FakeReference {
    async fn load(&self) -> Result<Vec<FundRecord>, SourceError> {
        Ok(self.records.clone())
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakePrices {
    pub(crate) bulk: BTreeMap<Symbol, Vec<DailyClose>>,
    pub(crate) retry: BTreeMap<Symbol, Vec<DailyClose>>,
    pub(crate) fail_bulk: bool,
    pub(crate) retried: Mutex<Vec<Symbol>>,
}

impl FakePrices {
    pub(crate) fn with_bulk(mut self, symbol: &str, closes: &[(Date, f64)]) -> Self {
        self.bulk
            .insert(sym(symbol), closes.iter().map(|(d, c)| DailyClose::new(*d, *c)).collect());
        self
    }

    pub(crate) fn with_retry(mut self, symbol: &str, closes: &[(Date, f64)]) -> Self {
        self.retry
            .insert(sym(symbol), closes.iter().map(|(d, c)| DailyClose::new(*d, *c)).collect());
        self
    }

    pub(crate) fn retried(&self) -> Vec<Symbol> {
        self.retried.lock().unwrap().clone()
    }
}

#[async_trait]
impl PriceSource for FakePrices {
    async fn fetch_batch(
        &self,
        symbols: &[Symbol],
        _window: &DateWindow,
    ) -> Result<PriceBatch, SourceError> {
        if self.fail_bulk {
            return Err(SourceError::Http("bulk endpoint down".to_string()));
        }
        if let [only] = symbols {
            return Ok(PriceBatch::Flat(self.bulk.get(only).cloned().unwrap_or_default()));
        }
        Ok(PriceBatch::Nested(
            symbols
                .iter()
                .filter_map(|s| self.bulk.get(s).map(|series| (s.clone(), series.clone())))
                .collect(),
        ))
    }

    async fn fetch_symbol(
        &self,
        symbol: &Symbol,
        _window: &DateWindow,
    ) -> Result<Vec<DailyClose>, SourceError> {
        self.retried.lock().unwrap().push(symbol.clone());
        self.retry
            .get(symbol)
            .cloned()
            .ok_or_else(|| SourceError::SymbolNotFound(symbol.to_string()))
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeFundamentals {
    pub(crate) sheets: BTreeMap<Symbol, BalanceSheet>,
    pub(crate) requested: Mutex<Vec<(Symbol, ReportingPeriod)>>,
}

impl FakeFundamentals {
    pub(crate) fn with_item(mut self, symbol: &str, report: Date, item: &str, value: f64) -> Self {
        self.sheets.entry(sym(symbol)).or_default().insert(report, item, value);
        self
    }
}

#[async_trait]
impl FundamentalsSource for FakeFundamentals {
    async fn balance_sheet(
        &self,
        symbol: &Symbol,
        period: ReportingPeriod,
    ) -> Result<BalanceSheet, SourceError> {
        self.requested.lock().unwrap().push((symbol.clone(), period));
        self.sheets.get(symbol).cloned().ok_or_else(|| SourceError::NoData(symbol.to_string()))
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeProfiles {
    pub(crate) names: BTreeMap<Symbol, String>,
    pub(crate) failing: Vec<Symbol>,
}

impl FakeProfiles {
    pub(crate) fn with_name(mut self, symbol: &str, name: &str) -> Self {
        self.names.insert(sym(symbol), name.to_string());
        self
    }
}

#[async_trait]
impl ProfileSource for FakeProfiles {
    async fn display_name(&self, symbol: &Symbol) -> Result<Option<String>, SourceError> {
        if self.failing.contains(symbol) {
            return Err(SourceError::Http("profile lookup failed".to_string()));
        }
        Ok(self.names.get(symbol).cloned())
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingProgress {
    pub(crate) steps: Mutex<Vec<(usize, usize, Symbol)>>,
    pub(crate) finished: AtomicBool,
}

impl RecordingProgress {
    pub(crate) fn steps(&self) -> Vec<(usize, usize, Symbol)> {
        self.steps.lock().unwrap().clone()
    }

    pub(crate) fn finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }
}

impl ProgressSink for RecordingProgress {
    fn advance(&self, done: usize, total: usize, symbol: &Symbol) {
        self.steps.lock().unwrap().push((done, total, symbol.clone()));
    }

    fn finish(&self) {
        self.finished.store(true, Ordering::SeqCst);
    }
}

//! Progress observation.

use cefnav_primitives::Symbol;

/// Observer notified once per assembled report row.
pub trait ProgressSink: Send + Sync {
    /// Row for `symbol` finished; `done` of `total` rows are complete.
    fn advance(&self, done: usize, total: usize, symbol: &Symbol);

    /// All rows are complete.
    fn finish(&self) {}
}

/// Sink that ignores progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn advance(&self, _done: usize, _total: usize, _symbol: &Symbol) {}
}

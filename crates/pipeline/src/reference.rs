//! Reference-sheet cache.

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use cefnav_primitives::FundRecord;
use cefnav_traits::{ReferenceSource, SourceError};
use tracing::{debug, info};

#[derive(Debug, Clone)]
struct Cached {
    records: Arc<Vec<FundRecord>>,
    loaded_at: Instant,
}

/// Load-once cache in front of a [`ReferenceSource`].
///
/// The sheet is kept until it is older than the TTL or until
/// [`ReferenceCache::invalidate`] is called. Failed loads are not cached.
pub struct ReferenceCache {
    source: Arc<dyn ReferenceSource>,
    ttl: Option<Duration>,
    entry: Mutex<Option<Cached>>,
}

impl fmt::Debug for ReferenceCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceCache")
            .field("ttl", &self.ttl)
            .field("loaded_at", &self.loaded_at())
            .finish_non_exhaustive()
    }
}

impl ReferenceCache {
    /// Create a cache; `ttl` of `None` keeps the sheet until invalidated.
    #[must_use]
    pub fn new(source: Arc<dyn ReferenceSource>, ttl: Option<Duration>) -> Self {
        Self { source, ttl, entry: Mutex::new(None) }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Cached>> {
        self.entry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_fresh(&self, cached: &Cached) -> bool {
        self.ttl.is_none_or(|ttl| cached.loaded_at.elapsed() < ttl)
    }

    /// Cached reference rows, loading them if absent or expired.
    ///
    /// # Errors
    /// Returns `SourceError` if a load is needed and fails.
    pub async fn get(&self) -> Result<Arc<Vec<FundRecord>>, SourceError> {
        let cached =
            self.lock().as_ref().filter(|c| self.is_fresh(c)).map(|c| Arc::clone(&c.records));
        if let Some(records) = cached {
            debug!(rows = records.len(), "reference sheet served from cache");
            return Ok(records);
        }

        let records = Arc::new(self.source.load().await?);
        info!(rows = records.len(), "reference sheet loaded");
        *self.lock() = Some(Cached { records: Arc::clone(&records), loaded_at: Instant::now() });
        Ok(records)
    }

    /// Drop the cached sheet so the next [`ReferenceCache::get`] reloads it.
    pub fn invalidate(&self) {
        if self.lock().take().is_some() {
            debug!("reference cache invalidated");
        }
    }

    /// When the cached sheet was loaded, if one is cached.
    #[must_use]
    pub fn loaded_at(&self) -> Option<Instant> {
        self.lock().as_ref().map(|c| c.loaded_at)
    }

    /// Configured time-to-live.
    #[must_use]
    pub const fn ttl(&self) -> Option<Duration> {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;

    #[derive(Default)]
    struct CountingSource {
        loads: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl ReferenceSource for CountingSource {
        async fn load(&self) -> Result<Vec<FundRecord>, SourceError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SourceError::Http("unreachable".to_string()));
            }
            Ok(vec![FundRecord::new("PDI", "XPDIX")])
        }
    }

    #[tokio::test]
    async fn loads_once_while_fresh() {
        let source = Arc::new(CountingSource::default());
        let cache = ReferenceCache::new(source.clone(), None);

        assert!(cache.loaded_at().is_none());
        let first = cache.get().await.unwrap();
        let second = cache.get().await.unwrap();

        assert_eq!(first.len(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.loads.load(Ordering::SeqCst), 1);
        assert!(cache.loaded_at().is_some());
    }

    #[tokio::test]
    async fn invalidate_forces_reload() {
        let source = Arc::new(CountingSource::default());
        let cache = ReferenceCache::new(source.clone(), None);

        cache.get().await.unwrap();
        cache.invalidate();
        assert!(cache.loaded_at().is_none());
        cache.get().await.unwrap();

        assert_eq!(source.loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn expired_entry_is_reloaded() {
        let source = Arc::new(CountingSource::default());
        let cache = ReferenceCache::new(source.clone(), Some(Duration::ZERO));

        cache.get().await.unwrap();
        cache.get().await.unwrap();

        assert_eq!(source.loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let source = Arc::new(CountingSource { fail: true, ..CountingSource::default() });
        let cache = ReferenceCache::new(source.clone(), None);

        assert!(cache.get().await.is_err());
        assert!(cache.get().await.is_err());
        assert!(cache.loaded_at().is_none());
        assert_eq!(source.loads.load(Ordering::SeqCst), 2);
    }
}

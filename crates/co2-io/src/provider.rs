//! Memoized dataset loading.
//!
//! A [`DatasetProvider`] fetches and parses the dataset on the first [`load`]
//! and hands out the same `Arc<Table>` afterwards. The cache may be given a
//! window after which the next load fetches again; without one it lives for the
//! lifetime of the provider.
//!
//! The provider is an ordinary value so front ends can pass it to whatever needs
//! the table. [`load_dataset`] wraps one process-wide instance pointed at the
//! public OWID URL.
//!
//! [`load`]: DatasetProvider::load

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use co2_core::{Co2Result, Table};
use once_cell::sync::Lazy;
use tracing::{debug, info};

use crate::csv_parser::parse_table;
use crate::source::{CsvSource, HttpSource};

struct CachedTable {
    table: Arc<Table>,
    loaded_at: Instant,
}

/// Lock-guarded, lazily filled dataset cache over a [`CsvSource`].
pub struct DatasetProvider<S> {
    source: S,
    cache_window: Option<Duration>,
    cached: Mutex<Option<CachedTable>>,
}

impl<S: CsvSource> DatasetProvider<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache_window: None,
            cached: Mutex::new(None),
        }
    }

    /// Refetch once a cached table is older than `window`.
    pub fn with_cache_window(mut self, window: Duration) -> Self {
        self.cache_window = Some(window);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache_window(&self) -> Option<Duration> {
        self.cache_window
    }

    /// Return the cached table, fetching and parsing it first if needed.
    ///
    /// The lock is held across the fetch, so concurrent first callers share a
    /// single request. A failed load leaves the cache as it was.
    pub fn load(&self) -> Co2Result<Arc<Table>> {
        let mut cached = self.lock();
        if let Some(entry) = cached.as_ref() {
            if self.is_fresh(entry) {
                debug!("dataset cache hit");
                return Ok(Arc::clone(&entry.table));
            }
            info!("dataset cache window elapsed; refetching");
        }

        let origin = self.source.describe();
        info!(source = %origin, "loading CO2 dataset");
        let started = Instant::now();
        let text = self.source.fetch()?;
        let table = Arc::new(parse_table(&text)?);
        info!(
            source = %origin,
            rows = table.len(),
            columns = table.columns().len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "dataset loaded"
        );

        *cached = Some(CachedTable {
            table: Arc::clone(&table),
            loaded_at: Instant::now(),
        });
        Ok(table)
    }

    /// Drop the cached table; the next [`load`](Self::load) fetches again.
    pub fn invalidate(&self) {
        *self.lock() = None;
    }

    /// True while a table is cached and inside its window.
    pub fn is_loaded(&self) -> bool {
        self.lock()
            .as_ref()
            .map(|entry| self.is_fresh(entry))
            .unwrap_or(false)
    }

    fn is_fresh(&self, entry: &CachedTable) -> bool {
        match self.cache_window {
            None => true,
            Some(window) => entry.loaded_at.elapsed() < window,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<CachedTable>> {
        // the cache is only ever replaced whole, so a poisoned guard is still consistent
        self.cached.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

static DEFAULT_PROVIDER: Lazy<DatasetProvider<HttpSource>> =
    Lazy::new(|| DatasetProvider::new(HttpSource::default()));

/// Process-wide provider for the public OWID dataset.
pub fn default_provider() -> &'static DatasetProvider<HttpSource> {
    &DEFAULT_PROVIDER
}

/// Load the OWID CO2 dataset, fetching it at most once per process.
pub fn load_dataset() -> Co2Result<Arc<Table>> {
    DEFAULT_PROVIDER.load()
}

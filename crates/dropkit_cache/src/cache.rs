//! TTL cache for reference data feeding dropdown option lists
//!
//! Lookups go memory, then session storage, then the caller's fetch
//! function. Concurrent lookups for the same key share one fetch: the first
//! caller installs an in-flight cell and everyone else awaits it. Failed
//! fetches are never cached, so the next lookup retries.
//!
//! Expiry is measured with the injected [`Clock`](dropkit_core::Clock) so
//! tests can move time by hand.

use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dropkit_core::{SharedClock, SystemClock};
use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tokio::task::JoinSet;

use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::storage::SessionStorage;

type InFlight<T> = Arc<OnceCell<Result<Arc<T>>>>;

struct Cached<T> {
    value: Arc<T>,
    fetched_at_ms: u64,
}

impl<T> Clone for Cached<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            fetched_at_ms: self.fetched_at_ms,
        }
    }
}

struct Entry<T> {
    data: Option<Cached<T>>,
    in_flight: Option<InFlight<T>>,
}

impl<T> Default for Entry<T> {
    fn default() -> Self {
        Self {
            data: None,
            in_flight: None,
        }
    }
}

/// Serialized form written to session storage
#[derive(Serialize, Deserialize)]
struct StoredEntry<D> {
    data: D,
    fetched_at: u64,
}

/// Outcome of [`ReferenceCache::preload`]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PreloadReport {
    /// Keys that are now cached, sorted
    pub loaded: Vec<String>,
    /// Keys whose fetch failed, sorted by key
    pub failed: Vec<(String, CacheError)>,
}

impl PreloadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Cache of reference data keyed by string
pub struct ReferenceCache<T> {
    config: CacheConfig,
    clock: SharedClock,
    storage: Option<Arc<dyn SessionStorage>>,
    entries: Mutex<FxHashMap<String, Entry<T>>>,
}

impl<T> std::fmt::Debug for ReferenceCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferenceCache")
            .field("config", &self.config)
            .field("has_storage", &self.storage.is_some())
            .field("entries", &self.lock_entries().len())
            .finish()
    }
}

impl<T> ReferenceCache<T> {
    fn lock_entries(&self) -> MutexGuard<'_, FxHashMap<String, Entry<T>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> ReferenceCache<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    /// Create a memory-only cache on the system clock
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            clock: SystemClock::shared(),
            storage: None,
            entries: Mutex::new(FxHashMap::default()),
        }
    }

    /// Write fresh entries through to `storage` and hydrate from it
    pub fn with_storage(mut self, storage: Arc<dyn SessionStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Measure expiry with `clock`
    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    fn is_fresh(&self, fetched_at_ms: u64, now_ms: u64) -> bool {
        now_ms.saturating_sub(fetched_at_ms) < self.config.ttl_ms
    }

    /// Return the cached value for `key`, fetching it if missing or expired.
    ///
    /// When another lookup for the same key is already fetching, this waits
    /// for that result instead of calling `fetch`.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetch: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: Display,
    {
        let cell = {
            let mut entries = self.lock_entries();
            let now = self.clock.now_ms();
            let entry = entries.entry(key.to_string()).or_default();

            let hit = entry
                .data
                .as_ref()
                .filter(|cached| self.is_fresh(cached.fetched_at_ms, now))
                .map(|cached| Arc::clone(&cached.value));
            if let Some(value) = hit {
                tracing::trace!(key, "reference cache hit");
                return Ok(value);
            }
            if entry.data.take().is_some() {
                tracing::debug!(key, "reference cache entry expired");
            }

            if let Some(cached) = self.read_storage(key, now) {
                tracing::debug!(key, "reference cache hydrated from session storage");
                let value = Arc::clone(&cached.value);
                entry.data = Some(cached);
                return Ok(value);
            }

            Arc::clone(
                entry
                    .in_flight
                    .get_or_insert_with(|| Arc::new(OnceCell::new())),
            )
        };

        let result = cell
            .get_or_init(move || async move {
                tracing::debug!(key, "fetching reference data");
                match fetch().await {
                    Ok(value) => Ok(Arc::new(value)),
                    Err(err) => {
                        tracing::warn!(key, error = %err, "reference data fetch failed");
                        Err(CacheError::Fetch {
                            key: key.to_string(),
                            message: err.to_string(),
                        })
                    }
                }
            })
            .await
            .clone();

        let stored = {
            let mut entries = self.lock_entries();
            let entry = entries.entry(key.to_string()).or_default();
            let owns_cell = entry
                .in_flight
                .as_ref()
                .is_some_and(|current| Arc::ptr_eq(current, &cell));
            if !owns_cell {
                None
            } else {
                entry.in_flight = None;
                match &result {
                    Ok(value) => {
                        let fetched_at_ms = self.clock.now_ms();
                        entry.data = Some(Cached {
                            value: Arc::clone(value),
                            fetched_at_ms,
                        });
                        Some((Arc::clone(value), fetched_at_ms))
                    }
                    Err(_) => None,
                }
            }
        };

        if let Some((value, fetched_at_ms)) = stored {
            self.write_storage(key, &value, fetched_at_ms);
        }

        result
    }

    /// Return the fresh cached value for `key` without fetching
    pub fn peek(&self, key: &str) -> Option<Arc<T>> {
        let mut entries = self.lock_entries();
        let now = self.clock.now_ms();

        if let Some(cached) = entries.get(key).and_then(|e| e.data.as_ref()) {
            if self.is_fresh(cached.fetched_at_ms, now) {
                return Some(Arc::clone(&cached.value));
            }
        }

        let cached = self.read_storage(key, now)?;
        let value = Arc::clone(&cached.value);
        entries.entry(key.to_string()).or_default().data = Some(cached);
        Some(value)
    }

    /// Drop `key` from memory and session storage
    pub fn invalidate(&self, key: &str) {
        if let Some(entry) = self.lock_entries().get_mut(key) {
            entry.data = None;
        }
        if let Some(storage) = &self.storage {
            storage.remove_item(&self.config.storage_key(key));
        }
        tracing::debug!(key, "reference cache entry invalidated");
    }

    /// Drop every entry, including everything this cache's prefix owns in
    /// session storage
    pub fn clear(&self) {
        self.lock_entries().retain(|_, entry| {
            entry.data = None;
            entry.in_flight.is_some()
        });
        if let Some(storage) = &self.storage {
            for item in storage.keys() {
                if item.starts_with(&self.config.storage_prefix) {
                    storage.remove_item(&item);
                }
            }
        }
        tracing::debug!("reference cache cleared");
    }

    /// Fetch every key concurrently, skipping keys that are already fresh
    pub async fn preload<I, S, F, Fut, E>(self: &Arc<Self>, keys: I, fetch: F) -> PreloadReport
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let fetch = Arc::new(fetch);
        let mut tasks = JoinSet::new();

        for key in keys {
            let key: String = key.into();
            let cache = Arc::clone(self);
            let fetch = Arc::clone(&fetch);
            tasks.spawn(async move {
                let owned = key.clone();
                let result = cache.get_or_fetch(&key, move || (*fetch)(owned)).await;
                (key, result)
            });
        }

        let mut report = PreloadReport::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((key, Ok(_))) => report.loaded.push(key),
                Ok((key, Err(err))) => report.failed.push((key, err)),
                Err(err) => tracing::warn!(error = %err, "preload task did not complete"),
            }
        }
        report.loaded.sort();
        report.failed.sort_by(|a, b| a.0.cmp(&b.0));

        tracing::debug!(
            loaded = report.loaded.len(),
            failed = report.failed.len(),
            "reference data preloaded"
        );
        report
    }

    fn read_storage(&self, key: &str, now_ms: u64) -> Option<Cached<T>> {
        let storage = self.storage.as_ref()?;
        let storage_key = self.config.storage_key(key);
        let raw = storage.get_item(&storage_key)?;

        let stored: StoredEntry<T> = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(err) => {
                tracing::warn!(key, error = %err, "discarding unreadable session entry");
                storage.remove_item(&storage_key);
                return None;
            }
        };

        if !self.is_fresh(stored.fetched_at, now_ms) {
            storage.remove_item(&storage_key);
            return None;
        }

        Some(Cached {
            value: Arc::new(stored.data),
            fetched_at_ms: stored.fetched_at,
        })
    }

    fn write_storage(&self, key: &str, value: &T, fetched_at_ms: u64) {
        let Some(storage) = &self.storage else {
            return;
        };
        let stored = StoredEntry {
            data: value,
            fetched_at: fetched_at_ms,
        };
        match serde_json::to_string(&stored) {
            Ok(json) => storage.set_item(&self.config.storage_key(key), json),
            Err(err) => {
                tracing::warn!(key, error = %err, "failed to serialize reference data")
            }
        }
    }
}

//! Key-addressed client-side cache for query results.
//!
//! `QueryCache` is the handle every binding shares. It is passed explicitly
//! (usually as `Arc<QueryCache>`) rather than living in a global. Values of
//! any `Clone + Send + Sync` type are stored per `QueryKey`; staleness is
//! tracked per entry so it can be flipped without knowing the value type.
//!
//! Writes to a key are last-write-wins. Concurrent reads of the same missing
//! key each issue their own fetch.
//!
//! Entries older than the cache time are dropped by `collect_garbage`, which
//! every successful `fetch` runs before storing its result.

mod config;
mod entry;
mod keys;

use std::any::Any;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;

use crate::error::ApiError;

pub use self::config::QueryConfig;
pub use entry::CacheEntry;
pub use keys::QueryKey;

type Slot = CacheEntry<Arc<dyn Any + Send + Sync>>;

const EVENT_CAPACITY: usize = 64;

/// Freshness of a cached entry as seen by the next reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Fresh,
    Stale,
}

/// Change notifications for observers that mirror cache entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheEvent {
    Updated(QueryKey),
    Invalidated(QueryKey),
    Removed(QueryKey),
}

impl CacheEvent {
    pub fn key(&self) -> QueryKey {
        match self {
            CacheEvent::Updated(key) | CacheEvent::Invalidated(key) | CacheEvent::Removed(key) => *key,
        }
    }
}

#[derive(Debug)]
pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, Slot>>,
    events: broadcast::Sender<CacheEvent>,
    config: QueryConfig,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self::with_config(QueryConfig::default())
    }

    pub fn with_config(config: QueryConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            entries: Mutex::new(HashMap::new()),
            events,
            config,
        }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.events.subscribe()
    }

    /// Returns the cached value regardless of staleness.
    pub fn get<V: Clone + 'static>(&self, key: &QueryKey) -> Option<V> {
        let entries = self.entries.lock();
        entries
            .get(key)
            .and_then(|entry| entry.data.downcast_ref::<V>().cloned())
    }

    pub fn status(&self, key: &QueryKey) -> Option<EntryStatus> {
        let entries = self.entries.lock();
        entries.get(key).map(|entry| {
            if entry.is_stale(self.config.stale_time) {
                EntryStatus::Stale
            } else {
                EntryStatus::Fresh
            }
        })
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn keys(&self) -> Vec<QueryKey> {
        self.entries.lock().keys().copied().collect()
    }

    /// Stores `value` as a fresh entry, replacing whatever was there.
    pub fn set<V: Send + Sync + 'static>(&self, key: QueryKey, value: V) {
        let data: Arc<dyn Any + Send + Sync> = Arc::new(value);
        {
            let mut entries = self.entries.lock();
            match entries.entry(key) {
                Entry::Occupied(mut slot) => slot.get_mut().refresh(data),
                Entry::Vacant(slot) => {
                    slot.insert(CacheEntry::new(data));
                }
            }
        }
        self.notify(CacheEvent::Updated(key));
    }

    /// Rewrites an existing entry's value in place. The entry keeps its age
    /// and any invalidation, so a patched stale entry is still refetched by
    /// its next reader. Returns `false`, changing nothing, when the key is
    /// absent or holds another type.
    pub fn update<V, F>(&self, key: &QueryKey, f: F) -> bool
    where
        V: Send + Sync + 'static,
        F: FnOnce(&V) -> V,
    {
        {
            let mut entries = self.entries.lock();
            let Some(entry) = entries.get_mut(key) else {
                return false;
            };
            let Some(current) = entry.data.downcast_ref::<V>() else {
                return false;
            };
            let next = f(current);
            entry.patch(Arc::new(next));
        }
        self.notify(CacheEvent::Updated(*key));
        true
    }

    /// Marks an entry stale so its next reader refetches.
    pub fn invalidate(&self, key: &QueryKey) -> bool {
        let found = match self.entries.lock().get_mut(key) {
            Some(entry) => {
                entry.invalidate();
                true
            }
            None => false,
        };
        if found {
            self.notify(CacheEvent::Invalidated(*key));
        }
        found
    }

    /// Marks every entry whose key matches `predicate` stale.
    pub fn invalidate_where<P>(&self, predicate: P) -> usize
    where
        P: Fn(&QueryKey) -> bool,
    {
        let invalidated: Vec<QueryKey> = {
            let mut entries = self.entries.lock();
            entries
                .iter_mut()
                .filter(|(key, _)| predicate(*key))
                .map(|(key, entry)| {
                    entry.invalidate();
                    *key
                })
                .collect()
        };
        for key in &invalidated {
            self.notify(CacheEvent::Invalidated(*key));
        }
        invalidated.len()
    }

    pub fn remove(&self, key: &QueryKey) -> bool {
        let removed = self.entries.lock().remove(key).is_some();
        if removed {
            self.notify(CacheEvent::Removed(*key));
        }
        removed
    }

    /// Drops entries older than the configured cache time. Runs after every
    /// successful fetch; callers may also run it on their own schedule.
    pub fn collect_garbage(&self) -> usize {
        let cache_time = self.config.cache_time;
        let expired: Vec<QueryKey> = {
            let mut entries = self.entries.lock();
            let expired: Vec<QueryKey> = entries
                .iter()
                .filter(|(_, entry)| entry.is_expired(cache_time))
                .map(|(key, _)| *key)
                .collect();
            for key in &expired {
                entries.remove(key);
            }
            expired
        };
        for key in &expired {
            self.notify(CacheEvent::Removed(*key));
        }
        if !expired.is_empty() {
            tracing::debug!(count = expired.len(), "collected expired cache entries");
        }
        expired.len()
    }

    /// Serves `key` from the cache while fresh; otherwise runs `fetcher`
    /// and stores its result. A failed fetch leaves the cache as it was.
    pub async fn fetch<V, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<V, ApiError>
    where
        V: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, ApiError>>,
    {
        if let Some(data) = self.fresh::<V>(&key) {
            tracing::debug!(%key, "cache hit");
            return Ok(data);
        }

        tracing::debug!(%key, "cache miss, fetching");
        match fetcher().await {
            Ok(data) => {
                self.collect_garbage();
                self.set(key, data.clone());
                Ok(data)
            }
            Err(err) => {
                tracing::warn!(%key, error = %err, "query failed");
                Err(err)
            }
        }
    }

    fn fresh<V: Clone + 'static>(&self, key: &QueryKey) -> Option<V> {
        let entries = self.entries.lock();
        let entry = entries.get(key)?;
        if entry.is_stale(self.config.stale_time) {
            return None;
        }
        entry.data.downcast_ref::<V>().cloned()
    }

    fn notify(&self, event: CacheEvent) {
        // No receivers is the common case outside of UI observers.
        let _ = self.events.send(event);
    }
}

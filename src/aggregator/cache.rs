//! Time-boxed enrichment cache.
//!
//! Maps a resolved handle to a fetched value plus its fetch time, with a
//! fixed staleness window. Owned by the calling layer, never by the pure
//! pipeline functions. The clock is injectable so expiry is testable.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;

/// Time source abstraction.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A cached value and when it was fetched.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub value: T,
    pub fetched_at: DateTime<Utc>,
}

/// Handle-keyed cache with a fixed TTL. Stale entries are evicted on read.
pub struct EnrichmentCache<T> {
    entries: HashMap<String, CacheEntry<T>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<T: Clone> EnrichmentCache<T> {
    pub fn new(ttl_seconds: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            ttl: Duration::seconds(ttl_seconds as i64),
            clock,
        }
    }

    /// Fetch a fresh value for a handle; evicts and misses when the entry
    /// has outlived the staleness window.
    pub fn get(&mut self, handle: &str) -> Option<T> {
        let now = self.clock.now();
        match self.entries.get(handle) {
            Some(entry) if now - entry.fetched_at <= self.ttl => Some(entry.value.clone()),
            Some(_) => {
                self.entries.remove(handle);
                None
            }
            None => None,
        }
    }

    /// Store a value for a handle, stamped with the current time.
    pub fn insert(&mut self, handle: &str, value: T) {
        self.entries.insert(
            handle.to_string(),
            CacheEntry {
                value,
                fetched_at: self.clock.now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

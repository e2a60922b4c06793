//! Cache Store Module
//!
//! The lookup/fill/expire engine: serves live entries, fills misses through
//! the retrieval callback, and drops stale entries lazily or during sweeps.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::cache::{CacheEntry, CacheOptions, CacheStats, RetrieveFn};
use crate::clock::{Clock, SystemClock};
use crate::error::{CacheError, Result};

// == Fetched ==
/// A value returned by [`Cache::fetch`] along with how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched<V> {
    /// The cached or freshly retrieved value
    pub value: V,
    /// `true` when served from a live entry without calling retrieve
    pub cache_hit: bool,
}

// == Cache ==
/// Memoizing cache with per-key TTL.
///
/// One instance is meant to be built at process startup and reused by every
/// invocation. Each retrieval decides its own TTL. Expired entries are
/// removed either when looked up or by a sweep that piggybacks on `get`
/// once the cleanup interval has passed.
pub struct Cache<V, E> {
    pub(super) entries: HashMap<String, CacheEntry<V>>,
    pub(super) last_cleanup: DateTime<Utc>,
    pub(super) cleanup_period: Option<Duration>,
    pub(super) debug_logging: bool,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) stats: CacheStats,
    retrieve: RetrieveFn<V, E>,
}

impl<V, E> Cache<V, E> {
    // == Constructor ==
    /// Builds a cache from `options`.
    ///
    /// Fails with [`CacheError::MissingRetrieve`] when no retrieval callback
    /// was set. Callers should treat that as a fatal misconfiguration.
    pub fn new(options: CacheOptions<V, E>) -> Result<Self> {
        let retrieve = options.retrieve.ok_or(CacheError::MissingRetrieve)?;
        let clock = options
            .clock
            .unwrap_or_else(|| Arc::new(SystemClock) as Arc<dyn Clock>);

        Ok(Self {
            entries: HashMap::new(),
            last_cleanup: DateTime::<Utc>::UNIX_EPOCH,
            cleanup_period: options.cleanup_interval.period(),
            debug_logging: options.debug_logging,
            clock,
            stats: CacheStats::new(),
            retrieve,
        })
    }

    // == Length ==
    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }
}

impl<V: Clone, E> Cache<V, E> {
    // == Get ==
    /// Returns the value for `key`, retrieving it on a miss.
    ///
    /// Retrieval errors are returned unchanged and nothing is cached for them.
    pub fn get(&mut self, key: &str) -> std::result::Result<V, E> {
        self.fetch(key).map(|fetched| fetched.value)
    }

    // == Fetch ==
    /// Like [`Cache::get`], but also reports whether the value was a hit.
    ///
    /// The clock is read separately for the cleanup check, the aliveness
    /// check and the new deadline, so a slow retrieval pushes the deadline
    /// of the stored entry later.
    pub fn fetch(&mut self, key: &str) -> std::result::Result<Fetched<V>, E> {
        let begin = self.clock.now();
        self.cleanup_if_due(begin);

        if let Some(entry) = self.entries.get(key) {
            if entry.is_alive(self.clock.now()) {
                let value = entry.value.clone();
                self.stats.record_hit();
                return Ok(Fetched {
                    value,
                    cache_hit: true,
                });
            }
            self.entries.remove(key);
            self.stats.record_lazy_expiration();
        }

        self.stats.record_miss();
        let (value, ttl) = match (self.retrieve)(key) {
            Ok(retrieved) => retrieved,
            Err(err) => {
                self.stats.record_retrieve_error();
                self.stats.set_total_entries(self.entries.len());
                return Err(err);
            }
        };

        let entry = CacheEntry::new(value.clone(), self.clock.now(), ttl);
        self.entries.insert(key.to_string(), entry);
        self.stats.set_total_entries(self.entries.len());

        Ok(Fetched {
            value,
            cache_hit: false,
        })
    }
}

impl<V, E> fmt::Debug for Cache<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("entries", &self.entries.len())
            .field("last_cleanup", &self.last_cleanup)
            .field("cleanup_period", &self.cleanup_period)
            .field("debug_logging", &self.debug_logging)
            .finish_non_exhaustive()
    }
}

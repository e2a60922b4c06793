//! Cache Statistics Module
//!
//! Tracks lookup outcomes and cleanup activity.

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Lookups served from a live entry
    pub hits: u64,
    /// Lookups that invoked the retrieval callback
    pub misses: u64,
    /// Misses whose retrieval returned an error
    pub retrieve_errors: u64,
    /// Stale entries removed by a direct lookup
    pub lazy_expirations: u64,
    /// Cleanup sweeps performed
    pub cleanup_runs: u64,
    /// Entries removed by cleanup sweeps
    pub cleaned_entries: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Instant of the most recent sweep, if any
    pub last_cleanup_at: Option<DateTime<Utc>>,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_retrieve_error(&mut self) {
        self.retrieve_errors += 1;
    }

    pub fn record_lazy_expiration(&mut self) {
        self.lazy_expirations += 1;
    }

    // == Record Cleanup ==
    /// Accounts for one sweep that ran at `at` and removed `deleted` entries.
    pub fn record_cleanup(&mut self, at: DateTime<Utc>, deleted: usize) {
        self.cleanup_runs += 1;
        self.cleaned_entries += deleted as u64;
        self.last_cleanup_at = Some(at);
    }

    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.cleanup_runs, 0);
        assert!(stats.last_cleanup_at.is_none());
    }

    #[test]
    fn test_hit_rate_no_requests() {
        assert_eq!(CacheStats::new().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_record_cleanup() {
        let mut stats = CacheStats::new();
        let at = DateTime::<Utc>::UNIX_EPOCH;
        stats.record_cleanup(at, 3);
        stats.record_cleanup(at, 0);

        assert_eq!(stats.cleanup_runs, 2);
        assert_eq!(stats.cleaned_entries, 3);
        assert_eq!(stats.last_cleanup_at, Some(at));
    }

    #[test]
    fn test_stats_serialize() {
        let mut stats = CacheStats::new();
        stats.record_miss();
        stats.set_total_entries(1);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["misses"], 1);
        assert_eq!(json["total_entries"], 1);
        assert!(json["last_cleanup_at"].is_null());
    }
}

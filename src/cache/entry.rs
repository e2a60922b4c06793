//! Cache Entry Module
//!
//! Defines a cached value together with its expiration deadline.

use std::time::Duration;

use chrono::{DateTime, Utc};

// == Cache Entry ==
/// A materialized value and the instant after which it is stale.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Absolute expiration instant
    pub deadline: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry that lives for `ttl` starting at `now`.
    ///
    /// A TTL too large to represent pins the deadline to the end of time.
    pub fn new(value: V, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            value,
            deadline: deadline_after(now, ttl),
        }
    }

    // == Is Alive ==
    /// Returns `true` while `deadline > now`.
    ///
    /// Boundary condition: an entry whose deadline equals `now` is stale.
    pub fn is_alive(&self, now: DateTime<Utc>) -> bool {
        self.deadline > now
    }
}

// == Utility Functions ==
/// Computes `now + ttl`, saturating at the maximum representable instant.
pub fn deadline_after(now: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(ttl)
        .ok()
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_entry_deadline() {
        let entry = CacheEntry::new("v", start(), Duration::from_secs(2));
        assert_eq!(entry.deadline, start() + chrono::Duration::seconds(2));
    }

    #[test]
    fn test_entry_alive_before_deadline() {
        let entry = CacheEntry::new("v", start(), Duration::from_secs(2));
        assert!(entry.is_alive(start()));
        assert!(entry.is_alive(start() + chrono::Duration::milliseconds(1999)));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new("v", start(), Duration::from_secs(2));
        assert!(
            !entry.is_alive(entry.deadline),
            "Entry should be stale at its deadline"
        );
    }

    #[test]
    fn test_zero_ttl_is_immediately_stale() {
        let entry = CacheEntry::new(1, start(), Duration::ZERO);
        assert!(!entry.is_alive(start()));
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let entry = CacheEntry::new(1, start(), Duration::MAX);
        assert_eq!(entry.deadline, DateTime::<Utc>::MAX_UTC);
        assert!(entry.is_alive(start()));
    }
}

//! Clock Module
//!
//! Pluggable time source used by the cache for every time read.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::cache::deadline_after;

// == Clock Trait ==
/// Time source consulted by the cache engine.
///
/// Swap in a [`ManualClock`] to drive expiry and cleanup deterministically.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the time elapsed since `earlier`.
    ///
    /// Saturates at zero when `earlier` is ahead of [`Clock::now`].
    fn since(&self, earlier: DateTime<Utc>) -> Duration {
        (self.now() - earlier).to_std().unwrap_or(Duration::ZERO)
    }
}

// == System Clock ==
/// Wall-clock time source. This is the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// == Manual Clock ==
/// Clock that only moves when told to.
///
/// Clones share the same instant, so a test can keep one handle while the
/// cache owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    /// Creates a clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Moves the clock to `now`, forwards or backwards.
    pub fn set_now(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    /// Moves the clock forward by `step`, stopping at the latest
    /// representable instant.
    pub fn advance(&self, step: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now = deadline_after(*now, step);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
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
    fn test_manual_clock_is_frozen() {
        let clock = ManualClock::new(start());
        assert_eq!(clock.now(), start());
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.since(start()), Duration::ZERO);
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new(start());
        clock.advance(Duration::from_secs(3));

        assert_eq!(clock.since(start()), Duration::from_secs(3));
    }

    #[test]
    fn test_manual_clock_advance_saturates() {
        let clock = ManualClock::new(start());
        clock.advance(Duration::MAX);
        assert_eq!(clock.now(), DateTime::<Utc>::MAX_UTC);

        clock.advance(Duration::from_secs(1));
        assert_eq!(clock.now(), DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new(start());
        let handle = clock.clone();

        handle.set_now(start() + chrono::Duration::seconds(10));
        assert_eq!(clock.since(start()), Duration::from_secs(10));
    }

    #[test]
    fn test_since_saturates_for_future_instant() {
        let clock = ManualClock::new(start());
        let later = start() + chrono::Duration::seconds(5);

        assert_eq!(clock.since(later), Duration::ZERO);
    }

    #[test]
    fn test_since_epoch_is_large() {
        let clock = ManualClock::new(start());
        assert!(clock.since(DateTime::<Utc>::UNIX_EPOCH) > Duration::from_secs(60 * 60 * 24 * 365));
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock;
        let before = clock.now();
        assert!(clock.now() >= before);
    }
}

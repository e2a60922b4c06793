//! Cache Options Module
//!
//! Builder-style settings consumed by [`Cache::new`](crate::cache::Cache::new).

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::clock::Clock;
use crate::config::Config;

/// Retrieval callback: produces the value for a missing key and how long it
/// may be served from the cache.
pub type RetrieveFn<V, E> = Box<dyn FnMut(&str) -> Result<(V, Duration), E> + Send>;

// == Cleanup Interval ==
/// How often the opportunistic cleanup sweep may run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CleanupInterval {
    /// Sweep every [`CleanupInterval::DEFAULT_PERIOD`]
    #[default]
    Default,
    /// Sweep when more than this much time passed since the previous sweep
    Every(Duration),
    /// Never sweep; stale entries are only dropped when looked up
    Disabled,
}

impl CleanupInterval {
    pub const DEFAULT_PERIOD: Duration = Duration::from_secs(5 * 60);

    /// Interprets a signed millisecond count: zero selects the default,
    /// negative disables cleanup.
    pub fn from_millis(millis: i64) -> Self {
        match millis {
            0 => Self::Default,
            m if m < 0 => Self::Disabled,
            m => Self::Every(Duration::from_millis(m.unsigned_abs())),
        }
    }

    /// Effective sweep period, `None` when disabled.
    pub fn period(&self) -> Option<Duration> {
        match *self {
            Self::Default => Some(Self::DEFAULT_PERIOD),
            Self::Every(period) if period.is_zero() => Some(Self::DEFAULT_PERIOD),
            Self::Every(period) => Some(period),
            Self::Disabled => None,
        }
    }
}

// == Cache Options ==
/// Settings for a [`Cache`](crate::cache::Cache).
///
/// Only the retrieval callback is required.
pub struct CacheOptions<V, E> {
    pub(crate) retrieve: Option<RetrieveFn<V, E>>,
    pub(crate) cleanup_interval: CleanupInterval,
    pub(crate) debug_logging: bool,
    pub(crate) clock: Option<Arc<dyn Clock>>,
}

impl<V, E> CacheOptions<V, E> {
    pub fn new() -> Self {
        Self {
            retrieve: None,
            cleanup_interval: CleanupInterval::Default,
            debug_logging: false,
            clock: None,
        }
    }

    /// Starts from the host configuration's cleanup and logging settings.
    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .cleanup_interval(config.cleanup_interval)
            .debug_logging(config.debug_logging)
    }

    /// Sets the callback invoked on every cache miss.
    pub fn retrieve<F>(mut self, retrieve: F) -> Self
    where
        F: FnMut(&str) -> Result<(V, Duration), E> + Send + 'static,
    {
        self.retrieve = Some(Box::new(retrieve));
        self
    }

    pub fn cleanup_interval(mut self, interval: CleanupInterval) -> Self {
        self.cleanup_interval = interval;
        self
    }

    /// Logs a summary of every cleanup sweep.
    pub fn debug_logging(mut self, enabled: bool) -> Self {
        self.debug_logging = enabled;
        self
    }

    /// Replaces the wall clock for all time reads.
    pub fn clock<C>(mut self, clock: C) -> Self
    where
        C: Clock + 'static,
    {
        self.clock = Some(Arc::new(clock));
        self
    }
}

impl<V, E> Default for CacheOptions<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> fmt::Debug for CacheOptions<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheOptions")
            .field("retrieve", &self.retrieve.is_some())
            .field("cleanup_interval", &self.cleanup_interval)
            .field("debug_logging", &self.debug_logging)
            .field("custom_clock", &self.clock.is_some())
            .finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_interval_from_millis() {
        assert_eq!(CleanupInterval::from_millis(0), CleanupInterval::Default);
        assert_eq!(CleanupInterval::from_millis(-1), CleanupInterval::Disabled);
        assert_eq!(
            CleanupInterval::from_millis(1500),
            CleanupInterval::Every(Duration::from_millis(1500))
        );
    }

    #[test]
    fn test_cleanup_interval_period() {
        assert_eq!(
            CleanupInterval::Default.period(),
            Some(Duration::from_secs(300))
        );
        assert_eq!(
            CleanupInterval::Every(Duration::ZERO).period(),
            Some(CleanupInterval::DEFAULT_PERIOD)
        );
        assert_eq!(
            CleanupInterval::Every(Duration::from_secs(2)).period(),
            Some(Duration::from_secs(2))
        );
        assert_eq!(CleanupInterval::Disabled.period(), None);
    }

    #[test]
    fn test_options_from_config() {
        let config = Config {
            cleanup_interval: CleanupInterval::Disabled,
            debug_logging: true,
            ..Config::default()
        };
        let options: CacheOptions<String, String> = CacheOptions::from_config(&config);

        assert!(options.retrieve.is_none());
        assert_eq!(options.cleanup_interval, CleanupInterval::Disabled);
        assert!(options.debug_logging);
        assert!(options.clock.is_none());
    }
}

//! Configuration Module
//!
//! Handles loading cache and demo host settings from environment variables.

use std::env;

use crate::cache::CleanupInterval;

/// Host configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Cadence of the opportunistic cleanup sweep
    pub cleanup_interval: CleanupInterval,
    /// Emit a log record for every cleanup sweep
    pub debug_logging: bool,
    /// Number of lookups the demo host performs
    pub iterations: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CLEANUP_INTERVAL_MS` - Sweep interval in milliseconds; 0 uses the
    ///   default of 5 minutes, a negative value disables cleanup (default: 0)
    /// - `DEBUG` - Any non-empty value enables debug logging (default: off)
    /// - `DEMO_ITERATIONS` - Lookups performed by the demo (default: 10)
    pub fn from_env() -> Self {
        Self {
            cleanup_interval: env::var("CLEANUP_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .map(CleanupInterval::from_millis)
                .unwrap_or_default(),
            debug_logging: env::var("DEBUG").map(|v| !v.is_empty()).unwrap_or(false),
            iterations: env::var("DEMO_ITERATIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cleanup_interval: CleanupInterval::Default,
            debug_logging: false,
            iterations: 10,
        }
    }
}

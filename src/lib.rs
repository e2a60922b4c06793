//! Lambda Cache - A process-local memoizing cache
//!
//! Serves repeated lookups from memory while each retrieved value stays within
//! its own TTL. Built once per process and reused across invocations.

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;

pub use cache::{Cache, CacheOptions, CleanupInterval, Fetched, SharedCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use error::CacheError;

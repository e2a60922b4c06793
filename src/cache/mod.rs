//! Cache Module
//!
//! Provides a memoizing cache with per-key TTL and opportunistic cleanup.

mod cleanup;
mod entry;
mod options;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub(crate) use entry::deadline_after;
pub use options::{CacheOptions, CleanupInterval, RetrieveFn};
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::{Cache, Fetched};

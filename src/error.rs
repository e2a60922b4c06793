//! Error types for the cache
//!
//! Retrieval failures are not represented here: they belong to the caller's
//! callback and reach `get` callers unchanged.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised while building a cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// No retrieval callback was supplied
    #[error("retrieve callback is required")]
    MissingRetrieve,
}

// == Result Type Alias ==
/// Convenience Result type for cache construction.
pub type Result<T> = std::result::Result<T, CacheError>;

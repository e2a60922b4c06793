//! Shared Cache Handle
//!
//! Thread-safe wrapper for hosts that call the cache from several threads.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::cache::{Cache, CacheOptions, CacheStats, Fetched};
use crate::error::Result;

// == Shared Cache ==
/// Cloneable handle to one [`Cache`] behind a single mutex.
///
/// The lock is held for the whole lookup, including the cleanup check and
/// the retrieval call, so concurrent callers are fully serialized.
pub struct SharedCache<V, E> {
    inner: Arc<Mutex<Cache<V, E>>>,
}

impl<V, E> SharedCache<V, E> {
    /// Wraps an existing cache.
    pub fn new(cache: Cache<V, E>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// Builds the cache from `options` and wraps it.
    pub fn from_options(options: CacheOptions<V, E>) -> Result<Self> {
        Ok(Self::new(Cache::new(options)?))
    }

    /// A panic inside a retrieval callback cannot leave the map half-written,
    /// so a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, Cache<V, E>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }
}

impl<V: Clone, E> SharedCache<V, E> {
    /// See [`Cache::get`].
    pub fn get(&self, key: &str) -> std::result::Result<V, E> {
        self.lock().get(key)
    }

    /// See [`Cache::fetch`].
    pub fn fetch(&self, key: &str) -> std::result::Result<Fetched<V>, E> {
        self.lock().fetch(key)
    }
}

impl<V, E> Clone for SharedCache<V, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

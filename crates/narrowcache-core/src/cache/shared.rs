//! Thread-safe wrapper around [`RecencyCache`].
//!
//! `get`, `add`, `all` and `clear` all touch the same two pieces of state, so
//! the whole surface sits behind one `parking_lot::Mutex`. A `RwLock` would
//! not help: `get` promotes and therefore writes.

use std::sync::Arc;

use parking_lot::Mutex;

use super::{CacheStats, RecencyCache};
use crate::dataset::Dataset;

/// A [`RecencyCache`] behind a single mutual-exclusion guard.
pub struct SharedRecencyCache<D: Dataset> {
    inner: Mutex<RecencyCache<D>>,
}

impl<D: Dataset> SharedRecencyCache<D> {
    /// Wraps an existing cache.
    #[must_use]
    pub fn new(cache: RecencyCache<D>) -> Self {
        Self {
            inner: Mutex::new(cache),
        }
    }

    /// See [`RecencyCache::get`].
    pub fn get(&self, criterion: &D::Criterion) -> Option<Arc<D>> {
        self.inner.lock().get(criterion)
    }

    /// See [`RecencyCache::add`].
    pub fn add(&self, dataset: Arc<D>) {
        self.inner.lock().add(dataset);
    }

    /// See [`RecencyCache::all`].
    #[must_use]
    pub fn all(&self) -> Vec<Arc<D>> {
        self.inner.lock().all()
    }

    /// See [`RecencyCache::clear`].
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Looks up `criterion` and, on a miss, builds the dataset with `build`
    /// and caches it, all under one guard.
    ///
    /// Returns the entry the cache holds afterwards. If the built dataset's
    /// filter equals another cached entry, that entry is promoted and
    /// returned instead of the new one.
    ///
    /// `build` runs with the lock held and must not touch this cache.
    pub fn get_or_insert_with<F>(&self, criterion: &D::Criterion, build: F) -> Arc<D>
    where
        F: FnOnce() -> D,
    {
        let mut cache = self.inner.lock();
        if let Some(hit) = cache.get(criterion) {
            return hit;
        }
        let data = Arc::new(build());
        cache.add(Arc::clone(&data));
        // `add` leaves the inserted or promoted entry at the back.
        cache.newest().map_or(data, Arc::clone)
    }

    /// Number of cached datasets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Always false: the permanent dataset is always cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Get cache statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    /// Consumes the wrapper and returns the cache.
    #[must_use]
    pub fn into_inner(self) -> RecencyCache<D> {
        self.inner.into_inner()
    }
}

use parking_lot::{RwLock, RwLockReadGuard};
use std::{fmt, hash::Hash, sync::Arc};

use crate::hash::{HashFamily, XxHashFamily};
use crate::{BloomFilter, Filter, FilterError};

/// A `BloomFilter` behind a read-write lock, shareable between threads.
///
/// Cloning yields another handle to the same filter. Inserts take the write
/// lock and queries the read lock, so a query started after an insert has
/// returned observes that insert.
#[derive(Debug)]
pub struct SharedBloomFilter<H = XxHashFamily> {
    inner: Arc<RwLock<BloomFilter<H>>>,
}

impl SharedBloomFilter {
    /// Constructs a new `SharedBloomFilter` hashing with xxHash64.
    ///
    /// Fails under the same conditions as [`BloomFilter::new`].
    pub fn new(capacity: usize, error_rate: f64) -> Result<SharedBloomFilter, FilterError> {
        BloomFilter::new(capacity, error_rate).map(Self::from)
    }
}

impl<H: HashFamily> SharedBloomFilter<H> {
    pub fn with_hasher(
        capacity: usize,
        error_rate: f64,
        hash_family: H,
    ) -> Result<SharedBloomFilter<H>, FilterError> {
        BloomFilter::with_hasher(capacity, error_rate, hash_family).map(Self::from)
    }

    /// Inserts the `item` into the shared filter.
    pub fn insert(&self, item: impl Hash) {
        self.inner.write().insert(item);
    }

    /// *Indicates* whether `item` is in the shared filter.
    pub fn contains(&self, item: impl Hash) -> bool {
        self.inner.read().contains(item)
    }

    pub fn might_contain(&self, item: impl Hash) -> bool {
        self.contains(item)
    }

    /// Locks the filter for reading, e.g. to inspect several properties at once.
    pub fn read(&self) -> RwLockReadGuard<'_, BloomFilter<H>> {
        self.inner.read()
    }

    /// Returns a copy of the filter's current state.
    pub fn snapshot(&self) -> BloomFilter<H> {
        self.inner.read().clone()
    }
}

impl<H> Clone for SharedBloomFilter<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H> From<BloomFilter<H>> for SharedBloomFilter<H> {
    fn from(filter: BloomFilter<H>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(filter)),
        }
    }
}

impl<H> fmt::Display for SharedBloomFilter<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.inner.read(), f)
    }
}

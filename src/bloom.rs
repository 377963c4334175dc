use bitvec::{bitvec, prelude::*};
use std::{
    f64::consts::LN_2,
    fmt,
    hash::{Hash, Hasher},
};
use tracing::debug;

use crate::hash::{HashFamily, XxHashFamily};
use crate::utils::ceil_to_usize;
use crate::Filter;
use crate::FilterError::{self, InvalidCapacity, InvalidErrorRate};

/// A Bloom filter is a space-efficient probabilistic data structure to test
/// whether an item is a member of a set.
///
/// It never returns false negatives but may return false positives.
/// Items can only be added, not deleted.
///
/// The filter is plain data: inserting needs `&mut self`, querying `&self`.
/// Wrap it in a [`SharedBloomFilter`](crate::SharedBloomFilter) to insert and
/// query from several threads.
#[derive(Clone, Debug, PartialEq)]
pub struct BloomFilter<H = XxHashFamily> {
    filter: BitVec,
    capacity: usize,
    error_rate: f64,
    size: usize,
    hash_count: u32,
    hash_family: H,
}

impl<H: HashFamily> Filter for BloomFilter<H> {
    /// Inserts the `item` into the `BloomFilter`.
    ///
    /// Inserting the same item again leaves the filter unchanged.
    fn insert(&mut self, item: impl Hash) -> &mut Self {
        for probe in 0..self.hash_count {
            let idx = self.bit_index(&item, probe);
            self.filter.set(idx, true);
        }

        self
    }

    /// *Indicates* whether `item` is in the `BloomFilter`.
    ///
    /// Never yields false negatives.
    /// Yields false positives roughly at the `BloomFilter`'s `error_rate`
    /// as long as no more than `capacity` items were inserted.
    fn contains(&self, item: impl Hash) -> bool {
        for probe in 0..self.hash_count {
            let idx = self.bit_index(&item, probe);
            if !self.filter[idx] {
                return false;
            }
        }

        true
    }

    /// Returns the number of bits that constitute the `BloomFilter`'s actual `filter`.
    fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of hash functions probed per operation.
    fn hash_count(&self) -> usize {
        self.hash_count as usize
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the false positive rate the `BloomFilter` was sized for.
    fn error_rate(&self) -> f64 {
        self.error_rate
    }
}

impl BloomFilter {
    /// Constructs a new `BloomFilter` hashing with xxHash64.
    ///
    /// * `capacity`: Intended elements the Bloom filter shall be able to hold
    /// * `error_rate`: The Bloom filter's acceptable false positive rate
    ///
    /// Fails for invalid parameters or if the filter is too large for your architecture.
    pub fn new(capacity: usize, error_rate: f64) -> Result<BloomFilter, FilterError> {
        Self::with_hasher(capacity, error_rate, XxHashFamily::default())
    }
}

impl<H: HashFamily> BloomFilter<H> {
    /// Constructs a new `BloomFilter` probing with the hashers of `hash_family`.
    ///
    /// * `capacity`: Intended elements the Bloom filter shall be able to hold
    /// * `error_rate`: The Bloom filter's acceptable false positive rate
    /// * `hash_family`: Source of the seeded hash functions
    pub fn with_hasher(
        capacity: usize,
        error_rate: f64,
        hash_family: H,
    ) -> Result<BloomFilter<H>, FilterError> {
        let (size, hash_count) = match optimal_parameters(capacity, error_rate) {
            Ok(params) => params,
            Err(err) => {
                debug!(capacity, error_rate, %err, "rejected Bloom filter parameters");
                return Err(err);
            }
        };

        debug!(capacity, error_rate, size, hash_count, "constructing Bloom filter");

        Ok(BloomFilter {
            filter: bitvec![usize, Lsb0; 0; size],
            capacity,
            error_rate,
            size,
            hash_count: hash_count as u32,
            hash_family,
        })
    }

    /// Returns the number of bits currently set.
    pub fn set_bits(&self) -> usize {
        self.filter.count_ones()
    }

    /// Returns the theoretical false positive rate once `capacity` items are stored,
    /// given the rounded `size` and `hash_count`.
    pub fn expected_error_rate(&self) -> f64 {
        false_positive_rate(self.size, self.capacity, self.hash_count as usize)
    }

    /// Returns the hash family the `BloomFilter` probes with.
    pub fn hash_family(&self) -> &H {
        &self.hash_family
    }

    /// Calculates the index into the `filter` that `probe` selects for `item`.
    fn bit_index<T: Hash>(&self, item: &T, probe: u32) -> usize {
        let mut hasher = self.hash_family.hasher(probe);
        item.hash(&mut hasher);

        (hasher.finish() % self.size as u64) as usize
    }
}

impl<T: Hash, H: HashFamily> Extend<T> for BloomFilter<H> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        for item in items {
            self.insert(item);
        }
    }
}

/// Summarises the `BloomFilter`'s shape.
///
/// `error_rate` is printed in its shortest round-trip form, so small rates
/// switch to exponent notation (`1e-7`).
impl<H> fmt::Display for BloomFilter<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BloomFilter(size={}, hash_functions={}, capacity={}, error_rate={:?})",
            self.size, self.hash_count, self.capacity, self.error_rate
        )
    }
}

/// Calculates the bit count and the number of hash functions of a Bloom filter
/// holding `capacity` items at a false positive rate of `error_rate`.
///
/// * `capacity`: Intended elements the Bloom filter shall be able to hold
/// * `error_rate`: The Bloom filter's acceptable false positive rate
///
/// Returns `(size, hash_count)`, both rounded up from their optimal real values.
pub fn optimal_parameters(
    capacity: usize,
    error_rate: f64,
) -> Result<(usize, usize), FilterError> {
    if capacity < 1 {
        return Err(InvalidCapacity { found: capacity });
    }
    if !(0.0 < error_rate && error_rate < 1.0) {
        return Err(InvalidErrorRate { found: error_rate });
    }

    let n = capacity as f64;
    let size = ceil_to_usize(
        optimal_bit_count(n, error_rate),
        BitSlice::<usize, Lsb0>::MAX_BITS,
        "size",
    )?;
    let hash_count = ceil_to_usize(
        optimal_hash_fn_count(size as f64, n),
        u32::MAX as usize,
        "hash_count",
    )?;

    Ok((size, hash_count))
}

/// m = -n * ln(p) / ln(2)^2
fn optimal_bit_count(capacity: f64, error_rate: f64) -> f64 {
    -capacity * error_rate.ln() / (LN_2 * LN_2)
}

/// k = (m / n) * ln(2)
fn optimal_hash_fn_count(bits: f64, capacity: f64) -> f64 {
    (bits / capacity) * LN_2
}

/// Calculates the false positive rate of a Bloom filter with the properties of the parameters.
fn false_positive_rate(bits: usize, items: usize, hash_fns_count: usize) -> f64 {
    let k = hash_fns_count as f64;
    let exponent = -k * items as f64 / bits as f64;

    (1.0 - exponent.exp()).powf(k)
}

//! # Bloomset
//!
//! A Bloom filter sized from the number of items it shall hold and the rate
//! of false positives it may return. The filter can claim that a given entry is
//!
//! * definitely not represented in a set of entries, or
//! * might be represented in the set.
//!
//! ## Bloomset in Action
//!
//! ```rust
//! use bloomset::{BloomFilter, Filter};
//!
//! fn main() {
//!     // The number of items we want the `BloomFilter` to store
//!     // while not returning too many false positives
//!     let capacity = 1_000;
//!     // The rate of false positives the `BloomFilter` is allowed
//!     // to return if it stores no more than `capacity` items
//!     let error_rate = 0.001;
//!     // The bit count and the number of hash functions are derived
//!     // from these two parameters
//!     let mut bloom =
//!         BloomFilter::new(capacity, error_rate).expect("couldn't construct Bloom filter.");
//!
//!     // `BloomFilter`s can add any type that is `impl Hash`
//!     bloom.insert("apple").insert("banana").insert("orange");
//!     bloom.extend((0..996).map(|i| format!("item{i}")));
//!
//!     // Querying never yields a false negative
//!     assert!(bloom.contains("apple"));
//!     assert!(bloom.might_contain("banana"));
//!
//!     // But it can yield some false positives
//!     println!("Contains 'grape': {}", bloom.contains("grape"));
//!
//!     // `BloomFilter`s describe their own shape
//!     assert_eq!(14_378, bloom.size());
//!     assert_eq!(10, bloom.hash_count());
//!     println!("{bloom}");
//! }
//! ```
//!
//! `BloomFilter` is not synchronised. Use [`SharedBloomFilter`] to insert and
//! query from several threads.

use core::hash::Hash;
use thiserror::Error;

/// An error returned when constructing a filter.
#[derive(Error, Debug)]
pub enum FilterError {
    /// The filter shall hold at least one item.
    #[error("invalid capacity (expected 1 <= capacity, found: {found})")]
    InvalidCapacity {
        /// Provided capacity
        found: usize,
    },
    /// The false positive rate lies outside of `(0, 1)`.
    #[error("invalid error rate (expected 0.0 < error rate < 1.0, found: {found})")]
    InvalidErrorRate {
        /// Provided error rate
        found: f64,
    },
    /// A derived filter property doesn't fit into its integer type.
    #[error("couldn't convert {argument} to an integer (value: {value})")]
    ConversionError {
        /// Name of the derived property
        argument: &'static str,
        /// Value that couldn't be converted
        value: f64,
    },
}

/// A probabilistic set membership filter.
pub trait Filter {
    fn insert(&mut self, item: impl Hash) -> &mut Self;
    fn contains(&self, item: impl Hash) -> bool;
    fn size(&self) -> usize;
    fn hash_count(&self) -> usize;
    fn capacity(&self) -> usize;
    fn error_rate(&self) -> f64;

    /// Alias for [`Filter::contains`].
    fn might_contain(&self, item: impl Hash) -> bool {
        self.contains(item)
    }
}

pub mod bloom;
pub mod hash;
pub mod shared;
mod utils;

pub use bloom::{optimal_parameters, BloomFilter};
pub use hash::{HashFamily, Murmur3Family, XxHashFamily};
pub use shared::SharedBloomFilter;

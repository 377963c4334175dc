//! Seeded hash families used to derive a filter's bit positions.
//!
//! A [`HashFamily`] hands out one independent [`Hasher`] per probe. The item's
//! bytes are streamed into it through [`Hash::hash`](std::hash::Hash::hash)
//! and the probe's position is `finish() % size`.

use rand::random;
use std::{fmt::Debug, hash::Hasher};
use twox_hash::XxHash64;

/// A family of seeded hash functions.
///
/// Hashers built from the same family with the same `seed` must produce the
/// same output for the same bytes, and different seeds must produce
/// decorrelated outputs.
pub trait HashFamily: Clone + Debug {
    type Hasher: Hasher;

    /// Returns a fresh hasher for the probe `seed`.
    fn hasher(&self, seed: u32) -> Self::Hasher;
}

/// xxHash64 with the probe index added to a fixed salt.
///
/// The default salt is `0`, which makes bit positions reproducible across runs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct XxHashFamily {
    salt: u64,
}

impl XxHashFamily {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_salt(salt: u64) -> Self {
        Self { salt }
    }

    /// Uses a random salt, so positions differ between filters and processes.
    pub fn random() -> Self {
        Self::with_salt(random::<u64>())
    }

    /// Returns the value added to every probe's seed.
    pub fn salt(&self) -> u64 {
        self.salt
    }
}

impl HashFamily for XxHashFamily {
    type Hasher = XxHash64;

    fn hasher(&self, seed: u32) -> XxHash64 {
        XxHash64::with_seed(self.salt.wrapping_add(u64::from(seed)))
    }
}

/// 32-bit MurmurHash3 (x86 variant) with the probe index added to a fixed salt.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Murmur3Family {
    salt: u32,
}

impl Murmur3Family {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_salt(salt: u32) -> Self {
        Self { salt }
    }
}

impl HashFamily for Murmur3Family {
    type Hasher = Murmur3Hasher;

    fn hasher(&self, seed: u32) -> Murmur3Hasher {
        Murmur3Hasher {
            seed: self.salt.wrapping_add(seed),
            buffer: Vec::new(),
        }
    }
}

/// Collects the written bytes and hashes them in one pass on `finish`.
#[derive(Clone, Debug)]
pub struct Murmur3Hasher {
    seed: u32,
    buffer: Vec<u8>,
}

impl Hasher for Murmur3Hasher {
    fn write(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    fn finish(&self) -> u64 {
        let hash = murmur3::murmur3_32(&mut self.buffer.as_slice(), self.seed)
            .expect("reading from a byte slice cannot fail.");

        u64::from(hash)
    }
}

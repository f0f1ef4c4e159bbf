//! Stable string-to-seed hashing.
//!
//! Seeds are derived with 32-bit FNV-1a over UTF-16 code units, so a given
//! identity string maps to the same seed on every platform and in every
//! process, including the browser clients that share these seeds.

use std::hash::Hasher;

/// Incremental 32-bit FNV-1a hasher.
///
/// Not cryptographic. Seeds only drive cosmetic ordering, so the avalanche
/// behavior of FNV-1a on identifier-like inputs is sufficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fnv1a32 {
    state: u32,
}

impl Fnv1a32 {
    /// FNV offset basis.
    pub const OFFSET_BASIS: u32 = 2_166_136_261;
    /// FNV 32-bit prime.
    pub const PRIME: u32 = 16_777_619;

    /// Creates a hasher at the offset basis.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }

    /// Folds one UTF-16 code unit into the state.
    #[inline]
    pub fn write_code_unit(&mut self, unit: u16) {
        self.state ^= u32::from(unit);
        self.state = self.state.wrapping_mul(Self::PRIME);
    }

    /// Folds every UTF-16 code unit of `input` into the state.
    ///
    /// Characters outside the Basic Multilingual Plane contribute both halves
    /// of their surrogate pair.
    pub fn write_str_units(&mut self, input: &str) {
        for unit in input.encode_utf16() {
            self.write_code_unit(unit);
        }
    }

    /// Returns the current 32-bit hash.
    #[inline]
    #[must_use]
    pub const fn finish_u32(&self) -> u32 {
        self.state
    }
}

impl Default for Fnv1a32 {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for Fnv1a32 {
    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= u32::from(byte);
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }

    fn finish(&self) -> u64 {
        u64::from(self.state)
    }
}

/// Hashes a string to a 32-bit seed.
///
/// The empty string yields the offset basis unchanged.
///
/// # Example
///
/// ```
/// use feedweave::util::hash_string_to_seed;
///
/// assert_eq!(hash_string_to_seed(""), 2_166_136_261);
/// assert_eq!(hash_string_to_seed("a"), hash_string_to_seed("a"));
/// ```
#[must_use]
pub fn hash_string_to_seed(input: &str) -> u32 {
    let mut hasher = Fnv1a32::new();
    hasher.write_str_units(input);
    hasher.finish_u32()
}

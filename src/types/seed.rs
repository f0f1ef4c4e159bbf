//! Seed type for deterministic orderings.
//!
//! A [`Seed`] is a plain 32-bit unsigned value. It has no identity beyond its
//! numeric value: two seeds with the same value produce identical shuffles.

use core::fmt;
use serde::{Deserialize, Serialize};

/// A 32-bit seed that fully determines a pseudo-random stream.
///
/// Wider integers are accepted by masking to the low 32 bits, matching the
/// unsigned-overflow semantics of the hash and the generator.
///
/// # Example
///
/// ```
/// use feedweave::Seed;
///
/// assert_eq!(Seed::wrapping(0x1_0000_0005), Seed::new(5));
/// assert_eq!(Seed::wrapping_signed(-1).get(), u32::MAX);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seed(u32);

impl Seed {
    /// Creates a seed from a raw `u32`.
    #[inline]
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Creates a seed from any `u64`, keeping only the low 32 bits.
    #[inline]
    #[must_use]
    pub const fn wrapping(value: u64) -> Self {
        Self(value as u32)
    }

    /// Creates a seed from a signed integer using two's-complement wrapping.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn wrapping_signed(value: i64) -> Self {
        Self(value as u32)
    }

    /// Derives a seed from a string with the FNV-1a hash.
    #[must_use]
    pub fn from_str_hash(input: &str) -> Self {
        Self(crate::util::hash_string_to_seed(input))
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for Seed {
    #[inline]
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Seed> for u32 {
    #[inline]
    fn from(seed: Seed) -> Self {
        seed.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({:#010x})", self.0)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapping_masks_high_bits() {
        assert_eq!(Seed::wrapping(u64::from(u32::MAX) + 1).get(), 0);
        assert_eq!(Seed::wrapping(0xdead_beef_cafe_f00d).get(), 0xcafe_f00d);
    }

    #[test]
    fn wrapping_signed_is_twos_complement() {
        assert_eq!(Seed::wrapping_signed(-1).get(), u32::MAX);
        assert_eq!(Seed::wrapping_signed(-2).get(), u32::MAX - 1);
        assert_eq!(Seed::wrapping_signed(7).get(), 7);
    }

    #[test]
    fn display_and_debug() {
        let seed = Seed::new(255);
        assert_eq!(seed.to_string(), "255");
        assert_eq!(format!("{seed:?}"), "Seed(0x000000ff)");
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&Seed::new(42)).expect("serialize");
        assert_eq!(json, "42");
        let back: Seed = serde_json::from_str("4294967295").expect("deserialize");
        assert_eq!(back.get(), u32::MAX);
    }

    #[test]
    fn from_str_hash_matches_fnv() {
        assert_eq!(Seed::from_str_hash("").get(), 2_166_136_261);
    }
}

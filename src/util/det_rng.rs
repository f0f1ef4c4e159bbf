//! Deterministic pseudo-random number generator.
//!
//! This module provides the mulberry32 generator: 32 bits of state, one
//! additive step and a short integer mix per draw. It has no external
//! dependencies and uses only wrapping 32-bit arithmetic.
//!
//! # Determinism
//!
//! Given the same seed, the sequence of generated numbers is always identical,
//! on every platform. This is what keeps a viewer's ad ordering stable for the
//! lifetime of their session seed.

use crate::types::Seed;

/// A deterministic pseudo-random number generator using mulberry32.
///
/// It is NOT cryptographically secure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Weyl-sequence increment applied before every draw.
    pub const INCREMENT: u32 = 0x6d2b_79f5;

    /// Creates a new generator from a seed. Every `u32`, zero included, is valid.
    #[must_use]
    pub const fn new(seed: Seed) -> Self {
        Self { state: seed.get() }
    }

    /// Generates the next pseudo-random `u32`.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(Self::INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Generates a float uniformly in `[0, 1)`.
    ///
    /// The conversion is exact: a `u32` divided by `2^32`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Generates an index in `[0, bound)` as `floor(next_f64() * bound)`.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is zero.
    #[inline]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    pub fn next_index(&mut self, bound: usize) -> usize {
        assert!(bound > 0, "bound must be non-zero");
        let scaled = (self.next_f64() * bound as f64).floor() as usize;
        scaled.min(bound - 1)
    }

    /// Shuffles a slice in place using the Fisher-Yates algorithm.
    ///
    /// Walks `i` from `len - 1` down to `1`, swapping with an index drawn
    /// from `[0, i]`. Slices shorter than two elements draw nothing.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_index(i + 1);
            slice.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::float_cmp)]
    fn matches_reference_stream() {
        let mut rng = Mulberry32::new(Seed::new(0));
        assert_eq!(rng.next_f64(), 0.266_429_208_684_712_65);
        assert_eq!(rng.next_f64(), 0.000_329_745_700_582_861_9);
        assert_eq!(rng.next_f64(), 0.223_272_027_447_819_7);

        let mut rng = Mulberry32::new(Seed::new(42));
        assert_eq!(rng.next_u32(), 2_581_720_956);
        assert_eq!(rng.next_u32(), 1_925_393_290);
        assert_eq!(rng.next_u32(), 3_661_312_704);
    }

    #[test]
    fn deterministic_sequence() {
        let mut rng1 = Mulberry32::new(Seed::new(42));
        let mut rng2 = Mulberry32::new(Seed::new(42));

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn different_seeds_different_sequences() {
        let mut rng1 = Mulberry32::new(Seed::new(42));
        let mut rng2 = Mulberry32::new(Seed::new(43));

        // Very unlikely to match
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn floats_stay_in_unit_interval() {
        let mut rng = Mulberry32::new(Seed::new(u32::MAX));
        for _ in 0..1000 {
            let value = rng.next_f64();
            assert!((0.0..1.0).contains(&value), "value out of range: {value}");
        }
    }

    #[test]
    fn next_index_respects_bound() {
        let mut rng = Mulberry32::new(Seed::new(7));
        for bound in 1..50 {
            assert!(rng.next_index(bound) < bound);
        }
    }

    #[test]
    fn clone_preserves_position() {
        let mut rng = Mulberry32::new(Seed::new(9));
        let _ = rng.next_u32();
        let mut forked = rng.clone();
        assert_eq!(rng.next_u32(), forked.next_u32());
    }
}

//! Session-stable shuffling.
//!
//! The same items and the same [`Seed`] always produce the same order, which
//! is what lets a viewer see a stable advertiser rotation for a whole session
//! without the server remembering anything.

use crate::types::Seed;
use crate::util::Mulberry32;

/// Returns a seeded permutation of `items`.
///
/// The output has exactly the input's elements. Inputs of length 0 or 1 are
/// copied without constructing a generator.
///
/// # Example
///
/// ```
/// use feedweave::{Seed, seeded_shuffle};
///
/// let ads = ["a1", "a2", "a3", "a4"];
/// let first = seeded_shuffle(&ads, Seed::new(42));
/// assert_eq!(first, seeded_shuffle(&ads, Seed::new(42)));
/// assert_eq!(first, ["a1", "a4", "a2", "a3"]);
/// ```
#[must_use]
pub fn seeded_shuffle<T: Clone>(items: &[T], seed: Seed) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffle_in_place(&mut shuffled, seed);
    shuffled
}

/// Shuffles an owned buffer in place with the same algorithm as
/// [`seeded_shuffle`].
pub fn shuffle_in_place<T>(items: &mut [T], seed: Seed) {
    if items.len() <= 1 {
        return;
    }
    Mulberry32::new(seed).shuffle(items);
}

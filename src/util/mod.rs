//! Internal utilities for deterministic seeding.
//!
//! These utilities are intentionally minimal and dependency-free (apart from
//! OS entropy) so that hashing and shuffling stay bit-for-bit reproducible.

pub mod det_rng;
pub mod entropy;
pub mod seed_hash;

pub use det_rng::Mulberry32;
pub use entropy::{DetEntropy, EntropyError, EntropySource, FailingEntropy, OsEntropy};
pub use seed_hash::{Fnv1a32, hash_string_to_seed};

//! Core value types shared across the crate.
//!
//! - [`seed`]: The 32-bit [`Seed`] that drives every deterministic ordering.

pub mod seed;

pub use seed::Seed;

//! Feedweave: session-stable ad interleaving for content feeds.
//!
//! # Overview
//!
//! Feedweave decides where sponsored content appears in an already-ordered
//! feed and gives each viewer session its own advertiser rotation without any
//! server-side state. Everything in the core is a pure function of its inputs:
//! the same identity, advertisers and posts always yield the same merged feed.
//!
//! # Core Guarantees
//!
//! - **Stable per session**: a [`Seed`] fully determines the advertiser order
//! - **Platform independent**: hashing and shuffling are pure 32-bit integer arithmetic
//! - **Cadence by position**: hidden posts still count toward ad spacing
//! - **Never fails on storage**: session seeds degrade to ephemeral ones instead of erroring
//!
//! # Module Structure
//!
//! - [`types`]: Core value types ([`Seed`])
//! - [`util`]: Seed hashing, the deterministic generator, entropy sources
//! - [`feed`]: Shuffling, cadence, interleaving and feed planning
//! - [`session`]: Session seed cache and its storage backends
//! - [`config`]: [`FeedConfig`] with TOML and environment loading
//! - [`error`](mod@error): Error types
//! - [`tracing_compat`]: Optional tracing integration (requires `tracing-integration` feature)
//!
//! # Example
//!
//! ```
//! use feedweave::{Cadence, DisplayItem, Seed, interleave_with_ads, seeded_shuffle};
//!
//! let seed = Seed::from_str_hash("viewer-42");
//! let rotation = seeded_shuffle(&["a1", "a2", "a3", "a4"], seed);
//! let feed = interleave_with_ads(1..=8, &rotation, Cadence::new(4).unwrap());
//! assert_eq!(feed.iter().filter(|item| item.is_ad()).count(), 2);
//! assert_eq!(feed[3], DisplayItem::ad("a3"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![cfg_attr(not(feature = "tracing-integration"), allow(unused_variables))]

pub mod config;
pub mod error;
pub mod feed;
pub mod session;
pub mod tracing_compat;
pub mod types;
pub mod util;

#[cfg(any(test, feature = "test-internals"))]
pub mod test_utils;

// Re-exports for convenient access to core types
pub use config::{ConfigError, FeedConfig};
pub use error::{Error, Result};
pub use feed::{
    Cadence, DisplayItem, FeedCursor, FeedPage, FeedPlanner, InvalidCadence, ad_slot_count,
    interleave_page, interleave_with_ads, interleave_with_ads_filtered, seeded_shuffle,
    shuffle_in_place,
};
pub use session::{
    FileSeedStore, MemorySeedStore, SeedOrigin, SeedResolution, SeedStore, SessionSeeds,
    StorageError, UnavailableSeedStore,
};
pub use types::Seed;
pub use util::{Mulberry32, hash_string_to_seed};

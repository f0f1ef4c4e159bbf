//! Per-viewer session seeds.
//!
//! A session seed keeps the advertiser rotation stable while a viewer scrolls
//! and lets it change between sessions, without any server-side state. The
//! [`SessionSeeds`] cache reads and writes seeds through a [`SeedStore`] and
//! degrades to an unpersisted seed whenever storage misbehaves.

pub mod cache;
pub mod store;

pub use cache::{ANONYMOUS_IDENTITY, SeedOrigin, SeedResolution, SessionSeeds};
pub use store::{
    FileSeedStore, MemorySeedStore, SeedStore, StorageError, StorageEvent, StorageEventOutcome,
    StorageOperation, UnavailableSeedStore,
};

#![allow(missing_docs)]

//! Session seed cache behavior over the real storage backends.

#[macro_use]
mod common;

use feedweave::session::StorageOperation::{Load, Save};
use feedweave::session::{
    FileSeedStore, MemorySeedStore, SeedOrigin, SessionSeeds, UnavailableSeedStore,
};
use feedweave::util::{DetEntropy, FailingEntropy};
use feedweave::{Seed, SeedStore, StorageError};
use tempfile::tempdir;

#[test]
fn file_store_keeps_seed_across_sessions() {
    common::init_test("file_store_keeps_seed_across_sessions");
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("seeds.json");

    test_phase!("first session");
    let first = SessionSeeds::new(FileSeedStore::new(&path), "feed-ad-seed").resolve(Some("viewer-1"));
    assert_with_log!(
        first.origin == SeedOrigin::Created,
        "origin",
        SeedOrigin::Created,
        first.origin
    );

    test_phase!("second session");
    let second = SessionSeeds::new(FileSeedStore::new(&path), "feed-ad-seed").resolve(Some("viewer-1"));
    assert_with_log!(second.seed == first.seed, "seed", first.seed, second.seed);
    assert_eq!(second.origin, SeedOrigin::Stored);

    let raw = std::fs::read_to_string(&path).expect("read store");
    let parsed: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(
        parsed["feed-ad-seed:viewer-1"],
        serde_json::Value::String(first.seed.get().to_string())
    );
    test_complete!("file_store_keeps_seed_across_sessions");
}

#[test]
fn file_store_separates_identities() {
    common::init_test("file_store_separates_identities");
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("seeds.json");
    let mut seeds = SessionSeeds::with_entropy(
        FileSeedStore::new(&path),
        DetEntropy::new(Seed::new(7)),
        "feed-ad-seed",
    );

    let alice = seeds.seed_for(Some("alice"));
    let anonymous = seeds.seed_for(None);
    assert_ne!(alice, anonymous);

    let mut store = seeds.into_store();
    assert_eq!(
        store.load("feed-ad-seed:anonymous").expect("load"),
        Some(anonymous.get().to_string())
    );
    test_complete!("file_store_separates_identities");
}

#[test]
fn truncated_file_is_replaced_and_seed_becomes_stable() {
    common::init_test("truncated_file_is_replaced_and_seed_becomes_stable");
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("seeds.json");
    std::fs::write(&path, "{ trunc").expect("write");

    let mut store = FileSeedStore::new(&path);
    assert!(matches!(store.load("k"), Err(StorageError::Corrupt { .. })));

    test_phase!("first resolve replaces the file");
    let mut seeds = SessionSeeds::new(store, "feed-ad-seed");
    let first = seeds.resolve(Some("v"));
    assert_with_log!(
        first.origin == SeedOrigin::Created,
        "origin",
        SeedOrigin::Created,
        first.origin
    );

    test_phase!("second resolve reads it back");
    let second = seeds.resolve(Some("v"));
    assert_with_log!(
        second.origin == SeedOrigin::Stored,
        "origin",
        SeedOrigin::Stored,
        second.origin
    );
    assert_eq!(second.seed, first.seed);

    let raw = std::fs::read_to_string(&path).expect("read store");
    let parsed: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert!(parsed.get("feed-ad-seed:v").is_some());
    test_complete!("truncated_file_is_replaced_and_seed_becomes_stable");
}

#[test]
fn missing_directory_degrades_on_save() {
    common::init_test("missing_directory_degrades_on_save");
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("absent").join("seeds.json");

    let resolved = SessionSeeds::new(FileSeedStore::new(&path), "feed-ad-seed").resolve(None);
    assert!(!resolved.is_persisted());
    assert!(!path.exists());
    test_complete!("missing_directory_degrades_on_save");
}

#[test]
fn unavailable_store_and_entropy_still_yield_seed() {
    common::init_test("unavailable_store_and_entropy_still_yield_seed");
    let mut seeds = SessionSeeds::with_entropy(UnavailableSeedStore, FailingEntropy, "feed-ad-seed");
    let resolved = seeds.resolve(Some("viewer-1"));
    assert!(matches!(resolved.origin, SeedOrigin::Ephemeral { .. }));
    test_complete!("unavailable_store_and_entropy_still_yield_seed");
}

#[test]
fn memory_store_event_log_shows_lookup_then_save() {
    common::init_test("memory_store_event_log_shows_lookup_then_save");
    let mut seeds = SessionSeeds::with_entropy(
        MemorySeedStore::new(),
        DetEntropy::new(Seed::new(1)),
        "feed-ad-seed",
    );
    let _ = seeds.seed_for(Some("viewer-1"));
    let _ = seeds.seed_for(Some("viewer-1"));

    let ops: Vec<_> = seeds.store().events().iter().map(|e| e.operation).collect();
    assert_eq!(ops, vec![Load, Save, Load]);
    test_complete!("memory_store_event_log_shows_lookup_then_save");
}

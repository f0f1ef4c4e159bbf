//! Seed storage backends.
//!
//! A [`SeedStore`] is the key-value storage a session seed cache persists into:
//! browser session storage in a web client, a file for the CLI, or memory in
//! tests. Stores may fail at any time; callers are expected to degrade rather
//! than propagate.

use crate::tracing_compat::warn;
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Error returned by seed store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend refuses all access (e.g. private browsing).
    #[error("seed storage is unavailable")]
    Unavailable,
    /// Saving would exceed the store's entry limit.
    #[error("seed storage quota exceeded: {projected} entries > limit {limit}")]
    QuotaExceeded {
        /// Entry count after the rejected save.
        projected: usize,
        /// Configured entry limit.
        limit: usize,
    },
    /// Reading or writing the backing file failed.
    #[error("seed store {} I/O failed: {source}", .path.display())]
    Io {
        /// Backing file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The backing file does not hold a JSON object of strings.
    #[error("seed store {} is corrupt: {reason}", .path.display())]
    Corrupt {
        /// Backing file.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },
}

/// Key-value storage for session seeds.
pub trait SeedStore {
    /// Reads the value stored under `key`.
    fn load(&mut self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`, returning whether it existed.
    fn remove(&mut self, key: &str) -> Result<bool, StorageError>;
}

impl<S: SeedStore + ?Sized> SeedStore for &mut S {
    fn load(&mut self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<bool, StorageError> {
        (**self).remove(key)
    }
}

impl<S: SeedStore + ?Sized> SeedStore for Box<S> {
    fn load(&mut self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<bool, StorageError> {
        (**self).remove(key)
    }
}

/// Operation recorded in a [`MemorySeedStore`] event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOperation {
    /// A read.
    Load,
    /// A write.
    Save,
    /// A deletion.
    Remove,
}

/// Outcome of a recorded storage operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageEventOutcome {
    /// The operation was applied.
    Allowed,
    /// The operation was refused.
    Denied,
}

/// One entry in a [`MemorySeedStore`] event log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    /// Operation that was attempted.
    pub operation: StorageOperation,
    /// Key the operation targeted.
    pub key: String,
    /// Event outcome.
    pub outcome: StorageEventOutcome,
}

/// Deterministic in-memory seed store.
///
/// Keys enumerate in sorted order and operations are appended to an event
/// log, so tests can assert exactly what the seed cache did. The log keeps
/// only the most recent [`MemorySeedStore::DEFAULT_EVENT_CAPACITY`] events
/// unless configured otherwise; a capacity of zero disables it.
#[derive(Debug, Clone)]
pub struct MemorySeedStore {
    entries: BTreeMap<String, String>,
    max_entries: Option<usize>,
    events: Vec<StorageEvent>,
    event_capacity: usize,
}

impl Default for MemorySeedStore {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            max_entries: None,
            events: Vec::new(),
            event_capacity: Self::DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl MemorySeedStore {
    /// Events retained by default.
    pub const DEFAULT_EVENT_CAPACITY: usize = 256;

    /// Creates an unbounded store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that refuses to hold more than `max_entries` keys.
    #[must_use]
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            max_entries: Some(max_entries),
            ..Self::default()
        }
    }

    /// Keeps at most `capacity` recent events; zero turns the log off.
    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        let excess = self.events.len().saturating_sub(capacity);
        self.events.drain(..excess);
        self
    }

    /// Returns the current entry count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no keys are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lists stored keys in sorted order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Returns the retained event log, oldest first.
    #[must_use]
    pub fn events(&self) -> &[StorageEvent] {
        &self.events
    }

    fn record(&mut self, operation: StorageOperation, key: &str, outcome: StorageEventOutcome) {
        if self.event_capacity == 0 {
            return;
        }
        if self.events.len() >= self.event_capacity {
            let excess = self.events.len() + 1 - self.event_capacity;
            self.events.drain(..excess);
        }
        self.events.push(StorageEvent {
            operation,
            key: key.to_owned(),
            outcome,
        });
    }
}

impl SeedStore for MemorySeedStore {
    fn load(&mut self, key: &str) -> Result<Option<String>, StorageError> {
        self.record(StorageOperation::Load, key, StorageEventOutcome::Allowed);
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(limit) = self.max_entries {
            let projected = if self.entries.contains_key(key) {
                self.entries.len()
            } else {
                self.entries.len() + 1
            };
            if projected > limit {
                self.record(StorageOperation::Save, key, StorageEventOutcome::Denied);
                return Err(StorageError::QuotaExceeded { projected, limit });
            }
        }
        self.record(StorageOperation::Save, key, StorageEventOutcome::Allowed);
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, StorageError> {
        self.record(StorageOperation::Remove, key, StorageEventOutcome::Allowed);
        Ok(self.entries.remove(key).is_some())
    }
}

/// Seed store backed by a JSON object file.
///
/// A missing file reads as an empty store. Every save rewrites the whole
/// file through a sibling temporary file that is renamed into place, so a
/// crash mid-write never leaves a truncated store behind. A file that is
/// already corrupt is replaced wholesale on the next save.
#[derive(Debug, Clone)]
pub struct FileSeedStore {
    path: PathBuf,
}

impl FileSeedStore {
    /// Creates a store at `path`. The file is created on first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => return Err(self.io(source)),
        };
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        let value: Value =
            serde_json::from_str(&contents).map_err(|e| self.corrupt(e.to_string()))?;
        let Value::Object(object) = value else {
            return Err(self.corrupt("top-level value is not an object".to_owned()));
        };
        object
            .into_iter()
            .map(|(key, value)| match value {
                Value::String(value) => Ok((key, value)),
                other => Err(self.corrupt(format!("value for {key:?} is not a string: {other}"))),
            })
            .collect()
    }

    fn replace_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let json =
            serde_json::to_string_pretty(entries).map_err(|e| self.corrupt(e.to_string()))?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(dir).map_err(|source| self.io(source))?;
        staged
            .write_all(json.as_bytes())
            .map_err(|source| self.io(source))?;
        staged
            .as_file()
            .sync_all()
            .map_err(|source| self.io(source))?;
        staged
            .persist(&self.path)
            .map_err(|persist| self.io(persist.error))?;
        Ok(())
    }

    fn io(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn corrupt(&self, reason: String) -> StorageError {
        StorageError::Corrupt {
            path: self.path.clone(),
            reason,
        }
    }
}

impl SeedStore for FileSeedStore {
    fn load(&mut self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(error @ StorageError::Corrupt { .. }) => {
                warn!(error = %error, "replacing corrupt seed store");
                BTreeMap::new()
            }
            Err(error) => return Err(error),
        };
        entries.insert(key.to_owned(), value.to_owned());
        self.replace_all(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<bool, StorageError> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_none() {
            return Ok(false);
        }
        self.replace_all(&entries)?;
        Ok(true)
    }
}

/// Seed store that refuses every operation.
///
/// Models storage that throws on access, such as session storage in a
/// private browsing window.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableSeedStore;

impl SeedStore for UnavailableSeedStore {
    fn load(&mut self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn save(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn remove(&mut self, _key: &str) -> Result<bool, StorageError> {
        Err(StorageError::Unavailable)
    }
}

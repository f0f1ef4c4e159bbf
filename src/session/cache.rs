//! Session seed cache.
//!
//! Looks up the seed a viewer's session already uses, or mints and persists a
//! new one. This is the only side-effecting piece of the crate and it never
//! fails: an unreadable entry is treated as absent and overwritten, and when
//! the new seed cannot be saved either the viewer still gets a valid, merely
//! non-persisted, seed.

use crate::config::FeedConfig;
use crate::session::SeedStore;
use crate::tracing_compat::{debug, info, warn};
use crate::types::Seed;
use crate::util::{EntropySource, OsEntropy};
use std::time::{SystemTime, UNIX_EPOCH};

/// Identity used in storage keys for viewers who are not signed in.
pub const ANONYMOUS_IDENTITY: &str = "anonymous";

/// How a resolved seed was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOrigin {
    /// Read back from the store.
    Stored,
    /// Freshly minted and persisted.
    Created,
    /// Freshly minted but not persisted; `reason` says why.
    Ephemeral {
        /// The storage failure that prevented persistence.
        reason: String,
    },
}

/// A resolved session seed together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedResolution {
    /// The seed to shuffle with.
    pub seed: Seed,
    /// Where it came from.
    pub origin: SeedOrigin,
}

impl SeedResolution {
    /// Returns `true` if the seed will be stable across later calls.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        matches!(self.origin, SeedOrigin::Stored | SeedOrigin::Created)
    }
}

/// Per-identity session seed cache over a [`SeedStore`].
///
/// # Example
///
/// ```
/// use feedweave::session::{MemorySeedStore, SessionSeeds};
///
/// let mut seeds = SessionSeeds::new(MemorySeedStore::new(), "feed-ad-seed");
/// let first = seeds.seed_for(Some("viewer-42"));
/// assert_eq!(first, seeds.seed_for(Some("viewer-42")));
/// ```
#[derive(Debug)]
pub struct SessionSeeds<S, E = OsEntropy> {
    store: S,
    entropy: E,
    namespace: String,
    fallback_counter: u64,
}

impl<S: SeedStore> SessionSeeds<S> {
    /// Creates a cache drawing nonces from the operating system.
    pub fn new(store: S, namespace: impl Into<String>) -> Self {
        Self::with_entropy(store, OsEntropy, namespace)
    }
}

impl<S: SeedStore, E: EntropySource> SessionSeeds<S, E> {
    /// Creates a cache with an explicit entropy source.
    pub fn with_entropy(store: S, entropy: E, namespace: impl Into<String>) -> Self {
        Self {
            store,
            entropy,
            namespace: namespace.into(),
            fallback_counter: 0,
        }
    }

    /// Creates a cache using the namespace from `config`.
    pub fn from_config(store: S, entropy: E, config: &FeedConfig) -> Self {
        Self::with_entropy(store, entropy, config.seed_namespace.clone())
    }

    /// Returns the storage key for `identity`.
    #[must_use]
    pub fn storage_key(&self, identity: Option<&str>) -> String {
        format!("{}:{}", self.namespace, identity.unwrap_or(ANONYMOUS_IDENTITY))
    }

    /// Returns the session seed for `identity`, creating one if needed.
    pub fn seed_for(&mut self, identity: Option<&str>) -> Seed {
        self.resolve(identity).seed
    }

    /// Returns the session seed for `identity` and how it was obtained.
    pub fn resolve(&mut self, identity: Option<&str>) -> SeedResolution {
        let key = self.storage_key(identity);
        let identity = identity.unwrap_or(ANONYMOUS_IDENTITY);

        match self.store.load(&key) {
            Ok(Some(raw)) => {
                if let Ok(value) = raw.trim().parse::<u32>() {
                    return SeedResolution {
                        seed: Seed::new(value),
                        origin: SeedOrigin::Stored,
                    };
                }
                warn!(key = %key, stored = %raw, "discarding unparseable session seed");
            }
            Ok(None) => {}
            Err(error) => {
                warn!(key = %key, error = %error, "could not read session seed, minting a new one");
            }
        }

        let seed = self.fresh_seed(identity);
        match self.store.save(&key, &seed.to_string()) {
            Ok(()) => {
                info!(key = %key, seed = seed.get(), "created session seed");
                SeedResolution {
                    seed,
                    origin: SeedOrigin::Created,
                }
            }
            Err(error) => {
                warn!(key = %key, error = %error, "could not persist session seed");
                SeedResolution {
                    seed,
                    origin: SeedOrigin::Ephemeral {
                        reason: error.to_string(),
                    },
                }
            }
        }
    }

    /// Drops the stored seed for `identity` so the next lookup mints a new one.
    ///
    /// Returns `false` when nothing was stored or the store is unreachable.
    pub fn reset(&mut self, identity: Option<&str>) -> bool {
        let key = self.storage_key(identity);
        match self.store.remove(&key) {
            Ok(removed) => removed,
            Err(error) => {
                warn!(key = %key, error = %error, "could not reset session seed");
                false
            }
        }
    }

    /// Returns the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the cache, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn fresh_seed(&mut self, identity: &str) -> Seed {
        let nonce = match self.entropy.next_u64() {
            Ok(nonce) => nonce,
            Err(error) => {
                debug!(error = %error, "entropy unavailable, deriving nonce from clock");
                self.fallback_nonce()
            }
        };
        Seed::from_str_hash(&format!("{identity}:{nonce:016x}"))
    }

    fn fallback_nonce(&mut self) -> u64 {
        self.fallback_counter = self.fallback_counter.wrapping_add(1);
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_nanos() as u64);
        nanos ^ self.fallback_counter.wrapping_mul(0x9e37_79b9_7f4a_7c15)
    }
}

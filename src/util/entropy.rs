//! Entropy source abstraction for session seed creation.
//!
//! New session seeds need a nonce that differs between sessions. This module
//! provides an OS-backed source for production and a deterministic source so
//! tests can predict which seed a fresh session receives.

use crate::types::Seed;
use crate::util::Mulberry32;
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

/// Failure to obtain entropy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("entropy source `{source_id}` failed: {reason}")]
pub struct EntropyError {
    /// Identifier of the failing source.
    pub source_id: &'static str,
    /// Human-readable cause.
    pub reason: String,
}

/// Core trait for entropy providers.
pub trait EntropySource: Send + Sync {
    /// Fill a buffer with entropy bytes.
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError>;

    /// Return the next random `u64`.
    fn next_u64(&self) -> Result<u64, EntropyError> {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }

    /// Stable identifier for tracing and diagnostics.
    fn source_id(&self) -> &'static str;
}

/// OS-backed entropy source for production use.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        getrandom::fill(dest).map_err(|error| EntropyError {
            source_id: self.source_id(),
            reason: error.to_string(),
        })
    }

    fn source_id(&self) -> &'static str {
        "os"
    }
}

/// Deterministic entropy source for tests and reproducible runs.
#[derive(Debug)]
pub struct DetEntropy {
    rng: Mutex<Mulberry32>,
    seed: Seed,
}

impl DetEntropy {
    /// Create a deterministic entropy source from a seed.
    #[must_use]
    pub fn new(seed: Seed) -> Self {
        Self {
            rng: Mutex::new(Mulberry32::new(seed)),
            seed,
        }
    }

    /// Returns the seed this source was created with.
    #[must_use]
    pub const fn seed(&self) -> Seed {
        self.seed
    }
}

impl EntropySource for DetEntropy {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        for chunk in dest.chunks_mut(4) {
            let bytes = rng.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
        drop(rng);
        Ok(())
    }

    fn source_id(&self) -> &'static str {
        "deterministic"
    }
}

/// Entropy source that always fails, for exercising degraded paths.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingEntropy;

impl EntropySource for FailingEntropy {
    fn fill_bytes(&self, _dest: &mut [u8]) -> Result<(), EntropyError> {
        Err(EntropyError {
            source_id: self.source_id(),
            reason: "entropy disabled".to_owned(),
        })
    }

    fn source_id(&self) -> &'static str {
        "failing"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn det_entropy_is_reproducible() {
        let a = DetEntropy::new(Seed::new(5));
        let b = DetEntropy::new(Seed::new(5));
        for _ in 0..16 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
        assert_eq!(a.seed(), Seed::new(5));
    }

    #[test]
    fn det_entropy_fills_odd_lengths() {
        let source = DetEntropy::new(Seed::new(1));
        let mut buf = [0u8; 7];
        source.fill_bytes(&mut buf).expect("fill");
        assert_ne!(buf, [0u8; 7]);
    }

    #[test]
    fn os_entropy_produces_bytes() {
        let source = OsEntropy;
        let first = source.next_u64().expect("os entropy");
        let second = source.next_u64().expect("os entropy");
        assert_ne!(first, second);
        assert_eq!(source.source_id(), "os");
    }

    #[test]
    fn failing_entropy_reports_source() {
        let err = FailingEntropy.next_u64().expect_err("must fail");
        assert_eq!(err.source_id, "failing");
        assert!(err.to_string().contains("entropy disabled"));
    }
}

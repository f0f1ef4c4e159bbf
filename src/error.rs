//! Crate-level error type.
//!
//! The core functions (hashing, shuffling, interleaving) are total and never
//! return errors. Errors only arise at the boundaries: constructing a cadence,
//! resuming from a client cursor, loading configuration, and talking to seed
//! storage.

use crate::config::ConfigError;
use crate::feed::{CursorOverflow, InvalidCadence};
use crate::session::StorageError;
use thiserror::Error;

/// Any error surfaced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A non-positive ad cadence was supplied.
    #[error(transparent)]
    InvalidCadence(#[from] InvalidCadence),
    /// A feed cursor could not advance over the requested page.
    #[error(transparent)]
    CursorOverflow(#[from] CursorOverflow),
    /// Configuration failed to load or validate.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A seed store operation failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl Error {
    /// Returns `true` if the error came from seed storage.
    #[must_use]
    pub const fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Returns `true` if a client-supplied feed cursor was rejected.
    #[must_use]
    pub const fn is_cursor_overflow(&self) -> bool {
        matches!(self, Self::CursorOverflow(_))
    }

    /// Returns `true` if the error is a rejected cadence, whether supplied
    /// directly or through configuration.
    #[must_use]
    pub const fn is_invalid_cadence(&self) -> bool {
        matches!(
            self,
            Self::InvalidCadence(_) | Self::Config(ConfigError::InvalidCadence(_))
        )
    }
}

/// Result alias for fallible crate operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::Cadence;

    #[test]
    fn cadence_errors_convert() {
        let err: Error = Cadence::new(0).expect_err("zero").into();
        assert!(err.is_invalid_cadence());
        assert!(!err.is_storage());
        assert!(err.to_string().contains("positive integer"));
    }

    #[test]
    fn config_cadence_counts_as_invalid_cadence() {
        let err: Error = ConfigError::InvalidCadence(InvalidCadence { value: -1 }).into();
        assert!(err.is_invalid_cadence());
    }

    #[test]
    fn cursor_overflow_converts() {
        let err: Error = CursorOverflow {
            position: usize::MAX,
            ad_index: 0,
        }
        .into();
        assert!(err.is_cursor_overflow());
        assert!(!err.is_invalid_cadence());
        assert!(err.to_string().contains("overflowed"));
    }

    #[test]
    fn storage_errors_convert() {
        let err: Error = StorageError::Unavailable.into();
        assert!(err.is_storage());
        assert!(err.to_string().contains("unavailable"));
    }
}

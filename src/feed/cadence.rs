//! Ad cadence.
//!
//! A cadence of `n` places one ad slot immediately before every `n`-th post,
//! counted over the original, unfiltered post positions. Zero and negative
//! cadences are rejected when the value is constructed, so the interleaver
//! itself never has to handle them.

use core::fmt;
use core::num::NonZeroUsize;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a cadence is zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("ad cadence must be a positive integer, got {value}")]
pub struct InvalidCadence {
    /// The rejected value.
    pub value: i64,
}

/// A validated, positive ad cadence.
///
/// # Example
///
/// ```
/// use feedweave::Cadence;
///
/// let cadence = Cadence::new(6).expect("positive");
/// assert_eq!(cadence.get(), 6);
/// assert!(Cadence::new(0).is_err());
/// assert!(Cadence::try_from(-3_i64).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct Cadence(NonZeroUsize);

impl Cadence {
    /// The default cadence: one ad slot per six posts.
    pub const DEFAULT: Self = Self(NonZeroUsize::MIN.saturating_add(5));

    /// Creates a cadence, rejecting zero.
    pub fn new(every_n: usize) -> Result<Self, InvalidCadence> {
        NonZeroUsize::new(every_n)
            .map(Self)
            .ok_or(InvalidCadence { value: 0 })
    }

    /// Returns the cadence as a plain integer (always at least 1).
    #[inline]
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }

    /// Returns `true` when the 1-based original `position` carries an ad slot.
    #[inline]
    #[must_use]
    pub const fn is_slot(self, position: usize) -> bool {
        position % self.0.get() == 0
    }
}

impl Default for Cadence {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<NonZeroUsize> for Cadence {
    fn from(value: NonZeroUsize) -> Self {
        Self(value)
    }
}

impl TryFrom<i64> for Cadence {
    type Error = InvalidCadence;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or(InvalidCadence { value })
    }
}

impl From<Cadence> for u64 {
    fn from(cadence: Cadence) -> Self {
        cadence.get() as Self
    }
}

impl fmt::Debug for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cadence({})", self.0)
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "every {}", self.0)
    }
}

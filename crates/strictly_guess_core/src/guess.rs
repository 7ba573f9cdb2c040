//! Range-validated guesses.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::RoundError;

/// Smallest valid guess (and target).
pub const GUESS_MIN: u8 = 1;

/// Largest valid guess (and target).
pub const GUESS_MAX: u8 = 100;

/// An integer in `[GUESS_MIN, GUESS_MAX]`.
///
/// The only way to build one is through validation, so downstream code
/// (the classifier in particular) never re-checks the range.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "u8")]
pub struct Guess(u8);

impl Guess {
    /// The middle of the range, a good opening guess.
    pub const MIDPOINT: Self = Self(50);

    /// Validates an integer.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::InvalidGuess`] when `value` is outside the range.
    pub fn new(value: i64) -> Result<Self, RoundError> {
        if (i64::from(GUESS_MIN)..=i64::from(GUESS_MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(RoundError::InvalidGuess {
                raw: value.to_string(),
            })
        }
    }

    /// Parses player input. Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::InvalidGuess`] carrying the raw text when it is
    /// not an integer or is out of range.
    #[instrument]
    pub fn parse(raw: &str) -> Result<Self, RoundError> {
        let invalid = || RoundError::InvalidGuess {
            raw: raw.to_string(),
        };
        let value: i64 = raw.trim().parse().map_err(|_| invalid())?;
        Self::new(value).map_err(|_| invalid())
    }

    /// Returns the wrapped value.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Guess {
    type Error = RoundError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Guess> for u8 {
    fn from(guess: Guess) -> Self {
        guess.0
    }
}

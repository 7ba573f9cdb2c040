//! Feedback classification for a single guess.

use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::instrument;

use crate::Guess;

/// Upper bound (inclusive) of the distance classified as [`FeedbackTier::VeryClose`].
const VERY_CLOSE_MAX: u8 = 5;
/// Upper bound (inclusive) of the distance classified as [`FeedbackTier::Close`].
const CLOSE_MAX: u8 = 10;
/// Upper bound (inclusive) of the distance classified as [`FeedbackTier::Warm`].
const WARM_MAX: u8 = 20;

/// Which side of the target a guess fell on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Direction {
    /// Guess was below the target.
    #[strum(serialize = "too low")]
    TooLow,
    /// Guess was above the target.
    #[strum(serialize = "too high")]
    TooHigh,
}

/// How close a guess landed, most specific first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackTier {
    /// The guess equals the target.
    Exact,
    /// Within 5 of the target.
    VeryClose,
    /// Within 10 of the target.
    Close,
    /// Within 20 of the target.
    Warm(Direction),
    /// More than 20 away.
    Cold(Direction),
}

impl FeedbackTier {
    /// Returns the direction hint, if this tier carries one.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::Warm(direction) | Self::Cold(direction) => Some(direction),
            Self::Exact | Self::VeryClose | Self::Close => None,
        }
    }

    /// Returns true for the winning tier.
    pub fn is_exact(self) -> bool {
        matches!(self, Self::Exact)
    }

    /// Player-facing message for this tier.
    pub fn message(self) -> &'static str {
        match self {
            Self::Exact => "INCREDIBLE! You got it exactly right!",
            Self::VeryClose => "You're burning hot! So close!",
            Self::Close => "Getting warmer! You're very close!",
            Self::Warm(Direction::TooLow) => "Too low, but you're on the right track!",
            Self::Warm(Direction::TooHigh) => "Too high, but you're getting there!",
            Self::Cold(Direction::TooLow) => "Way too low! Think bigger!",
            Self::Cold(Direction::TooHigh) => "Way too high! Think smaller!",
        }
    }
}

impl std::fmt::Display for FeedbackTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Classifies `guess` against `target`.
///
/// Tiers are decided by `|guess - target|` with inclusive thresholds
/// checked in ascending order; `Warm` and `Cold` also carry the direction.
#[instrument]
pub fn classify(guess: Guess, target: Guess) -> FeedbackTier {
    let distance = guess.value().abs_diff(target.value());
    let direction = if guess < target {
        Direction::TooLow
    } else {
        Direction::TooHigh
    };

    match distance {
        0 => FeedbackTier::Exact,
        d if d <= VERY_CLOSE_MAX => FeedbackTier::VeryClose,
        d if d <= CLOSE_MAX => FeedbackTier::Close,
        d if d <= WARM_MAX => FeedbackTier::Warm(direction),
        _ => FeedbackTier::Cold(direction),
    }
}

//! Pure number-guessing round logic.
//!
//! Nothing in this crate performs I/O. Randomness and time are injected
//! through [`TargetSource`] and [`Clock`] so every round can be replayed
//! deterministically.
//!
//! # Example
//!
//! ```
//! use strictly_guess_core::{FixedTargets, GuessOutcome, ManualClock, RoundEngine};
//!
//! let clock = ManualClock::new(0);
//! let mut engine = RoundEngine::new(FixedTargets::new([42]), clock.clone());
//! engine.start("Ann");
//!
//! clock.advance_ms(3_000);
//! match engine.submit_guess("42").unwrap() {
//!     GuessOutcome::Won { result, .. } => assert_eq!(*result.score(), 117),
//!     GuessOutcome::Continue { .. } => unreachable!(),
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod clock;
mod error;
mod feedback;
mod guess;
mod result;
mod round;
mod scoring;
mod target;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::RoundError;
pub use feedback::{Direction, FeedbackTier, classify};
pub use guess::{GUESS_MAX, GUESS_MIN, Guess};
pub use result::GameResult;
pub use round::{
    ANONYMOUS_PLAYER, GuessOutcome, GuessRecord, Round, RoundEngine, RoundStatus,
    player_name_for,
};
pub use scoring::{Difficulty, PerformanceRating, score};
pub use target::{FixedTargets, SeededTargets, TargetSource, ThreadRngTargets};

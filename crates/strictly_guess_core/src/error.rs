//! Round errors.

use derive_more::{Display, Error};

/// Recoverable failures reported by the round engine.
///
/// None of these change round state.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum RoundError {
    /// Input was not an integer in `[1, 100]`.
    #[display("Invalid guess '{}': enter a whole number between 1 and 100", raw)]
    InvalidGuess {
        /// The rejected input, verbatim.
        raw: String,
    },

    /// The round was already won; start a new one to keep playing.
    #[display("Round already complete, start a new round to play again")]
    RoundAlreadyComplete,

    /// A guess arrived before any round was started.
    #[display("No active round, start a round first")]
    NoActiveRound,
}

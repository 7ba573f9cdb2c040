//! The immutable record of a won round.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Outcome of one won round, as persisted.
///
/// Field names on the wire follow the stored layout: `playerName`, `score`,
/// `attempts`, `timeTaken` (seconds), `timestamp` (epoch milliseconds) and
/// `targetNumber`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    player_name: String,
    score: u32,
    attempts: u32,
    #[serde(rename = "timeTaken")]
    time_taken_seconds: u64,
    timestamp: i64,
    target_number: u8,
}

impl GameResult {
    /// One-line brag suitable for sharing.
    pub fn share_text(&self) -> String {
        format!(
            "I just scored {} points in the Number Guessing Game! I guessed the number {} in {} attempts! Can you beat my score?",
            self.score, self.target_number, self.attempts
        )
    }
}

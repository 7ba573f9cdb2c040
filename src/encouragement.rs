//! Encouragement: a deterministic cheer line, plus a fire-and-forget side
//! channel for richer, externally generated text.
//!
//! Nothing in the round or scoring path waits on the side channel or reads
//! anything back from it.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};

/// Lines used once the per-attempt table runs out, rotated by attempt count.
const ROTATING_LINES: [&str; 5] = [
    "Keep it up, {name}!",
    "You're doing amazing!",
    "Great strategy!",
    "Trust your instincts!",
    "You've got this!",
];

/// A short cheer for the player after `attempts` guesses.
#[instrument]
pub fn cheer(attempts: u32, player_name: &str) -> String {
    let line = match attempts {
        1 => "Wow! Great first try!",
        2 => "Excellent intuition!",
        3 => "Three's a charm!",
        4 => "Building great strategy!",
        5 => "Halfway there! Keep going!",
        6 => "Every guess teaches you something!",
        7 => "You're in the zone!",
        8 => "Almost there!",
        9 => "One more push!",
        10 => "Double digits! You're thinking this through!",
        n => ROTATING_LINES[n as usize % ROTATING_LINES.len()],
    };
    line.replace("{name}", player_name)
}

/// Context handed to an external encouragement generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct EncouragementRequest {
    guess: u8,
    target_number: u8,
    attempts: u32,
    player_name: String,
}

/// Receives encouragement requests without blocking the caller.
pub trait EncouragementSink {
    /// Hands off `request`. Failures are the sink's problem, never the caller's.
    fn offer(&self, request: EncouragementRequest);
}

/// Drops every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEncouragement;

impl EncouragementSink for NoEncouragement {
    fn offer(&self, _request: EncouragementRequest) {}
}

/// Forwards requests to an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelEncouragement {
    sender: mpsc::UnboundedSender<EncouragementRequest>,
}

impl ChannelEncouragement {
    /// Creates the sink and the receiver a generator task should drain.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<EncouragementRequest>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl EncouragementSink for ChannelEncouragement {
    #[instrument(skip(self, request), fields(attempts = request.attempts))]
    fn offer(&self, request: EncouragementRequest) {
        match self.sender.send(request) {
            Ok(()) => debug!("Encouragement request queued"),
            Err(_) => warn!("Encouragement receiver gone, dropping request"),
        }
    }
}

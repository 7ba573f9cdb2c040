//! The round state machine.
//!
//! A [`RoundEngine`] owns at most one [`Round`]. Starting a new round
//! discards the previous one unconditionally. A round is `Playing` until a
//! guess hits the target, then `Won` for good; there is no losing state and
//! no attempt cap.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{
    Clock, FeedbackTier, GameResult, Guess, RoundError, SystemClock, TargetSource,
    ThreadRngTargets, classify, score,
};

/// Name recorded when the caller supplies a blank one.
pub const ANONYMOUS_PLAYER: &str = "Anonymous Player";

/// The name a round records for `raw`: trimmed, or [`ANONYMOUS_PLAYER`] when blank.
#[instrument]
pub fn player_name_for(raw: &str) -> String {
    match raw.trim() {
        "" => ANONYMOUS_PLAYER.to_string(),
        name => name.to_string(),
    }
}

/// Lifecycle of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundStatus {
    /// Accepting guesses.
    Playing,
    /// Target found. Terminal.
    Won,
}

/// One validated guess and how it was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GuessRecord {
    guess: Guess,
    tier: FeedbackTier,
}

/// State of a single play session.
#[derive(Debug, Clone, Getters)]
pub struct Round {
    player_name: String,
    target: Guess,
    attempts: u32,
    history: Vec<GuessRecord>,
    status: RoundStatus,
    started_at_ms: i64,
}

impl Round {
    /// Up to `n` most recent guesses, oldest first.
    #[instrument(skip(self))]
    pub fn recent(&self, n: usize) -> &[GuessRecord] {
        let start = self.history.len().saturating_sub(n);
        &self.history[start..]
    }

    /// True once the target has been found.
    pub fn is_won(&self) -> bool {
        self.status == RoundStatus::Won
    }
}

/// What a validated guess did to the round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Missed; the round keeps going.
    Continue {
        /// The recorded guess.
        record: GuessRecord,
        /// Attempts so far, this one included.
        attempts: u32,
    },
    /// Hit; the round is over.
    Won {
        /// The recorded guess (always [`FeedbackTier::Exact`]).
        record: GuessRecord,
        /// The result to hand to a store.
        result: GameResult,
    },
}

impl GuessOutcome {
    /// The recorded guess, whichever way it went.
    pub fn record(&self) -> &GuessRecord {
        match self {
            Self::Continue { record, .. } | Self::Won { record, .. } => record,
        }
    }

    /// Classification of the guess.
    pub fn tier(&self) -> FeedbackTier {
        self.record().tier
    }
}

/// Drives rounds: draws targets, validates guesses, scores wins.
///
/// The engine never persists anything; a win yields a [`GameResult`] for the
/// caller to store.
#[derive(Debug)]
pub struct RoundEngine<T = ThreadRngTargets, C = SystemClock> {
    targets: T,
    clock: C,
    round: Option<Round>,
}

impl Default for RoundEngine {
    fn default() -> Self {
        Self::new(ThreadRngTargets, SystemClock)
    }
}

impl<T: TargetSource, C: Clock> RoundEngine<T, C> {
    /// Creates an engine with no active round.
    pub fn new(targets: T, clock: C) -> Self {
        Self {
            targets,
            clock,
            round: None,
        }
    }

    /// The current round, if any.
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Starts a fresh round for `player_name`, replacing any prior round.
    ///
    /// A blank name is recorded as [`ANONYMOUS_PLAYER`].
    #[instrument(skip(self, player_name))]
    pub fn start(&mut self, player_name: impl Into<String>) -> &Round {
        let player_name = player_name_for(&player_name.into());

        if let Some(previous) = &self.round
            && !previous.is_won()
        {
            debug!(
                attempts = previous.attempts,
                "Discarding unfinished round"
            );
        }

        let target = self.targets.next_target();
        let started_at_ms = self.clock.now_ms();
        info!(player = %player_name, started_at_ms, "Round started");

        self.round.insert(Round {
            player_name,
            target,
            attempts: 0,
            history: Vec::new(),
            status: RoundStatus::Playing,
            started_at_ms,
        })
    }

    /// Parses and submits raw player input.
    ///
    /// # Errors
    ///
    /// - [`RoundError::NoActiveRound`] before the first [`start`](Self::start).
    /// - [`RoundError::RoundAlreadyComplete`] once the round is won.
    /// - [`RoundError::InvalidGuess`] when `raw` is not an integer in `[1, 100]`.
    ///
    /// Round state is untouched on every error.
    #[instrument(skip(self))]
    pub fn submit_guess(&mut self, raw: &str) -> Result<GuessOutcome, RoundError> {
        self.ensure_playing()?;
        let guess = Guess::parse(raw).inspect_err(|e| debug!(error = %e, "Rejected guess"))?;
        self.submit(guess)
    }

    /// Submits an already validated guess.
    ///
    /// # Errors
    ///
    /// Same as [`submit_guess`](Self::submit_guess), minus validation.
    #[instrument(skip(self, guess), fields(guess = %guess))]
    pub fn submit(&mut self, guess: Guess) -> Result<GuessOutcome, RoundError> {
        self.ensure_playing()?;
        let now_ms = self.clock.now_ms();
        let round = self.round.as_mut().ok_or(RoundError::NoActiveRound)?;

        round.attempts += 1;
        let tier = classify(guess, round.target);
        let record = GuessRecord { guess, tier };
        round.history.push(record);
        debug!(attempts = round.attempts, ?tier, "Guess recorded");

        if !tier.is_exact() {
            return Ok(GuessOutcome::Continue {
                record,
                attempts: round.attempts,
            });
        }

        let elapsed_seconds = (now_ms - round.started_at_ms).max(0) as u64 / 1_000;
        let points = score(round.attempts, elapsed_seconds);
        round.status = RoundStatus::Won;

        let result = GameResult::new(
            round.player_name.clone(),
            points,
            round.attempts,
            elapsed_seconds,
            now_ms,
            round.target.value(),
        );
        info!(
            player = %round.player_name,
            attempts = round.attempts,
            elapsed_seconds,
            score = points,
            "Round won"
        );

        Ok(GuessOutcome::Won { record, result })
    }

    fn ensure_playing(&self) -> Result<(), RoundError> {
        match &self.round {
            None => {
                warn!("Guess submitted with no active round");
                Err(RoundError::NoActiveRound)
            }
            Some(round) if round.is_won() => {
                debug!("Guess submitted after round was won");
                Err(RoundError::RoundAlreadyComplete)
            }
            Some(_) => Ok(()),
        }
    }
}

//! Game service: one round engine wired to one result store.

use derive_more::{Display, Error, From};
use strictly_guess_core::{
    Clock, GameResult, GuessOutcome, Round, RoundEngine, RoundError, TargetSource,
    player_name_for,
};
use tracing::{debug, info, instrument, warn};

use crate::{
    BlobBackend, DbError, EncouragementRequest, EncouragementSink, LeaderboardEntry,
    LeaderboardRanker, NoEncouragement, PlayerStats, ResultStore, StatsAggregator,
};

/// Failure while playing through the service.
#[derive(Debug, Clone, Display, Error, From)]
pub enum PlayError {
    /// The engine rejected the guess.
    #[display("{}", _0)]
    Round(RoundError),
    /// The round was won but the result could not be saved.
    #[display("{}", _0)]
    Store(DbError),
}

/// Plays rounds and keeps the result log in step with them.
///
/// A winning guess is appended to the store before it is reported, so every
/// stored result corresponds to exactly one won round.
pub struct GuessingService<B, T, C> {
    engine: RoundEngine<T, C>,
    store: ResultStore<B>,
    encouragement: Box<dyn EncouragementSink>,
}

impl<B, T, C> std::fmt::Debug for GuessingService<B, T, C>
where
    B: std::fmt::Debug,
    T: std::fmt::Debug,
    C: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuessingService")
            .field("engine", &self.engine)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl<B: BlobBackend, T: TargetSource, C: Clock> GuessingService<B, T, C> {
    /// Creates a service with encouragement disabled.
    #[instrument(skip(engine, store))]
    pub fn new(engine: RoundEngine<T, C>, store: ResultStore<B>) -> Self {
        info!(key = %store.key(), "Creating GuessingService");
        Self {
            engine,
            store,
            encouragement: Box::new(NoEncouragement),
        }
    }

    /// Routes encouragement requests for missed guesses to `sink`.
    pub fn with_encouragement(mut self, sink: impl EncouragementSink + 'static) -> Self {
        self.encouragement = Box::new(sink);
        self
    }

    /// The result log.
    pub fn store(&self) -> &ResultStore<B> {
        &self.store
    }

    /// The current round, if any.
    pub fn round(&self) -> Option<&Round> {
        self.engine.round()
    }

    /// Starts a new round, discarding any unfinished one.
    #[instrument(skip(self))]
    pub fn start_round(&mut self, player_name: &str) -> &Round {
        self.engine.start(player_name)
    }

    /// Submits raw input to the current round.
    ///
    /// On a miss an encouragement request is offered to the side channel.
    /// On a win the result is appended to the store first.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::Round`] for rejected guesses (round unchanged) and
    /// [`PlayError::Store`] when a winning result could not be saved.
    #[instrument(skip(self))]
    pub fn guess(&mut self, raw: &str) -> Result<GuessOutcome, PlayError> {
        let outcome = self.engine.submit_guess(raw)?;

        match &outcome {
            GuessOutcome::Continue { record, attempts } => {
                if let Some(round) = self.engine.round() {
                    self.encouragement.offer(EncouragementRequest::new(
                        record.guess().value(),
                        round.target().value(),
                        *attempts,
                        round.player_name().clone(),
                    ));
                }
            }
            GuessOutcome::Won { result, .. } => {
                self.store.append(result.clone()).inspect_err(|e| {
                    warn!(error = %e, "Won round could not be saved");
                })?;
                debug!("Winning result saved");
            }
        }

        Ok(outcome)
    }

    /// The best `n` stored results.
    #[instrument(skip(self))]
    pub fn leaderboard(&self, n: usize) -> Vec<GameResult> {
        LeaderboardRanker::new(&self.store).top_n(n)
    }

    /// The best `n` stored results with ranks attached.
    #[instrument(skip(self))]
    pub fn leaderboard_entries(&self, n: usize) -> Vec<LeaderboardEntry> {
        LeaderboardRanker::new(&self.store).entries(n)
    }

    /// Aggregates for `name`, normalized the way rounds record it.
    #[instrument(skip(self))]
    pub fn player_stats(&self, name: &str) -> PlayerStats {
        StatsAggregator::new(&self.store).for_player(&player_name_for(name))
    }
}

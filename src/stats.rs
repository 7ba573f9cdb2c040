//! Per-player aggregates over stored results.

use derive_getters::Getters;
use strictly_guess_core::GameResult;
use tracing::{debug, info, instrument};

use crate::{BlobBackend, ResultStore};

/// Mean of `total / count`, rounded half up. Zero when `count` is zero.
fn rounded_mean(total: u64, count: u64) -> u64 {
    if count == 0 {
        0
    } else {
        (2 * total + count) / (2 * count)
    }
}

/// Summary of one player's won rounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct PlayerStats {
    total_games: u64,
    best_score: u32,
    average_attempts: u64,
    average_time_seconds: u64,
    total_score: u64,
    /// Newest first.
    recent: Vec<GameResult>,
}

impl PlayerStats {
    /// Aggregates the results belonging to `name` out of `results`.
    ///
    /// No matching results yields an all-zero summary.
    #[instrument(skip(results))]
    pub fn from_results(name: &str, results: Vec<GameResult>) -> Self {
        let mut recent: Vec<GameResult> = results
            .into_iter()
            .filter(|r| r.player_name() == name)
            .collect();
        if recent.is_empty() {
            debug!("No results for player");
            return Self::default();
        }

        let total_games = recent.len() as u64;
        let best_score = recent.iter().map(|r| *r.score()).max().unwrap_or(0);
        let total_score = recent.iter().map(|r| u64::from(*r.score())).sum();
        let total_attempts: u64 = recent.iter().map(|r| u64::from(*r.attempts())).sum();
        let total_time: u64 = recent.iter().map(|r| *r.time_taken_seconds()).sum();

        recent.sort_by(|a, b| b.timestamp().cmp(a.timestamp()));

        Self {
            total_games,
            best_score,
            average_attempts: rounded_mean(total_attempts, total_games),
            average_time_seconds: rounded_mean(total_time, total_games),
            total_score,
            recent,
        }
    }

    /// True when the player has no stored results.
    pub fn is_empty(&self) -> bool {
        self.total_games == 0
    }
}

/// Per-player queries against a [`ResultStore`].
#[derive(Debug)]
pub struct StatsAggregator<'a, B> {
    store: &'a ResultStore<B>,
}

impl<'a, B: BlobBackend> StatsAggregator<'a, B> {
    /// Creates an aggregator reading from `store`.
    #[instrument(skip(store), fields(key = %store.key()))]
    pub fn new(store: &'a ResultStore<B>) -> Self {
        Self { store }
    }

    /// Summary for the player named exactly `name`.
    #[instrument(skip(self))]
    pub fn for_player(&self, name: &str) -> PlayerStats {
        let stats = PlayerStats::from_results(name, self.store.load_all());
        info!(
            player = %name,
            total_games = stats.total_games,
            best_score = stats.best_score,
            "Player stats computed"
        );
        stats
    }
}

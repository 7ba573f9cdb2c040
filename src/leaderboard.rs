//! Ranked view over every stored result.

use std::cmp::Ordering;

use derive_getters::Getters;
use strictly_guess_core::GameResult;
use tracing::{debug, instrument};

use crate::{BlobBackend, ResultStore};

/// Orders results best first: higher score, then fewer attempts, then less
/// time. Full ties compare equal.
#[instrument(level = "trace")]
pub fn compare_results(a: &GameResult, b: &GameResult) -> Ordering {
    b.score()
        .cmp(a.score())
        .then_with(|| a.attempts().cmp(b.attempts()))
        .then_with(|| a.time_taken_seconds().cmp(b.time_taken_seconds()))
}

/// Returns the best `n` results.
///
/// The sort is stable, so full ties keep their insertion order.
#[instrument(skip(results))]
pub fn rank(mut results: Vec<GameResult>, n: usize) -> Vec<GameResult> {
    results.sort_by(compare_results);
    results.truncate(n);
    results
}

/// A leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct LeaderboardEntry {
    rank: usize,
    result: GameResult,
}

impl LeaderboardEntry {
    /// Medal for the podium, `None` below third place.
    pub fn medal(&self) -> Option<&'static str> {
        match self.rank {
            1 => Some("🥇"),
            2 => Some("🥈"),
            3 => Some("🥉"),
            _ => None,
        }
    }

    /// Medal on the podium, `"<rank>."` elsewhere.
    pub fn rank_label(&self) -> String {
        self.medal()
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}.", self.rank))
    }
}

/// Leaderboard queries against a [`ResultStore`].
#[derive(Debug)]
pub struct LeaderboardRanker<'a, B> {
    store: &'a ResultStore<B>,
}

impl<'a, B: BlobBackend> LeaderboardRanker<'a, B> {
    /// Creates a ranker reading from `store`.
    #[instrument(skip(store), fields(key = %store.key()))]
    pub fn new(store: &'a ResultStore<B>) -> Self {
        Self { store }
    }

    /// The best `min(n, total)` results, best first.
    #[instrument(skip(self))]
    pub fn top_n(&self, n: usize) -> Vec<GameResult> {
        let ranked = rank(self.store.load_all(), n);
        debug!(returned = ranked.len(), "Leaderboard ranked");
        ranked
    }

    /// Like [`top_n`](Self::top_n), with 1-based ranks attached.
    #[instrument(skip(self))]
    pub fn entries(&self, n: usize) -> Vec<LeaderboardEntry> {
        self.top_n(n)
            .into_iter()
            .enumerate()
            .map(|(i, result)| LeaderboardEntry { rank: i + 1, result })
            .collect()
    }
}

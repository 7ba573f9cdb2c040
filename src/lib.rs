//! Strictly Guessing library - number-guessing rounds with a persisted
//! leaderboard and per-player statistics.
//!
//! # Architecture
//!
//! - **Core** (`strictly_guess_core`): feedback classification, scoring and
//!   the round state machine. Pure, no I/O.
//! - **Store**: append-only result log kept as one named blob, in SQLite or
//!   in memory.
//! - **Views**: leaderboard ranking and per-player statistics, computed from
//!   the full log on every query.
//! - **Service**: wires an engine to a store so wins are saved as they happen.
//!
//! # Example
//!
//! ```
//! use strictly_guessing::{
//!     FixedTargets, GuessOutcome, GuessingService, ManualClock, MemoryBlobs, ResultStore,
//!     RoundEngine,
//! };
//!
//! let engine = RoundEngine::new(FixedTargets::new([30]), ManualClock::new(0));
//! let mut service = GuessingService::new(engine, ResultStore::new(MemoryBlobs::new()));
//!
//! service.start_round("Ann");
//! assert!(matches!(service.guess("50"), Ok(GuessOutcome::Continue { .. })));
//! assert!(matches!(service.guess("30"), Ok(GuessOutcome::Won { .. })));
//! assert_eq!(service.leaderboard(10).len(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod db;
mod encouragement;
mod leaderboard;
mod service;
mod stats;
mod store;
mod terminal;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Persistence
pub use db::{Blob, BlobRepository, DbError, DbErrorKind, MIGRATIONS, NewBlob};
pub use store::{BlobBackend, DEFAULT_RESULTS_KEY, MemoryBlobs, ResultStore, StoreError};

// Crate-level exports - Read-side views
pub use leaderboard::{LeaderboardEntry, LeaderboardRanker, compare_results, rank};
pub use stats::{PlayerStats, StatsAggregator};

// Crate-level exports - Encouragement
pub use encouragement::{
    ChannelEncouragement, EncouragementRequest, EncouragementSink, NoEncouragement, cheer,
};

// Crate-level exports - Service and front-end
pub use service::{GuessingService, PlayError};
pub use terminal::{play_round, play_session, write_leaderboard, write_player_stats, write_rules};

// Crate-level exports - Core game types
pub use strictly_guess_core::{
    ANONYMOUS_PLAYER, Clock, Difficulty, Direction, FeedbackTier, FixedTargets, GUESS_MAX,
    GUESS_MIN, GameResult, Guess, GuessOutcome, GuessRecord, ManualClock, PerformanceRating,
    Round, RoundEngine, RoundError, RoundStatus, SeededTargets, SystemClock, TargetSource,
    ThreadRngTargets, classify, player_name_for, score,
};

//! Scoring policy and the informational ratings derived from attempt counts.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use tracing::instrument;

/// Base points before any attempts are deducted.
const BASE_CEILING: u32 = 110;
/// Points deducted per attempt.
const POINTS_PER_ATTEMPT: u32 = 10;
/// The base never drops below this.
const BASE_FLOOR: u32 = 10;
/// Time bonus for an instant win; one point is lost per elapsed second.
const TIME_BONUS_MAX: u64 = 20;

/// Computes the score for a won round.
///
/// `base = max(110 - 10 * attempts, 10)` and
/// `bonus = max(20 - elapsed_seconds, 0)`. The result is never below 10 and,
/// since `attempts >= 1`, never above 120.
#[instrument]
pub fn score(attempts: u32, elapsed_seconds: u64) -> u32 {
    let base = BASE_CEILING
        .saturating_sub(attempts.saturating_mul(POINTS_PER_ATTEMPT))
        .max(BASE_FLOOR);
    let bonus = TIME_BONUS_MAX.saturating_sub(elapsed_seconds) as u32;
    base + bonus
}

/// Difficulty shown while a round is in progress.
///
/// Purely informational; the round never ends on difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Difficulty {
    /// Up to three attempts.
    Easy,
    /// Four to six attempts.
    Medium,
    /// Seven or more attempts.
    Hard,
}

impl Difficulty {
    /// Difficulty for the given number of attempts so far.
    #[instrument]
    pub fn for_attempts(attempts: u32) -> Self {
        match attempts {
            0..=3 => Self::Easy,
            4..=6 => Self::Medium,
            _ => Self::Hard,
        }
    }
}

/// Post-win rating of how efficiently the target was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum PerformanceRating {
    /// First try.
    #[strum(serialize = "PERFECT! First try - you're a natural!")]
    Perfect,
    /// Two or three attempts.
    #[strum(serialize = "EXCELLENT! Great intuition!")]
    Excellent,
    /// Four to six attempts.
    #[strum(serialize = "GOOD JOB! Solid performance!")]
    Good,
    /// Anything longer.
    #[strum(serialize = "WELL DONE! Persistence pays off!")]
    WellDone,
}

impl PerformanceRating {
    /// Rating for a round won in `attempts` attempts.
    #[instrument]
    pub fn for_attempts(attempts: u32) -> Self {
        match attempts {
            0 | 1 => Self::Perfect,
            2..=3 => Self::Excellent,
            4..=6 => Self::Good,
            _ => Self::WellDone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_scores() {
        assert_eq!(score(1, 0), 120);
        assert_eq!(score(5, 10), 70);
        assert_eq!(score(10, 25), 10);
        assert_eq!(score(20, 0), 30);
    }

    #[test]
    fn test_matches_closed_form_over_grid() {
        for attempts in 1..=20u32 {
            for elapsed in 0..=60u64 {
                let base = (110 - 10 * attempts as i64).max(10);
                let bonus = (20 - elapsed as i64).max(0);
                assert_eq!(
                    score(attempts, elapsed) as i64,
                    base + bonus,
                    "attempts={attempts} elapsed={elapsed}"
                );
            }
        }
    }

    #[test]
    fn test_monotonic_non_increasing() {
        for attempts in 1..=15u32 {
            for elapsed in 0..=30u64 {
                assert!(score(attempts + 1, elapsed) <= score(attempts, elapsed));
                assert!(score(attempts, elapsed + 1) <= score(attempts, elapsed));
            }
        }
    }

    #[test]
    fn test_floor_survives_huge_inputs() {
        assert_eq!(score(u32::MAX, u64::MAX), 10);
    }

    #[test]
    fn test_difficulty_bands() {
        assert_eq!(Difficulty::for_attempts(0), Difficulty::Easy);
        assert_eq!(Difficulty::for_attempts(3), Difficulty::Easy);
        assert_eq!(Difficulty::for_attempts(4), Difficulty::Medium);
        assert_eq!(Difficulty::for_attempts(6), Difficulty::Medium);
        assert_eq!(Difficulty::for_attempts(7), Difficulty::Hard);
    }

    #[test]
    fn test_performance_bands() {
        assert_eq!(PerformanceRating::for_attempts(1), PerformanceRating::Perfect);
        assert_eq!(PerformanceRating::for_attempts(3), PerformanceRating::Excellent);
        assert_eq!(PerformanceRating::for_attempts(6), PerformanceRating::Good);
        assert_eq!(PerformanceRating::for_attempts(12), PerformanceRating::WellDone);
    }
}

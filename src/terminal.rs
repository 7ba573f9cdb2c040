//! Line-oriented terminal front-end.
//!
//! Reads guesses from any [`BufRead`] and writes prompts and feedback to any
//! [`Write`], so sessions can be scripted in tests.

use std::io::{BufRead, Write};

use anyhow::Result;
use strictly_guess_core::{
    Clock, Difficulty, GameResult, GuessOutcome, PerformanceRating, TargetSource,
};
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

use crate::{BlobBackend, GuessingService, LeaderboardEntry, PlayError, PlayerStats, cheer};

/// Guesses echoed back under the progress line.
const RECENT_GUESSES_SHOWN: usize = 3;

/// Reads one line. `None` on end of input.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Plays one round to completion.
///
/// Returns the saved result, or `None` if input ended first (the round is
/// abandoned and nothing is saved).
///
/// # Errors
///
/// Fails on I/O errors and when a winning result cannot be saved.
#[instrument(skip(service, input, out))]
pub fn play_round<B, T, C, R, W>(
    service: &mut GuessingService<B, T, C>,
    player_name: &str,
    input: &mut R,
    out: &mut W,
) -> Result<Option<GameResult>>
where
    B: BlobBackend,
    T: TargetSource,
    C: Clock,
    R: BufRead,
    W: Write,
{
    let player_name = service.start_round(player_name).player_name().clone();
    writeln!(out, "\nWelcome, {}!", player_name)?;
    writeln!(out, "I'm thinking of a number between 1 and 100...")?;

    loop {
        let attempt = service.round().map_or(0, |r| *r.attempts()) + 1;
        write!(out, "Attempt #{} - Enter your guess: ", attempt)?;
        out.flush()?;

        let Some(line) = read_line(input)? else {
            writeln!(out, "\nRound abandoned.")?;
            info!("Input ended mid-round");
            return Ok(None);
        };

        match service.guess(&line) {
            Ok(GuessOutcome::Continue { record, attempts }) => {
                writeln!(out, "{} {}", record.tier(), cheer(attempts, &player_name))?;
                write_progress(service, out)?;
            }
            Ok(GuessOutcome::Won { result, .. }) => {
                write_victory(&result, out)?;
                return Ok(Some(result));
            }
            Err(PlayError::Round(e)) => {
                debug!(error = %e, "Re-prompting");
                writeln!(out, "{}", e)?;
            }
            Err(PlayError::Store(e)) => return Err(e.into()),
        }
    }
}

/// Plays rounds until input ends or the player declines another.
///
/// Returns the results saved during the session.
///
/// # Errors
///
/// Fails on I/O errors and when a winning result cannot be saved.
#[instrument(skip(service, input, out))]
pub fn play_session<B, T, C, R, W>(
    service: &mut GuessingService<B, T, C>,
    player_name: &str,
    input: &mut R,
    out: &mut W,
) -> Result<Vec<GameResult>>
where
    B: BlobBackend,
    T: TargetSource,
    C: Clock,
    R: BufRead,
    W: Write,
{
    let mut saved = Vec::new();
    while let Some(result) = play_round(service, player_name, input, out)? {
        saved.push(result);

        write!(out, "Play again? [y/N]: ")?;
        out.flush()?;
        let again = read_line(input)?
            .is_some_and(|answer| matches!(answer.to_lowercase().as_str(), "y" | "yes"));
        if !again {
            break;
        }
    }
    writeln!(out, "Thanks for playing! See you next time!")?;
    info!(rounds_won = saved.len(), "Session finished");
    Ok(saved)
}

fn write_progress<B, T, C, W>(service: &GuessingService<B, T, C>, out: &mut W) -> Result<()>
where
    B: BlobBackend,
    T: TargetSource,
    C: Clock,
    W: Write,
{
    let Some(round) = service.round() else {
        return Ok(());
    };
    writeln!(
        out,
        "Attempts: {} | Difficulty: {}",
        round.attempts(),
        Difficulty::for_attempts(*round.attempts())
    )?;

    let history = round.history();
    if history.len() > 1 {
        writeln!(out, "Recent guesses:")?;
        let earlier = &history[..history.len() - 1];
        let start = earlier.len().saturating_sub(RECENT_GUESSES_SHOWN);
        for record in &earlier[start..] {
            writeln!(out, "   {} - {}", record.guess(), record.tier())?;
        }
    }
    Ok(())
}

fn write_victory<W: Write>(result: &GameResult, out: &mut W) -> Result<()> {
    writeln!(out, "\nCONGRATULATIONS!")?;
    writeln!(
        out,
        "You guessed {} in {} attempts!",
        result.target_number(),
        result.attempts()
    )?;
    writeln!(out, "Time taken: {} seconds", result.time_taken_seconds())?;
    writeln!(out, "Final Score: {} points", result.score())?;
    writeln!(out, "{}", PerformanceRating::for_attempts(*result.attempts()))?;
    writeln!(out, "{}", result.share_text())?;
    Ok(())
}

/// Formats epoch milliseconds as a local-agnostic UTC timestamp.
fn format_timestamp(timestamp_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(timestamp_ms)
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "unknown time".to_string())
}

/// Prints leaderboard rows.
///
/// # Errors
///
/// Fails on I/O errors.
#[instrument(skip_all, fields(rows = entries.len()))]
pub fn write_leaderboard<W: Write>(entries: &[LeaderboardEntry], out: &mut W) -> Result<()> {
    writeln!(out, "GLOBAL LEADERBOARD")?;
    if entries.is_empty() {
        writeln!(out, "No games played yet! Be the first to set a record!")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<5} {:<20} {:>6} {:>9} {:>6}",
        "Rank", "Player", "Score", "Attempts", "Time"
    )?;
    for entry in entries {
        let result = entry.result();
        let name: String = result.player_name().chars().take(19).collect();
        writeln!(
            out,
            "{:<5} {:<20} {:>6} {:>9} {:>5}s",
            entry.rank_label(),
            name,
            result.score(),
            result.attempts(),
            result.time_taken_seconds()
        )?;
    }
    Ok(())
}

/// Prints a player summary and up to `recent_shown` of their newest games.
///
/// # Errors
///
/// Fails on I/O errors.
#[instrument(skip(stats, out))]
pub fn write_player_stats<W: Write>(
    player_name: &str,
    stats: &PlayerStats,
    recent_shown: usize,
    out: &mut W,
) -> Result<()> {
    if stats.is_empty() {
        writeln!(out, "No games found for player: {}", player_name)?;
        return Ok(());
    }

    writeln!(out, "PLAYER STATISTICS: {}", player_name)?;
    writeln!(out, "Total Games: {}", stats.total_games())?;
    writeln!(out, "Best Score: {} points", stats.best_score())?;
    writeln!(out, "Total Score: {} points", stats.total_score())?;
    writeln!(out, "Average Attempts: {}", stats.average_attempts())?;
    writeln!(out, "Average Time: {} seconds", stats.average_time_seconds())?;

    writeln!(out, "Recent Games:")?;
    let total = stats.recent().len();
    for (i, game) in stats.recent().iter().take(recent_shown).enumerate() {
        writeln!(
            out,
            "Game #{} ({}) - Score: {}, Attempts: {}, Time: {}s",
            total - i,
            format_timestamp(*game.timestamp()),
            game.score(),
            game.attempts(),
            game.time_taken_seconds()
        )?;
    }
    Ok(())
}

/// Prints the rules and scoring table.
///
/// # Errors
///
/// Fails on I/O errors.
#[instrument(skip(out))]
pub fn write_rules<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "GAME RULES")?;
    writeln!(out, "Objective: guess the secret number between 1 and 100.")?;
    writeln!(out, "Scoring:")?;
    writeln!(out, "  1st attempt: 100 points + time bonus")?;
    writeln!(out, "  2nd attempt: 90 points + time bonus")?;
    writeln!(out, "  Each further attempt: -10 points (minimum 10)")?;
    writeln!(out, "  Time bonus: 20 points, minus 1 per second taken")?;
    writeln!(out, "Feedback:")?;
    writeln!(out, "  within 5: burning hot, within 10: getting warmer")?;
    writeln!(out, "  within 20: too low / too high, beyond: way off")?;
    writeln!(out, "Ratings:")?;
    for rating in PerformanceRating::iter() {
        writeln!(out, "  {}", rating)?;
    }
    Ok(())
}

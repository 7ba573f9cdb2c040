//! Command-line interface for strictly_guessing.

use clap::{Parser, Subcommand};

/// Strictly Guessing - guess the hidden number, climb the leaderboard
#[derive(Parser, Debug)]
#[command(name = "strictly_guessing")]
#[command(about = "Number-guessing game with a persisted leaderboard", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (optional)
    #[arg(long, global = true, default_value = "strictly_guessing.toml")]
    pub config: std::path::PathBuf,

    /// Database file, overrides the config
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Keep results in memory only for this invocation
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactive rounds on stdin/stdout
    Play {
        /// Player name (prompted for when omitted)
        #[arg(short, long)]
        name: Option<String>,

        /// Seed for reproducible targets, overrides the config
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show the best results
    Leaderboard {
        /// Rows to show, overrides the config
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show one player's statistics
    Stats {
        /// Player name (exact match)
        name: String,

        /// Recent games to list, overrides the config
        #[arg(long)]
        recent: Option<usize>,
    },

    /// Print the rules and scoring table
    Rules,
}

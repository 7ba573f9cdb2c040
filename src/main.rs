//! Strictly Guessing - CLI entry point.

#![warn(missing_docs)]

mod cli;

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use strictly_guessing::{
    BlobBackend, BlobRepository, GameConfig, GuessingService, LeaderboardRanker, MemoryBlobs,
    ResultStore, RoundEngine, SeededTargets, StatsAggregator, SystemClock, TargetSource,
    ThreadRngTargets, play_session, player_name_for, write_leaderboard, write_player_stats,
    write_rules,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    let mut config = GameConfig::load_or_default(&cli.config)?;
    if let Some(db_path) = cli.db_path {
        config.set_db_path(db_path);
    }

    if cli.ephemeral {
        info!("Using in-memory results");
        let store = ResultStore::with_key(MemoryBlobs::new(), config.results_key().clone());
        run(cli.command, &config, store)
    } else {
        let repository = BlobRepository::open(config.db_path().clone())?;
        let store = ResultStore::with_key(repository, config.results_key().clone());
        run(cli.command, &config, store)
    }
}

/// Installs the stderr subscriber so prompts on stdout stay clean.
fn initialize_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,strictly_guessing=info")),
        )
        .with_writer(io::stderr)
        .init();
}

/// Dispatches a command against an opened store.
#[instrument(skip(config, store))]
fn run<B: BlobBackend>(command: Command, config: &GameConfig, store: ResultStore<B>) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Play { name, seed } => {
            let mut config = config.clone();
            if let Some(seed) = seed {
                config.set_seed(seed);
            }
            match *config.seed() {
                Some(seed) => run_play(SeededTargets::new(seed), store, name, &mut out),
                None => run_play(ThreadRngTargets, store, name, &mut out),
            }
        }
        Command::Leaderboard { limit } => {
            let limit = limit.unwrap_or(*config.leaderboard_size());
            let entries = LeaderboardRanker::new(&store).entries(limit);
            write_leaderboard(&entries, &mut out)
        }
        Command::Stats { name, recent } => {
            let recent = recent.unwrap_or(*config.recent_games());
            let name = player_name_for(&name);
            let stats = StatsAggregator::new(&store).for_player(&name);
            write_player_stats(&name, &stats, recent, &mut out)
        }
        Command::Rules => write_rules(&mut out),
    }
}

/// Runs an interactive session on stdin.
#[instrument(skip(targets, store, out))]
fn run_play<B, T, W>(
    targets: T,
    store: ResultStore<B>,
    name: Option<String>,
    out: &mut W,
) -> Result<()>
where
    B: BlobBackend,
    T: TargetSource,
    W: Write,
{
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let name = match name {
        Some(name) => name,
        None => {
            write!(out, "Enter your name: ")?;
            out.flush()?;
            let mut line = String::new();
            input.read_line(&mut line)?;
            line.trim().to_string()
        }
    };

    let mut service = GuessingService::new(RoundEngine::new(targets, SystemClock), store);
    let saved = play_session(&mut service, &name, &mut input, out)?;
    info!(saved = saved.len(), "Play finished");
    Ok(())
}

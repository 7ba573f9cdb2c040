//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::DEFAULT_RESULTS_KEY;

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// SQLite file holding the results blob.
    #[serde(default = "default_db_path")]
    db_path: String,

    /// Name of the results blob.
    #[serde(default = "default_results_key")]
    results_key: String,

    /// Rows shown by the leaderboard.
    #[serde(default = "default_leaderboard_size")]
    leaderboard_size: usize,

    /// Recent games listed with player stats.
    #[serde(default = "default_recent_games")]
    recent_games: usize,

    /// Seed for reproducible targets. Random when absent.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_db_path() -> String {
    "strictly_guessing.db".to_string()
}

fn default_results_key() -> String {
    DEFAULT_RESULTS_KEY.to_string()
}

fn default_leaderboard_size() -> usize {
    10
}

fn default_recent_games() -> usize {
    5
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            results_key: default_results_key(),
            leaderboard_size: default_leaderboard_size(),
            recent_games: default_recent_games(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(db_path = %config.db_path, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid TOML for this schema.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads `path` if it exists, otherwise returns defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but is unreadable or invalid.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Overrides the database path.
    pub fn set_db_path(&mut self, db_path: String) {
        self.db_path = db_path;
    }

    /// Overrides the target seed.
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = Some(seed);
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config = GameConfig::from_toml("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.results_key(), "numberGuessGame");
        assert_eq!(*config.leaderboard_size(), 10);
        assert_eq!(*config.recent_games(), 5);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = GameConfig::from_toml("db_path = \"x.db\"\nseed = 7\n").unwrap();
        assert_eq!(config.db_path(), "x.db");
        assert_eq!(*config.seed(), Some(7));
        assert_eq!(*config.leaderboard_size(), 10);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(GameConfig::from_toml("leaderboard_size = \"ten\"").is_err());
    }
}

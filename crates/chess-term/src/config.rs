//! Configuration file loading for chess-term.
//!
//! Settings come from `chess-term.toml` in the working directory (or a path
//! given on the command line). A missing file means defaults.

use chess_core::FenError;
use chess_engine::Game;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or applying configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The configured starting position is not a valid snapshot.
    #[error("Invalid start_fen: {0}")]
    StartFen(#[from] FenError),
}

/// How pieces are drawn.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Glyphs {
    #[default]
    Unicode,
    Ascii,
}

/// Terminal driver configuration.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TermConfig {
    /// Piece drawing style. Defaults to Unicode chess glyphs.
    #[serde(default)]
    pub glyphs: Glyphs,
    /// Log filter used when `RUST_LOG` is unset. Defaults to "warn".
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Print the side to move's legal moves after every board.
    #[serde(default)]
    pub show_legal_moves: bool,
    /// Snapshot to start from instead of the standard opening.
    #[serde(default)]
    pub start_fen: Option<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for TermConfig {
    fn default() -> Self {
        TermConfig {
            glyphs: Glyphs::default(),
            log_level: default_log_level(),
            show_legal_moves: false,
            start_fen: None,
        }
    }
}

impl TermConfig {
    /// Loads the configuration from `path`, or from
    /// [`Self::default_path()`] when no path is given.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns `chess-term.toml` in the current working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from("chess-term.toml")
    }

    /// Builds the starting game from `start_fen`, or the standard opening.
    pub fn start_game(&self) -> Result<Game, ConfigError> {
        match &self.start_fen {
            Some(fen) => Ok(Game::from_fen(fen)?),
            None => Ok(Game::new()),
        }
    }
}

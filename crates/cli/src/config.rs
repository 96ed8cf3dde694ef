//! Session configuration
//!
//! Read from an optional TOML file; every field has a default so an empty
//! file (or no file) is a valid configuration. Command-line flags are applied
//! on top by the binary.

use std::fmt;
use std::path::{Path, PathBuf};

use chess_core::Color;
use minimax_engine::SearchConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Who plays which side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    #[default]
    HumanVsHuman,
    /// Human plays White, the engine plays Black.
    HumanVsAi,
    AiVsAi,
}

impl Mode {
    pub fn is_human(self, color: Color) -> bool {
        match self {
            Mode::HumanVsHuman => true,
            Mode::HumanVsAi => color == Color::White,
            Mode::AiVsAi => false,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::HumanVsHuman => f.write_str("human-vs-human"),
            Mode::HumanVsAi => f.write_str("human-vs-ai"),
            Mode::AiVsAi => f.write_str("ai-vs-ai"),
        }
    }
}

/// Default cap on the number of plies in one session.
pub const DEFAULT_MAX_PLIES: u32 = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub mode: Mode,
    /// The session stops once this many plies have been played.
    pub max_plies: u32,
    /// `tracing` filter directive, e.g. `debug` or `minimax_engine=trace`.
    pub log_filter: Option<String>,
    /// Where to write the JSON game record.
    pub record: Option<PathBuf>,
    /// Start position; the standard setup when absent.
    pub fen: Option<String>,
    pub engine: SearchConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            max_plies: DEFAULT_MAX_PLIES,
            log_filter: None,
            record: None,
            fen: None,
            engine: SearchConfig::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl SessionConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;

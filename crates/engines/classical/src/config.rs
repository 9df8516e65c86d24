//! Engine configuration, loadable from TOML.
//!
//! ```toml
//! [search]
//! depth = 4
//! alpha_beta = true
//! parallel_root = false
//! move_time_ms = 500
//!
//! [eval]
//! piece_square_tables = true
//! ```
//!
//! Every field has a default, so an empty file is a valid config.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Search settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Search depth in plies. Must be at least 1.
    pub depth: u8,
    /// Prune with alpha-beta. Off gives plain minimax with the same result.
    pub alpha_beta: bool,
    /// Search root moves in parallel on the rayon pool.
    pub parallel_root: bool,
    /// Optional per-move time bound. Enables iterative deepening.
    pub move_time_ms: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            alpha_beta: true,
            parallel_root: false,
            move_time_ms: None,
        }
    }
}

/// Evaluation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Add piece-square bonuses on top of material.
    pub piece_square_tables: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            piece_square_tables: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub search: SearchConfig,
    pub eval: EvalConfig,
}

impl EngineConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.depth == 0 {
            return Err(ConfigError::Invalid(
                "search.depth must be at least 1".to_string(),
            ));
        }
        if self.search.move_time_ms == Some(0) {
            return Err(ConfigError::Invalid(
                "search.move_time_ms must be positive when set".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;

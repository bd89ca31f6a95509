//! Shell settings loaded from a TOML file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the settings file.
pub const DEFAULT_CONFIG_PATH: &str = "chess.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// JSON file holding the saved game and the leaderboard
    pub session_path: PathBuf,
    /// `tracing` filter used when `RUST_LOG` is not set
    pub log_filter: String,
    /// Save a snapshot after every successful move
    pub autosave: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            session_path: PathBuf::from("session.json"),
            log_filter: "warn".to_string(),
            autosave: true,
        }
    }
}

impl ShellConfig {
    /// Reads settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

//! Session settings loaded from an optional TOML file.

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::game::Difficulty;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Session settings read from an optional TOML file.
///
/// ```toml
/// leaderboard_path = "scores/leaderboard.json"
/// difficulty = "medium"
/// seed = 42
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "defaults::leaderboard_path")]
    pub leaderboard_path: PathBuf,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Fixed RNG seed; `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            leaderboard_path: defaults::leaderboard_path(),
            difficulty: Difficulty::default(),
            seed: None,
        }
    }
}

impl Config {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = std::fs::File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }
}

mod defaults {
    use std::path::PathBuf;

    pub fn leaderboard_path() -> PathBuf { PathBuf::from(crate::leaderboard::DEFAULT_FILE) }
}

//! High-score persistence: one JSON record, `{"high_score": <u64>}`.
//!
//! Loading never fails. A missing, unreadable or corrupt file reads as 0.
//! Saving overwrites the whole file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::engine::Score;

pub const DEFAULT_FILE: &str = "leaderboard.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub high_score: Score,
}

#[derive(thiserror::Error, Debug)]
pub enum LeaderboardError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaderboard {
    path: PathBuf,
}

impl Leaderboard {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Leaderboard { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored high score, or 0 if there is none to read.
    pub fn load(&self) -> Score {
        match self.try_load() {
            Ok(Some(record)) => record.high_score,
            Ok(None) => {
                debug!("no leaderboard at {}, starting from 0", self.path.display());
                0
            }
            Err(e) => {
                warn!("ignoring unreadable leaderboard {}: {e}", self.path.display());
                0
            }
        }
    }

    /// Overwrite the file with `high_score`.
    pub fn save(&self, high_score: Score) -> Result<(), LeaderboardError> {
        let bytes = serde_json::to_vec(&Record { high_score })?;
        fs::write(&self.path, bytes)?;
        debug!("saved high score {high_score} to {}", self.path.display());
        Ok(())
    }

    fn try_load(&self) -> Result<Option<Record>, LeaderboardError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&data)?))
    }
}

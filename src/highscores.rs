//! Best-score record
//!
//! Persisted as a small JSON object: `{"high_score": N}`. A missing or
//! unreadable record counts as a high score of zero.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SimResult;

/// Default location of the record, relative to the working directory
pub const DEFAULT_PATH: &str = "score.json";

/// Persisted best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScore {
    pub high_score: u64,
}

impl HighScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the larger of the stored and the new score.
    /// Returns true if `score` is a new best.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.high_score {
            self.high_score = score;
            true
        } else {
            false
        }
    }

    /// Load the record; never fails
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("No high score found, starting fresh");
                return Self::new();
            }
        };

        match serde_json::from_str::<HighScore>(&json) {
            Ok(record) => {
                log::info!("Loaded high score {}", record.high_score);
                record
            }
            Err(e) => {
                log::warn!("Ignoring malformed high score in {}: {}", path.display(), e);
                Self::new()
            }
        }
    }

    /// Write the record
    pub fn save(&self, path: impl AsRef<Path>) -> SimResult<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        log::info!("High score saved ({})", self.high_score);
        Ok(())
    }
}

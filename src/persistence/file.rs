//! Best score stored as a small JSON document on disk

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{HighScoreStore, StorageError};

/// On-disk record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u64,
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> Result<u64, StorageError> {
        if !self.path.exists() {
            return Ok(0);
        }
        let json = fs::read_to_string(&self.path)?;
        let record: HighScoreRecord = serde_json::from_str(&json)?;
        log::info!("Loaded high score {} from {}", record.high_score, self.path.display());
        Ok(record.high_score)
    }

    fn save(&mut self, score: u64) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        // Write to a sibling temp file first so a crash never leaves half a record
        let tmp = self.path.with_extension("tmp");
        let json = serde_json::to_string(&HighScoreRecord { high_score: score })?;
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::info!("High score {} saved to {}", score, self.path.display());
        Ok(())
    }
}

//! Best score persistence
//!
//! The game only needs to read and write a single number across sessions.
//! Stores report failures as [`StorageError`]; the game logs and ignores
//! them, so a missing or broken store never interrupts play.

pub mod file;

pub use file::JsonFileStore;

use thiserror::Error;

/// Storage failures
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Cross-session best score reader/writer
pub trait HighScoreStore: std::fmt::Debug {
    /// Stored best, 0 when nothing was saved yet
    fn load(&self) -> Result<u64, StorageError>;
    fn save(&mut self, score: u64) -> Result<(), StorageError>;
}

/// In-memory store (tests, or when no storage is configured)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(best: u64) -> Self {
        Self { best }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u64, StorageError> {
        Ok(self.best)
    }

    fn save(&mut self, score: u64) -> Result<(), StorageError> {
        self.best = score;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load().ok(), Some(0));
        store.save(1234).expect("memory save");
        assert_eq!(store.load().ok(), Some(1234));
    }

    #[test]
    fn test_error_messages() {
        let err = StorageError::Unavailable("read-only".into());
        assert_eq!(err.to_string(), "storage unavailable: read-only");
    }
}

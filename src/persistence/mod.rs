//! Best-score persistence
//!
//! The simulation only ever stores one integer. Backends:
//! - [`MemoryStore`]: in-process, for tests and ephemeral hosts
//! - [`FileStore`]: JSON file written via tmp + rename (native only)
//! - [`LocalStorageStore`]: browser LocalStorage (wasm only)
//!
//! Failures are reported to the caller, which is expected to log and carry
//! on; a lost best score never stops the game.

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use thiserror::Error;

/// Errors from a best-score backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored best score is malformed: {0}")]
    Format(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Somewhere to keep the best score between sessions
pub trait ScoreStore {
    /// Stored best score, 0 if nothing has been saved yet
    fn load_best_score(&mut self) -> Result<u64, StoreError>;

    fn save_best_score(&mut self, score: u64) -> Result<(), StoreError>;
}

/// In-memory store that counts writes
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub best: u64,
    /// Number of successful saves
    pub saves: u32,
    /// Make every save fail (for exercising error paths)
    pub fail_saves: bool,
}

impl MemoryStore {
    pub fn new(best: u64) -> Self {
        Self {
            best,
            ..Default::default()
        }
    }
}

impl ScoreStore for MemoryStore {
    fn load_best_score(&mut self) -> Result<u64, StoreError> {
        Ok(self.best)
    }

    fn save_best_score(&mut self, score: u64) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::Unavailable("saves disabled".to_string()));
        }
        self.best = score;
        self.saves += 1;
        Ok(())
    }
}

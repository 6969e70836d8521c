//! Browser LocalStorage backend

use super::{ScoreStore, StoreError};
use crate::consts::BEST_SCORE_KEY;

/// Best score as a decimal string in LocalStorage
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Unavailable("LocalStorage is not accessible".to_string()))
    }
}

impl ScoreStore for LocalStorageStore {
    fn load_best_score(&mut self) -> Result<u64, StoreError> {
        let storage = Self::storage()?;
        match storage.get_item(BEST_SCORE_KEY) {
            Ok(Some(value)) => value
                .trim()
                .parse()
                .map_err(|_| StoreError::Unavailable(format!("bad stored best score: {value}"))),
            Ok(None) => Ok(0),
            Err(_) => Err(StoreError::Unavailable("LocalStorage read failed".to_string())),
        }
    }

    fn save_best_score(&mut self, score: u64) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(BEST_SCORE_KEY, &score.to_string())
            .map_err(|_| StoreError::Unavailable("LocalStorage write failed".to_string()))?;
        log::info!("Best score {} saved", score);
        Ok(())
    }
}

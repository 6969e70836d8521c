//! JSON file backend

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{ScoreStore, StoreError};
use crate::consts::BEST_SCORE_KEY;

/// Best score kept in a small JSON object keyed by [`BEST_SCORE_KEY`]
///
/// Other keys in the file are preserved on save.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, serde_json::Value>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl ScoreStore for FileStore {
    fn load_best_score(&mut self) -> Result<u64, StoreError> {
        let map = self.read_map()?;
        match map.get(BEST_SCORE_KEY) {
            None => Ok(0),
            Some(value) => value.as_u64().ok_or_else(|| {
                StoreError::Unavailable(format!("{} is not an integer: {}", BEST_SCORE_KEY, value))
            }),
        }
    }

    fn save_best_score(&mut self, score: u64) -> Result<(), StoreError> {
        // A corrupt file is replaced rather than blocking the save
        let mut map = self.read_map().unwrap_or_default();
        map.insert(BEST_SCORE_KEY.to_string(), score.into());

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&map)?)?;
        fs::rename(&tmp, &self.path)?;
        log::info!("Best score {} saved to {}", score, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("opencave-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_is_zero() {
        let mut store = FileStore::new(temp_path("missing"));
        assert_eq!(store.load_best_score().unwrap(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip");
        let mut store = FileStore::new(&path);
        store.save_best_score(321).unwrap();
        assert_eq!(FileStore::new(&path).load_best_score().unwrap(), 321);

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("opencave-best-score"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_other_keys_preserved() {
        let path = temp_path("keys");
        fs::write(&path, r#"{ "volume": 3 }"#).unwrap();
        let mut store = FileStore::new(&path);
        store.save_best_score(7).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("volume"));
        assert_eq!(store.load_best_score().unwrap(), 7);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_reports_error() {
        let path = temp_path("corrupt");
        fs::write(&path, "not json").unwrap();
        let mut store = FileStore::new(&path);
        assert!(matches!(store.load_best_score(), Err(StoreError::Format(_))));

        // Saving recovers the file
        store.save_best_score(4).unwrap();
        assert_eq!(store.load_best_score().unwrap(), 4);
        let _ = fs::remove_file(&path);
    }
}

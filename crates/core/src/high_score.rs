//! High score persistence.
//!
//! The only state that outlives a session is one integer. A session reads it
//! once when constructed and writes it when the game ends.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Persistence slot for the best score
pub trait HighScoreStore {
    /// Read the stored best score; an absent record reads as 0.
    fn load(&mut self) -> Result<u32, StoreError>;

    fn save(&mut self, score: u32) -> Result<(), StoreError>;
}

/// In-process store, lost when dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: u32,
}

impl MemoryStore {
    pub fn new(initial: u32) -> Self {
        Self { value: initial }
    }

    pub fn value(&self) -> u32 {
        self.value
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> Result<u32, StoreError> {
        Ok(self.value)
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        self.value = score;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// Stores `{"high_score": n}` in a JSON file
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

    /// Sibling file the next record is staged in before it replaces `path`
    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&mut self) -> Result<u32, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err.into()),
        };
        let record: HighScoreRecord = serde_json::from_str(&text)?;
        Ok(record.high_score)
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(&HighScoreRecord { high_score: score })?;

        // Readers see either the old record or the new one, never a torn write.
        let tmp = self.tmp_path();
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new(40);
        assert_eq!(store.load().unwrap(), 40);
        store.save(90).unwrap();
        assert_eq!(store.load().unwrap(), 90);
        assert_eq!(store.value(), 90);
    }

    #[test]
    fn test_missing_file_reads_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("absent.json"));
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("best.json");

        JsonFileStore::new(&path).save(1230).unwrap();
        assert_eq!(JsonFileStore::new(&path).load().unwrap(), 1230);

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["high_score"], 1230);
    }

    #[test]
    fn test_save_replaces_record_without_leaving_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.json");
        let mut store = JsonFileStore::new(&path);

        store.save(300).unwrap();
        store.save(450).unwrap();
        assert_eq!(store.load().unwrap(), 450);

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("best.json")]);
    }

    #[test]
    fn test_stale_staging_file_does_not_affect_load_or_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.json");
        let mut store = JsonFileStore::new(&path);
        store.save(120).unwrap();

        // Left behind by a write that never reached the rename.
        fs::write(dir.path().join("best.json.tmp"), "{\"high_").unwrap();
        assert_eq!(store.load().unwrap(), 120);

        store.save(130).unwrap();
        assert_eq!(JsonFileStore::new(&path).load().unwrap(), 130);
        assert!(!dir.path().join("best.json.tmp").exists());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            JsonFileStore::new(&path).load(),
            Err(StoreError::Json(_))
        ));
    }
}

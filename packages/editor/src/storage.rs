//! # Novel Storage
//!
//! The editor treats persistence as an opaque blob store behind
//! [`NovelStore`]. Failures are never fatal: [`load_or_default`] falls back to
//! the built-in sample novel.

use crate::model::Novel;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid novel data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Load/save contract for a single novel
pub trait NovelStore {
    /// `Ok(None)` when nothing has been saved yet
    fn load(&self) -> Result<Option<Novel>, StoreError>;

    fn save(&mut self, novel: &Novel) -> Result<(), StoreError>;
}

/// Load the stored novel, or the sample when missing or unreadable
pub fn load_or_default(store: &dyn NovelStore) -> Novel {
    match store.load() {
        Ok(Some(novel)) => novel,
        Ok(None) => {
            warn!("No saved novel, starting from the sample");
            Novel::sample()
        }
        Err(err) => {
            warn!(error = %err, "Failed to load saved novel, starting from the sample");
            Novel::sample()
        }
    }
}

/// In-memory blob store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a raw blob, which may be malformed
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
        }
    }

    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl NovelStore for MemoryStore {
    fn load(&self) -> Result<Option<Novel>, StoreError> {
        self.blob
            .as_deref()
            .map(|blob| serde_json::from_str::<Novel>(blob))
            .transpose()
            .map_err(StoreError::from)
    }

    fn save(&mut self, novel: &Novel) -> Result<(), StoreError> {
        self.blob = Some(serde_json::to_string(novel)?);
        Ok(())
    }
}

/// Pretty-printed JSON file on disk
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

impl NovelStore for JsonFileStore {
    fn load(&self) -> Result<Option<Novel>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let source = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&source)?))
    }

    fn save(&mut self, novel: &Novel) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(novel)?;
        fs::write(&self.path, json)?;
        info!(path = %self.path.display(), "Saved novel");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        let novel = Novel::sample();
        store.save(&novel).unwrap();
        assert_eq!(store.load().unwrap(), Some(novel));
    }

    #[test]
    fn test_malformed_blob_falls_back_to_sample() {
        let store = MemoryStore::with_blob("{not json");
        assert!(matches!(store.load(), Err(StoreError::Json(_))));
        assert_eq!(load_or_default(&store), Novel::sample());
    }

    #[test]
    fn test_empty_store_falls_back_to_sample() {
        assert_eq!(load_or_default(&MemoryStore::new()), Novel::sample());
    }

    #[test]
    fn test_json_file_store() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested").join("novel.json"));
        assert!(store.load().unwrap().is_none());

        let novel = Novel::new("On Disk");
        store.save(&novel).unwrap();
        assert!(store.path().exists());
        assert_eq!(store.load().unwrap(), Some(novel));
    }
}

//! Durable draft storage: one snapshot under one fixed key.
//!
//! The contract is load-once, write-on-save, delete-on-reset. The file store
//! backs normal runs; the memory store backs tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

use super::state::DraftSnapshot;

/// File name of the single stored draft
pub const DRAFT_FILE: &str = "draft.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read draft: {0}")]
    Read(std::io::Error),
    #[error("failed to write draft: {0}")]
    Write(std::io::Error),
    #[error("stored draft is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

pub trait DraftStore: Send + Sync {
    /// `Ok(None)` when no draft has been stored yet
    fn load(&self) -> Result<Option<DraftSnapshot>, StoreError>;
    fn save(&self, snapshot: &DraftSnapshot) -> Result<(), StoreError>;
    fn delete(&self) -> Result<(), StoreError>;
}

/// Stores the draft as pretty-printed JSON in the data directory
pub struct FileDraftStore {
    path: PathBuf,
}

impl FileDraftStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(DRAFT_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DraftStore for FileDraftStore {
    fn load(&self) -> Result<Option<DraftSnapshot>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path).map_err(StoreError::Read)?;
        let snapshot = serde_json::from_str(&contents)?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &DraftSnapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(StoreError::Write)?;
        }
        let contents = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, contents).map_err(StoreError::Write)
    }

    fn delete(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::Write(err)),
        }
    }
}

/// In-memory store for tests
#[derive(Default)]
pub struct MemoryDraftStore {
    slot: Mutex<Option<DraftSnapshot>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DraftStore for MemoryDraftStore {
    fn load(&self) -> Result<Option<DraftSnapshot>, StoreError> {
        Ok(self.slot.lock().expect("store lock").clone())
    }

    fn save(&self, snapshot: &DraftSnapshot) -> Result<(), StoreError> {
        *self.slot.lock().expect("store lock") = Some(snapshot.clone());
        Ok(())
    }

    fn delete(&self) -> Result<(), StoreError> {
        *self.slot.lock().expect("store lock") = None;
        Ok(())
    }
}

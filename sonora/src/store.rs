//! Where the shared [`GameRecord`] lives.
//!
//! The engine only needs last-writer-wins semantics per record: every commit reloads the
//! record, changes the fields owned by the committing player and saves it back.
use std::{
    error::Error,
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use thiserror::Error;
use tracing::trace;

use crate::game::GameRecord;

/// Failure to load or save a [`GameRecord`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A writer panicked while holding the shared record.
    #[error("shared record lock was poisoned")]
    Poisoned,
    /// Failure reported by some other backend.
    #[error(transparent)]
    Other(Box<dyn Error + Send + Sync>),
}

/// Storage for one game record.
pub trait RecordStore {
    /// Fetch the latest copy of the record.
    fn load(&self) -> Result<GameRecord, StoreError>;

    /// Replace the stored record.
    fn save(&self, record: &GameRecord) -> Result<(), StoreError>;
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn load(&self) -> Result<GameRecord, StoreError> {
        (**self).load()
    }

    fn save(&self, record: &GameRecord) -> Result<(), StoreError> {
        (**self).save(record)
    }
}

/// Record kept in memory. Clones share the same record, so two game views built over
/// clones of one store see each other's commits.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    record: Arc<Mutex<GameRecord>>,
}

impl MemoryStore {
    /// Create a store holding `record`.
    pub fn new(record: GameRecord) -> Self {
        Self {
            record: Arc::new(Mutex::new(record)),
        }
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> Result<GameRecord, StoreError> {
        let record = self.record.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(record.clone())
    }

    fn save(&self, record: &GameRecord) -> Result<(), StoreError> {
        let mut stored = self.record.lock().map_err(|_| StoreError::Poisoned)?;
        *stored = record.clone();
        Ok(())
    }
}

/// Record kept as a JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open the record at `path`. The file is not read until the first load.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write `record` to a new file at `path` and open it.
    pub fn create(path: impl Into<PathBuf>, record: &GameRecord) -> Result<Self, StoreError> {
        let store = Self::new(path);
        store.save(record)?;
        Ok(store)
    }

    /// Path of the record file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for FileStore {
    fn load(&self) -> Result<GameRecord, StoreError> {
        trace!("loading record from {}", self.path.display());
        let data = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    fn save(&self, record: &GameRecord) -> Result<(), StoreError> {
        trace!("saving record to {}", self.path.display());
        let data = serde_json::to_vec_pretty(record)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

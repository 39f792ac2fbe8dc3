use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;

use worksheet_core::UserProgress;

/// The single key the worksheet persists under.
pub const PROGRESS_KEY: &str = "fraction-worksheet-progress";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

pub(crate) fn encode_blob(progress: &UserProgress) -> Result<String, StorageError> {
    serde_json::to_string(progress).map_err(|err| StorageError::Serialization(err.to_string()))
}

pub(crate) fn decode_blob(blob: &str) -> Result<UserProgress, StorageError> {
    serde_json::from_str(blob).map_err(|err| StorageError::Serialization(err.to_string()))
}

/// Repository contract for the single persisted progress record.
///
/// The record is stored wholesale as one serialized blob: reads replace the
/// in-memory state entirely, writes overwrite the whole entry. There is no
/// partial merge.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch the persisted record, `None` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` when a stored blob does not
    /// decode, or other storage errors.
    async fn get_progress(&self) -> Result<Option<UserProgress>, StorageError>;

    /// Persist the whole record, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn save_progress(&self, progress: &UserProgress) -> Result<(), StorageError>;

    /// Remove the persisted entry. Removing a missing entry is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn delete_progress(&self) -> Result<(), StorageError>;
}

/// In-memory backend for tests and prototyping.
///
/// Stores the serialized blob rather than the struct so the decode path
/// (including corrupt data) behaves like a real backend.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    blob: Arc<Mutex<Option<String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored blob verbatim. Lets tests plant corrupt data.
    ///
    /// # Panics
    ///
    /// Panics if the backing lock is poisoned.
    pub fn set_raw_blob(&self, blob: impl Into<String>) {
        *self.blob.lock().expect("in-memory store lock") = Some(blob.into());
    }

    /// The stored blob, if any.
    ///
    /// # Panics
    ///
    /// Panics if the backing lock is poisoned.
    #[must_use]
    pub fn raw_blob(&self) -> Option<String> {
        self.blob.lock().expect("in-memory store lock").clone()
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn get_progress(&self) -> Result<Option<UserProgress>, StorageError> {
        let guard = self
            .blob
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        match guard.as_deref() {
            Some(blob) => decode_blob(blob).map(Some),
            None => Ok(None),
        }
    }

    async fn save_progress(&self, progress: &UserProgress) -> Result<(), StorageError> {
        let blob = encode_blob(progress)?;
        let mut guard = self
            .blob
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(blob);
        Ok(())
    }

    async fn delete_progress(&self) -> Result<(), StorageError> {
        let mut guard = self
            .blob
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

/// Aggregates the progress repository behind a trait object for easy
/// backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            progress: Arc::new(InMemoryRepository::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use worksheet_core::WorksheetPath;

    #[tokio::test]
    async fn missing_record_reads_as_none() {
        let repo = InMemoryRepository::new();
        assert!(repo.get_progress().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn round_trips_the_whole_record() {
        let repo = InMemoryRepository::new();

        let mut progress = UserProgress::default();
        progress.record_exercise("comparison-c", "1/4");
        progress.record_assessment("assessment-1", true);
        progress.set_path(WorksheetPath::B);
        repo.save_progress(&progress).await.unwrap();

        let fetched = repo.get_progress().await.unwrap().unwrap();
        assert_eq!(fetched, progress);
    }

    #[tokio::test]
    async fn delete_removes_the_entry() {
        let repo = InMemoryRepository::new();
        repo.save_progress(&UserProgress::default()).await.unwrap();
        repo.delete_progress().await.unwrap();
        assert!(repo.get_progress().await.unwrap().is_none());
        // deleting again is fine
        repo.delete_progress().await.unwrap();
    }

    #[tokio::test]
    async fn corrupt_blob_surfaces_a_serialization_error() {
        let repo = InMemoryRepository::new();
        repo.set_raw_blob("{not json");
        let err = repo.get_progress().await.unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[test]
    fn repository_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InMemoryRepository>();
    }
}

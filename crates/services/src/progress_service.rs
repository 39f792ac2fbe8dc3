use std::sync::Arc;

use storage::repository::ProgressRepository;
use worksheet_core::{Completion, UserProgress, WorksheetPath};

use crate::error::ProgressError;

/// The exercise state store: owns persistence of the progress record.
///
/// By convention every mutation saves immediately; there is no batching.
/// Two policies are deliberate here:
///
/// - a stored blob that does not decode is discarded with a warning and the
///   worksheet starts from defaults (fail-safe, never fail-loud);
/// - a failed write is logged and otherwise ignored, so the worksheet keeps
///   running with in-memory state.
#[derive(Clone)]
pub struct ProgressService {
    repo: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(repo: Arc<dyn ProgressRepository>) -> Self {
        Self { repo }
    }

    /// Load the persisted record. Returns the record and whether a persisted
    /// copy was found; on a missing or unreadable record this hands back
    /// defaults.
    pub async fn load(&self) -> (UserProgress, bool) {
        match self.repo.get_progress().await {
            Ok(Some(progress)) => {
                tracing::info!("progress loaded");
                (progress, true)
            }
            Ok(None) => (UserProgress::default(), false),
            Err(err) => {
                tracing::warn!(error = %err, "stored progress was unreadable; starting fresh");
                (UserProgress::default(), false)
            }
        }
    }

    /// Persist the whole record.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` when the backend write fails.
    pub async fn save(&self, progress: &UserProgress) -> Result<(), ProgressError> {
        self.repo.save_progress(progress).await?;
        tracing::debug!("progress saved");
        Ok(())
    }

    /// Delete the persisted entry and hand back a fresh default record.
    pub async fn reset(&self) -> UserProgress {
        if let Err(err) = self.repo.delete_progress().await {
            tracing::warn!(error = %err, "could not delete stored progress");
        }
        tracing::info!("progress reset");
        UserProgress::default()
    }

    pub(crate) async fn save_or_warn(&self, progress: &UserProgress) {
        if let Err(err) = self.save(progress).await {
            tracing::warn!(error = %err, "could not persist progress; continuing in memory");
        }
    }

    /// Record an exercise attempt and persist.
    pub async fn record_exercise(
        &self,
        progress: &mut UserProgress,
        key: impl Into<String>,
        completion: impl Into<Completion>,
    ) {
        progress.record_exercise(key, completion);
        self.save_or_warn(progress).await;
    }

    /// Record a self-assessment checkbox and persist.
    pub async fn record_assessment(
        &self,
        progress: &mut UserProgress,
        key: impl Into<String>,
        checked: bool,
    ) {
        progress.record_assessment(key, checked);
        self.save_or_warn(progress).await;
    }

    /// Switch the active worksheet path and persist.
    pub async fn set_path(&self, progress: &mut UserProgress, path: WorksheetPath) {
        progress.set_path(path);
        self.save_or_warn(progress).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;

    fn service(repo: &InMemoryRepository) -> ProgressService {
        ProgressService::new(Arc::new(repo.clone()))
    }

    #[tokio::test]
    async fn load_without_a_record_reports_not_found() {
        let repo = InMemoryRepository::new();
        let (progress, found) = service(&repo).load().await;
        assert!(!found);
        assert_eq!(progress, UserProgress::default());
    }

    #[tokio::test]
    async fn load_replaces_state_wholesale() {
        let repo = InMemoryRepository::new();
        let svc = service(&repo);

        let mut saved = UserProgress::default();
        saved.set_path(WorksheetPath::A);
        saved.record_exercise("match-shape-1", true);
        svc.save(&saved).await.unwrap();

        let (progress, found) = svc.load().await;
        assert!(found);
        assert_eq!(progress, saved);
    }

    #[tokio::test]
    async fn corrupt_record_loads_as_defaults() {
        let repo = InMemoryRepository::new();
        repo.set_raw_blob("]]garbage[[");
        let (progress, found) = service(&repo).load().await;
        assert!(!found);
        assert_eq!(progress, UserProgress::default());
    }

    #[tokio::test]
    async fn mutations_persist_immediately() {
        let repo = InMemoryRepository::new();
        let svc = service(&repo);
        let mut progress = UserProgress::default();

        svc.record_exercise(&mut progress, "comparison-c", "1/4")
            .await;
        svc.record_assessment(&mut progress, "assessment-1", true)
            .await;
        svc.set_path(&mut progress, WorksheetPath::B).await;

        let (reloaded, found) = svc.load().await;
        assert!(found);
        assert_eq!(reloaded, progress);
        assert_eq!(reloaded.path, WorksheetPath::B);
    }

    #[tokio::test]
    async fn reset_deletes_the_entry_and_returns_defaults() {
        let repo = InMemoryRepository::new();
        let svc = service(&repo);
        let mut progress = UserProgress::default();
        svc.record_exercise(&mut progress, "game-fraction", "4/8")
            .await;

        let fresh = svc.reset().await;
        assert_eq!(fresh, UserProgress::default());

        let (_, found) = svc.load().await;
        assert!(!found);
        assert!(repo.raw_blob().is_none());
    }
}

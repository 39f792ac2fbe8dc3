use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use crate::repository::{
    decode_blob, encode_blob, ProgressRepository, StorageError, PROGRESS_KEY,
};
use worksheet_core::UserProgress;

use super::SqliteRepository;

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn get_progress(&self) -> Result<Option<UserProgress>, StorageError> {
        let row = sqlx::query("SELECT value FROM progress_store WHERE key = ?1")
            .bind(PROGRESS_KEY)
            .fetch_optional(self.pool())
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let blob: String = row
            .try_get("value")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        decode_blob(&blob).map(Some)
    }

    async fn save_progress(&self, progress: &UserProgress) -> Result<(), StorageError> {
        let blob = encode_blob(progress)?;
        sqlx::query(
            r"
            INSERT INTO progress_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(PROGRESS_KEY)
        .bind(blob)
        .bind(Utc::now())
        .execute(self.pool())
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }

    async fn delete_progress(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM progress_store WHERE key = ?1")
            .bind(PROGRESS_KEY)
            .execute(self.pool())
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }
}

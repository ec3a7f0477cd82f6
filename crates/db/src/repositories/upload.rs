//! Upload repository.

use std::sync::Arc;

use crate::entities::{Upload, upload};
use crowdstock_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

/// Upload repository for database operations.
#[derive(Clone)]
pub struct UploadRepository {
    db: Arc<DatabaseConnection>,
}

impl UploadRepository {
    /// Create a new upload repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an upload by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<upload::Model>> {
        Upload::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get an upload by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<upload::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::UploadNotFound(id.to_string()))
    }

    /// Create a new upload.
    pub async fn create(&self, model: upload::ActiveModel) -> AppResult<upload::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an upload.
    pub async fn update(&self, model: upload::ActiveModel) -> AppResult<upload::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete an upload. Reviews cascade at the database level.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let upload = self.find_by_id(id).await?;
        if let Some(u) = upload {
            u.delete(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }
        Ok(())
    }

    /// Get uploads for an account (paginated, newest first).
    pub async fn find_by_account(
        &self,
        account_id: &str,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<upload::Model>> {
        let mut query = Upload::find()
            .filter(upload::Column::AccountId.eq(account_id))
            .order_by_desc(upload::Column::Id);

        if let Some(id) = until_id {
            query = query.filter(upload::Column::Id.lt(id));
        }

        query
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get uploads in a given lifecycle state (review queue scans).
    pub async fn find_by_status(
        &self,
        status: upload::UploadStatus,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<upload::Model>> {
        Upload::find()
            .filter(upload::Column::Status.eq(status))
            .order_by_desc(upload::Column::UploadedAt)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count uploads owned by an account.
    pub async fn count_by_account(&self, account_id: &str) -> AppResult<u64> {
        Upload::find()
            .filter(upload::Column::AccountId.eq(account_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::upload::UploadStatus;
    use chrono::{Duration, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_upload(id: &str, account_id: &str) -> upload::Model {
        let now = Utc::now();
        upload::Model {
            id: id.to_string(),
            account_id: account_id.to_string(),
            filename: format!("{id}.jpg"),
            original_filename: "sunset.jpg".to_string(),
            file_path: format!("/media/{id}.jpg"),
            file_size: 1024,
            description: "A sunset".to_string(),
            category: "nature".to_string(),
            status: UploadStatus::Pending,
            ai_consent: false,
            duplicate_score: 0.0,
            spam_score: 0.0,
            uploaded_at: now.into(),
            deletion_deadline: (now + Duration::hours(48)).into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_id_found() {
        let upload = create_test_upload("up1", "acc1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[upload.clone()]])
                .into_connection(),
        );

        let repo = UploadRepository::new(db);
        let result = repo.find_by_id("up1").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().account_id, "acc1");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<upload::Model>::new()])
                .into_connection(),
        );

        let repo = UploadRepository::new(db);
        let result = repo.get_by_id("missing").await;

        match result {
            Err(AppError::UploadNotFound(id)) => assert_eq!(id, "missing"),
            _ => panic!("Expected UploadNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_find_by_account() {
        let up1 = create_test_upload("up1", "acc1");
        let up2 = create_test_upload("up2", "acc1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[up2, up1]])
                .into_connection(),
        );

        let repo = UploadRepository::new(db);
        let result = repo.find_by_account("acc1", 10, None).await.unwrap();

        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_deadline_round_trips_through_model() {
        let upload = create_test_upload("up1", "acc1");
        let deadline = upload.deletion_deadline;

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[upload]])
                .into_connection(),
        );

        let repo = UploadRepository::new(db);
        let reloaded = repo.get_by_id("up1").await.unwrap();

        // Timestamp equality must hold bit-for-bit across a reload.
        assert_eq!(reloaded.deletion_deadline, deadline);
    }
}

//! Review repository.

use std::sync::Arc;

use crate::entities::{Review, review};
use crowdstock_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

/// Review repository for database operations.
#[derive(Clone)]
pub struct ReviewRepository {
    db: Arc<DatabaseConnection>,
}

impl ReviewRepository {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a review by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<review::Model>> {
        Review::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a review by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<review::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Review: {id}")))
    }

    /// Create a new review.
    pub async fn create(&self, model: review::ActiveModel) -> AppResult<review::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a review.
    pub async fn update(&self, model: review::ActiveModel) -> AppResult<review::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get all reviews on an upload, oldest first.
    pub async fn find_by_upload(&self, upload_id: &str) -> AppResult<Vec<review::Model>> {
        Review::find()
            .filter(review::Column::UploadId.eq(upload_id))
            .order_by_asc(review::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the review a given account left on a given upload.
    pub async fn find_by_upload_and_reviewer(
        &self,
        upload_id: &str,
        reviewer_id: &str,
    ) -> AppResult<Option<review::Model>> {
        Review::find()
            .filter(review::Column::UploadId.eq(upload_id))
            .filter(review::Column::ReviewerId.eq(reviewer_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get reviews written by an account (paginated, newest first).
    pub async fn find_by_reviewer(
        &self,
        reviewer_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<review::Model>> {
        Review::find()
            .filter(review::Column::ReviewerId.eq(reviewer_id))
            .order_by_desc(review::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all reviews on an upload.
    pub async fn count_by_upload(&self, upload_id: &str) -> AppResult<u64> {
        Review::find()
            .filter(review::Column::UploadId.eq(upload_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count reviews on an upload rated good.
    pub async fn count_good_by_upload(&self, upload_id: &str) -> AppResult<u64> {
        Review::find()
            .filter(review::Column::UploadId.eq(upload_id))
            .filter(review::Column::Rating.eq(review::ReviewRating::Good))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count flagged reviews written by an account (abuse evidence reads).
    pub async fn count_flagged_by_reviewer(&self, reviewer_id: &str) -> AppResult<u64> {
        Review::find()
            .filter(review::Column::ReviewerId.eq(reviewer_id))
            .filter(review::Column::IsFlagged.eq(true))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::review::ReviewRating;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_review(id: &str, upload_id: &str, rating: ReviewRating) -> review::Model {
        review::Model {
            id: id.to_string(),
            upload_id: upload_id.to_string(),
            reviewer_id: "rev1".to_string(),
            rating,
            description: "Sharp focus, good composition".to_string(),
            xp_earned: 10,
            is_flagged: false,
            quality_score: 1.0,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_upload() {
        let r1 = create_test_review("r1", "up1", ReviewRating::Good);
        let r2 = create_test_review("r2", "up1", ReviewRating::Bad);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[r1, r2]])
                .into_connection(),
        );

        let repo = ReviewRepository::new(db);
        let result = repo.find_by_upload("up1").await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].rating, ReviewRating::Good);
    }

    #[tokio::test]
    async fn test_find_by_upload_and_reviewer_none() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<review::Model>::new()])
                .into_connection(),
        );

        let repo = ReviewRepository::new(db);
        let result = repo
            .find_by_upload_and_reviewer("up1", "rev1")
            .await
            .unwrap();

        assert!(result.is_none());
    }
}

//! Review service.

use crowdstock_common::{AppError, AppResult, IdGenerator};
use crowdstock_db::{
    entities::review,
    repositories::{AccountRepository, ReviewRepository, UploadRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

pub use crowdstock_db::entities::review::ReviewRating;

/// XP awarded to the reviewer for a submitted review.
pub const REVIEW_XP_AWARD: i32 = 10;

/// Input for submitting a review.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReviewInput {
    pub upload_id: String,

    pub rating: ReviewRating,

    #[validate(length(min = 1, max = 2000))]
    pub description: String,
}

/// Review service for business logic.
#[derive(Clone)]
pub struct ReviewService {
    review_repo: ReviewRepository,
    upload_repo: UploadRepository,
    account_repo: AccountRepository,
    id_gen: IdGenerator,
}

impl ReviewService {
    /// Create a new review service.
    #[must_use]
    pub const fn new(
        review_repo: ReviewRepository,
        upload_repo: UploadRepository,
        account_repo: AccountRepository,
    ) -> Self {
        Self {
            review_repo,
            upload_repo,
            account_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Submit a review on an upload and award the reviewer XP.
    ///
    /// One review per reviewer per upload; reviewers cannot rate their own
    /// uploads; banned accounts cannot review. Abuse *detection* is the
    /// external pipeline's job - it feeds back through [`Self::flag_review`]
    /// and the strike engine.
    pub async fn submit_review(
        &self,
        reviewer_id: &str,
        input: CreateReviewInput,
    ) -> AppResult<review::Model> {
        input.validate()?;

        let reviewer = self.account_repo.get_by_id(reviewer_id).await?;
        if reviewer.is_banned {
            return Err(AppError::Forbidden("Account is banned".to_string()));
        }

        let upload = self.upload_repo.get_by_id(&input.upload_id).await?;
        if upload.account_id == reviewer_id {
            return Err(AppError::BadRequest(
                "Cannot review your own upload".to_string(),
            ));
        }

        if self
            .review_repo
            .find_by_upload_and_reviewer(&input.upload_id, reviewer_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "Upload already reviewed by this account".to_string(),
            ));
        }

        let model = review::ActiveModel {
            id: Set(self.id_gen.generate()),
            upload_id: Set(input.upload_id),
            reviewer_id: Set(reviewer_id.to_string()),
            rating: Set(input.rating),
            description: Set(input.description),
            xp_earned: Set(REVIEW_XP_AWARD),
            is_flagged: Set(false),
            quality_score: Set(1.0),
            created_at: Set(chrono::Utc::now().into()),
        };

        let review = self.review_repo.create(model).await?;

        self.account_repo
            .add_xp(reviewer_id, REVIEW_XP_AWARD)
            .await?;

        Ok(review)
    }

    /// Get all reviews on an upload, oldest first.
    pub async fn reviews_for_upload(&self, upload_id: &str) -> AppResult<Vec<review::Model>> {
        self.review_repo.find_by_upload(upload_id).await
    }

    /// Get reviews written by an account (paginated, newest first).
    pub async fn reviews_by_account(
        &self,
        reviewer_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<review::Model>> {
        self.review_repo
            .find_by_reviewer(reviewer_id, limit, offset)
            .await
    }

    /// Flag a review as abusive and record its quality score.
    ///
    /// Called by the external abuse-detection pipeline; the score is clamped
    /// to [0, 1]. Whether the reviewer also gets a strike is the caller's
    /// decision, through the strike engine.
    pub async fn flag_review(&self, review_id: &str, quality_score: f64) -> AppResult<review::Model> {
        let review = self.review_repo.get_by_id(review_id).await?;

        let mut active: review::ActiveModel = review.into();
        active.is_flagged = Set(true);
        active.quality_score = Set(quality_score.clamp(0.0, 1.0));

        self.review_repo.update(active).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use crowdstock_db::entities::{account, upload};
    use crowdstock_db::entities::upload::UploadStatus;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn service_with(db: sea_orm::DatabaseConnection) -> ReviewService {
        let db = Arc::new(db);
        ReviewService::new(
            ReviewRepository::new(db.clone()),
            UploadRepository::new(db.clone()),
            AccountRepository::new(db),
        )
    }

    fn create_test_account(id: &str, is_banned: bool) -> account::Model {
        account::Model {
            id: id.to_string(),
            username: "tester".to_string(),
            username_lower: "tester".to_string(),
            email: "tester@example.com".to_string(),
            password_hash: "$argon2id$test".to_string(),
            is_verified: false,
            kyc_verified: false,
            document_path: None,
            selfie_path: None,
            xp_points: 0,
            weekly_xp: 0,
            monthly_xp: 0,
            uploader_strikes: 0,
            reviewer_strikes: 0,
            is_banned,
            daily_upload_bytes: 0,
            daily_upload_reset: None,
            accuracy_percentage: 0.0,
            referral_code: None,
            referred_by: None,
            seasonal_badges: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_upload(id: &str, account_id: &str) -> upload::Model {
        let now = Utc::now();
        upload::Model {
            id: id.to_string(),
            account_id: account_id.to_string(),
            filename: "a.jpg".to_string(),
            original_filename: "a.jpg".to_string(),
            file_path: "/media/a.jpg".to_string(),
            file_size: 1024,
            description: "desc".to_string(),
            category: "nature".to_string(),
            status: UploadStatus::Pending,
            ai_consent: false,
            duplicate_score: 0.0,
            spam_score: 0.0,
            uploaded_at: now.into(),
            deletion_deadline: (now + Duration::hours(48)).into(),
        }
    }

    fn valid_input() -> CreateReviewInput {
        CreateReviewInput {
            upload_id: "up1".to_string(),
            rating: ReviewRating::Good,
            description: "Crisp focus".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_review_banned_reviewer_rejected() {
        let reviewer = create_test_account("rev1", true);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[reviewer]])
            .into_connection();
        let service = service_with(db);

        let result = service.submit_review("rev1", valid_input()).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_submit_review_own_upload_rejected() {
        let reviewer = create_test_account("rev1", false);
        let upload = create_test_upload("up1", "rev1");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[reviewer]])
            .append_query_results([[upload]])
            .into_connection();
        let service = service_with(db);

        let result = service.submit_review("rev1", valid_input()).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_submit_review_duplicate_rejected() {
        let reviewer = create_test_account("rev1", false);
        let upload = create_test_upload("up1", "owner1");
        let existing = review::Model {
            id: "r1".to_string(),
            upload_id: "up1".to_string(),
            reviewer_id: "rev1".to_string(),
            rating: ReviewRating::Good,
            description: "prior".to_string(),
            xp_earned: 10,
            is_flagged: false,
            quality_score: 1.0,
            created_at: Utc::now().into(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[reviewer]])
            .append_query_results([[upload]])
            .append_query_results([[existing]])
            .into_connection();
        let service = service_with(db);

        let result = service.submit_review("rev1", valid_input()).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }
}

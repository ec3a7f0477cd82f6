//! Upload service: submission, deletion economics, review aggregation.

use chrono::{DateTime, Duration, Utc};
use crowdstock_common::{AppError, AppResult, IdGenerator};
use crowdstock_db::{
    entities::upload,
    repositories::{ReviewRepository, UploadRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use crate::services::account::AccountService;

pub use crowdstock_db::entities::upload::UploadStatus;

/// Hours after upload during which deletion is free.
pub const FREE_DELETION_WINDOW_HOURS: i64 = 48;

/// XP penalty accrued per hour past the deletion deadline.
pub const PENALTY_XP_PER_HOUR: i64 = 5;

/// Cap on the late-deletion XP penalty.
pub const MAX_DELETION_PENALTY_XP: i64 = 100;

/// Input for creating a new upload.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUploadInput {
    #[validate(length(min = 1, max = 256))]
    pub filename: String,

    #[validate(length(min = 1, max = 256))]
    pub original_filename: String,

    #[validate(length(min = 1, max = 512))]
    pub file_path: String,

    pub file_size: i64,

    #[validate(length(min = 1, max = 4096))]
    pub description: String,

    #[validate(length(min = 1, max = 64))]
    pub category: String,

    #[serde(default)]
    pub ai_consent: bool,
}

/// Upload service for business logic.
#[derive(Clone)]
pub struct UploadService {
    upload_repo: UploadRepository,
    review_repo: ReviewRepository,
    accounts: AccountService,
    id_gen: IdGenerator,
}

impl UploadService {
    /// Create a new upload service.
    #[must_use]
    pub const fn new(
        upload_repo: UploadRepository,
        review_repo: ReviewRepository,
        accounts: AccountService,
    ) -> Self {
        Self {
            upload_repo,
            review_repo,
            accounts,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new upload.
    ///
    /// Enforces the ban and daily-quota gates, stamps the deletion deadline
    /// at creation time, and charges the bytes against the daily counter.
    pub async fn create_upload(
        &self,
        account_id: &str,
        input: CreateUploadInput,
    ) -> AppResult<upload::Model> {
        input.validate()?;

        if input.file_size <= 0 {
            return Err(AppError::BadRequest("File is empty".to_string()));
        }

        let account = self.accounts.get(account_id).await?;

        if account.is_banned {
            return Err(AppError::Forbidden("Account is banned".to_string()));
        }

        let quota = self.accounts.remaining_quota(&account).await;
        if quota.remaining < input.file_size {
            return Err(AppError::BadRequest(
                "Daily upload quota exceeded".to_string(),
            ));
        }

        let now = Utc::now();
        let model = upload::ActiveModel {
            id: Set(self.id_gen.generate()),
            account_id: Set(account_id.to_string()),
            filename: Set(input.filename),
            original_filename: Set(input.original_filename),
            file_path: Set(input.file_path),
            file_size: Set(input.file_size),
            description: Set(input.description),
            category: Set(input.category),
            status: Set(UploadStatus::Pending),
            ai_consent: Set(input.ai_consent),
            duplicate_score: Set(0.0),
            spam_score: Set(0.0),
            uploaded_at: Set(now.into()),
            // Fixed here, never recomputed
            deletion_deadline: Set((now + Duration::hours(FREE_DELETION_WINDOW_HOURS)).into()),
        };

        let created = self.upload_repo.create(model).await?;

        self.accounts
            .record_upload_usage(account_id, created.file_size)
            .await?;

        Ok(created)
    }

    /// Get an upload by ID.
    pub async fn get(&self, id: &str) -> AppResult<upload::Model> {
        self.upload_repo.get_by_id(id).await
    }

    /// Get uploads for an account (paginated, newest first).
    pub async fn uploads_for_account(
        &self,
        account_id: &str,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<upload::Model>> {
        self.upload_repo
            .find_by_account(account_id, limit, until_id)
            .await
    }

    /// Record duplicate/spam scores computed by the external analysis
    /// pipeline. Scores are clamped to [0, 1].
    pub async fn record_analysis_scores(
        &self,
        upload_id: &str,
        duplicate_score: f64,
        spam_score: f64,
    ) -> AppResult<upload::Model> {
        let upload = self.upload_repo.get_by_id(upload_id).await?;
        let mut active: upload::ActiveModel = upload.into();
        active.duplicate_score = Set(duplicate_score.clamp(0.0, 1.0));
        active.spam_score = Set(spam_score.clamp(0.0, 1.0));
        self.upload_repo.update(active).await
    }

    /// Move an upload through its review lifecycle.
    pub async fn update_status(
        &self,
        upload_id: &str,
        status: UploadStatus,
    ) -> AppResult<upload::Model> {
        let upload = self.upload_repo.get_by_id(upload_id).await?;
        let mut active: upload::ActiveModel = upload.into();
        active.status = Set(status);
        self.upload_repo.update(active).await
    }

    // ========== Deletion Economics ==========

    /// Whether the upload can still be deleted without penalty.
    #[must_use]
    pub fn can_delete_free(upload: &upload::Model) -> bool {
        deletable_free_at(upload.deletion_deadline.with_timezone(&Utc), Utc::now())
    }

    /// XP penalty for deleting the upload now.
    ///
    /// Zero inside the free window, then 5 XP per fractional hour late,
    /// capped at 100.
    #[must_use]
    pub fn deletion_penalty(upload: &upload::Model) -> i64 {
        penalty_at(upload.deletion_deadline.with_timezone(&Utc), Utc::now())
    }

    /// Delete an upload, charging the late penalty against the owner's
    /// lifetime XP. Reviews cascade with the row. Returns the XP charged.
    pub async fn delete_upload(&self, account_id: &str, upload_id: &str) -> AppResult<i64> {
        let upload = self.upload_repo.get_by_id(upload_id).await?;

        if upload.account_id != account_id {
            return Err(AppError::Forbidden("Not your upload".to_string()));
        }

        let penalty = Self::deletion_penalty(&upload);
        if penalty > 0 {
            self.accounts.deduct_xp(account_id, penalty as i32).await?;
            tracing::debug!(
                upload_id = %upload_id,
                penalty_xp = penalty,
                "Charged late-deletion penalty"
            );
        }

        self.upload_repo.delete(upload_id).await?;
        Ok(penalty)
    }

    // ========== Review Aggregation ==========

    /// Fraction of reviews rated good, in [0, 1].
    ///
    /// `None` when the upload has no reviews: no data is not a zero score.
    pub async fn average_rating(&self, upload_id: &str) -> AppResult<Option<f64>> {
        let total = self.review_repo.count_by_upload(upload_id).await?;
        if total == 0 {
            return Ok(None);
        }
        let good = self.review_repo.count_good_by_upload(upload_id).await?;
        Ok(Some(good as f64 / total as f64))
    }
}

/// Whether deletion is free at `now`: strictly before the deadline.
fn deletable_free_at(deadline: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now < deadline
}

/// Penalty in XP for a deletion at `now` against the given deadline.
fn penalty_at(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    if now < deadline {
        return 0;
    }
    let hours_late = (now - deadline).num_seconds() as f64 / 3600.0;
    ((hours_late * PENALTY_XP_PER_HOUR as f64) as i64).min(MAX_DELETION_PENALTY_XP)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use maplit::btreemap;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::sync::Arc;

    fn service_with(db: sea_orm::DatabaseConnection) -> UploadService {
        let db = Arc::new(db);
        UploadService::new(
            UploadRepository::new(db.clone()),
            ReviewRepository::new(db.clone()),
            AccountService::new(crowdstock_db::repositories::AccountRepository::new(db)),
        )
    }

    fn count_result(n: i64) -> Vec<std::collections::BTreeMap<&'static str, Value>> {
        vec![btreemap! { "num_items" => Value::from(n) }]
    }

    #[test]
    fn test_penalty_zero_before_deadline() {
        let deadline = Utc::now();
        let just_before = deadline - Duration::seconds(1);

        assert!(deletable_free_at(deadline, just_before));
        assert_eq!(penalty_at(deadline, just_before), 0);
    }

    #[test]
    fn test_penalty_zero_at_exact_deadline() {
        let deadline = Utc::now();

        // The free window closes at the deadline, but no time has elapsed
        // past it, so the charge is still zero.
        assert!(!deletable_free_at(deadline, deadline));
        assert_eq!(penalty_at(deadline, deadline), 0);
    }

    #[test]
    fn test_penalty_scales_linearly() {
        let deadline = Utc::now();

        assert_eq!(penalty_at(deadline, deadline + Duration::hours(10)), 50);
        assert_eq!(penalty_at(deadline, deadline + Duration::minutes(30)), 2);
        assert_eq!(penalty_at(deadline, deadline + Duration::hours(1)), 5);
    }

    #[test]
    fn test_penalty_caps_at_100() {
        let deadline = Utc::now();

        assert_eq!(penalty_at(deadline, deadline + Duration::hours(25)), 100);
        assert_eq!(penalty_at(deadline, deadline + Duration::days(30)), 100);
    }

    #[test]
    fn test_deadline_is_48_hours() {
        // The window constant is part of the economics contract
        assert_eq!(FREE_DELETION_WINDOW_HOURS, 48);
    }

    #[tokio::test]
    async fn test_average_rating_no_reviews_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([count_result(0)])
            .into_connection();
        let service = service_with(db);

        let rating = service.average_rating("up1").await.unwrap();
        assert!(rating.is_none());
    }

    #[tokio::test]
    async fn test_average_rating_two_thirds() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([count_result(3)])
            .append_query_results([count_result(2)])
            .into_connection();
        let service = service_with(db);

        let rating = service.average_rating("up1").await.unwrap().unwrap();
        assert!((rating - 2.0 / 3.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_create_upload_rejects_empty_file() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service_with(db);

        let input = CreateUploadInput {
            filename: "a.jpg".to_string(),
            original_filename: "a.jpg".to_string(),
            file_path: "/media/a.jpg".to_string(),
            file_size: 0,
            description: "desc".to_string(),
            category: "nature".to_string(),
            ai_consent: false,
        };

        let result = service.create_upload("acc1", input).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}

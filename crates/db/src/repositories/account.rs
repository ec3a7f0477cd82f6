//! Account repository.

use std::sync::Arc;

use crate::entities::{Account, account};
use crowdstock_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, sea_query::Expr,
};

/// Account repository for database operations.
#[derive(Clone)]
pub struct AccountRepository {
    db: Arc<DatabaseConnection>,
}

impl AccountRepository {
    /// Create a new account repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an account by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<account::Model>> {
        Account::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an account by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<account::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::AccountNotFound(id.to_string()))
    }

    /// Find an account by username (case-insensitive).
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<account::Model>> {
        Account::find()
            .filter(account::Column::UsernameLower.eq(username.to_lowercase()))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an account by email.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<account::Model>> {
        Account::find()
            .filter(account::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an account by its referral code.
    pub async fn find_by_referral_code(&self, code: &str) -> AppResult<Option<account::Model>> {
        Account::find()
            .filter(account::Column::ReferralCode.eq(code))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new account.
    pub async fn create(&self, model: account::ActiveModel) -> AppResult<account::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an account.
    pub async fn update(&self, model: account::ActiveModel) -> AppResult<account::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all accounts.
    pub async fn count_all(&self) -> AppResult<u64> {
        Account::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count accounts with strictly more lifetime XP than the given value.
    pub async fn count_with_xp_above(&self, xp: i32) -> AppResult<u64> {
        Account::find()
            .filter(account::Column::XpPoints.gt(xp))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List accounts by lifetime XP, highest first (leaderboard reads).
    pub async fn find_top_by_xp(&self, limit: u64, offset: u64) -> AppResult<Vec<account::Model>> {
        Account::find()
            .order_by_desc(account::Column::XpPoints)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Apply an XP delta to lifetime, weekly, and monthly accumulators in a
    /// single UPDATE.
    ///
    /// Weekly and monthly accumulators only ever increase here; the
    /// week/month-boundary reset belongs to an external scheduled job.
    pub async fn add_xp(&self, account_id: &str, delta: i32) -> AppResult<()> {
        Account::update_many()
            .col_expr(
                account::Column::XpPoints,
                Expr::col(account::Column::XpPoints).add(delta),
            )
            .col_expr(
                account::Column::WeeklyXp,
                Expr::col(account::Column::WeeklyXp).add(delta),
            )
            .col_expr(
                account::Column::MonthlyXp,
                Expr::col(account::Column::MonthlyXp).add(delta),
            )
            .filter(account::Column::Id.eq(account_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Deduct from the lifetime XP balance, floored at zero. Weekly and
    /// monthly accumulators track earnings and are not debited.
    pub async fn deduct_xp(&self, account_id: &str, amount: i32) -> AppResult<()> {
        Account::update_many()
            .col_expr(
                account::Column::XpPoints,
                Expr::cust(format!("GREATEST(xp_points - {amount}, 0)")),
            )
            .filter(account::Column::Id.eq(account_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Add uploaded bytes to the daily usage counter (single UPDATE, no fetch).
    pub async fn add_daily_upload_bytes(&self, account_id: &str, bytes: i64) -> AppResult<()> {
        Account::update_many()
            .col_expr(
                account::Column::DailyUploadBytes,
                Expr::col(account::Column::DailyUploadBytes).add(bytes),
            )
            .filter(account::Column::Id.eq(account_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Zero the daily usage counter and advance the reset timestamp.
    pub async fn reset_daily_usage(
        &self,
        account_id: &str,
        now: chrono::DateTime<chrono::Utc>,
    ) -> AppResult<()> {
        Account::update_many()
            .col_expr(account::Column::DailyUploadBytes, Expr::value(0i64))
            .col_expr(
                account::Column::DailyUploadReset,
                Expr::value(sea_orm::Value::from(now)),
            )
            .filter(account::Column::Id.eq(account_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Initialize the daily reset timestamp without zeroing the counter
    /// (first-ever quota check for this account).
    pub async fn init_daily_reset(
        &self,
        account_id: &str,
        now: chrono::DateTime<chrono::Utc>,
    ) -> AppResult<()> {
        Account::update_many()
            .col_expr(
                account::Column::DailyUploadReset,
                Expr::value(sea_orm::Value::from(now)),
            )
            .filter(account::Column::Id.eq(account_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Set or clear the ban flag directly (admin override path; the strike
    /// engine sets it through its own transaction).
    pub async fn set_ban_flag(&self, account_id: &str, banned: bool) -> AppResult<()> {
        let account = self.get_by_id(account_id).await?;
        let mut active: account::ActiveModel = account.into();
        active.is_banned = Set(banned);
        active.updated_at = Set(Some(chrono::Utc::now().into()));
        active
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_account(id: &str, username: &str) -> account::Model {
        account::Model {
            id: id.to_string(),
            username: username.to_string(),
            username_lower: username.to_lowercase(),
            email: format!("{username}@example.com"),
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
            is_banned: false,
            daily_upload_bytes: 0,
            daily_upload_reset: None,
            accuracy_percentage: 0.0,
            referral_code: Some("ABCD2345".to_string()),
            referred_by: None,
            seasonal_badges: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_id_found() {
        let account = create_test_account("acc1", "tester");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[account.clone()]])
                .into_connection(),
        );

        let repo = AccountRepository::new(db);
        let result = repo.find_by_id("acc1").await.unwrap();

        assert!(result.is_some());
        let found = result.unwrap();
        assert_eq!(found.id, "acc1");
        assert_eq!(found.username, "tester");
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<account::Model>::new()])
                .into_connection(),
        );

        let repo = AccountRepository::new(db);
        let result = repo.find_by_id("nonexistent").await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<account::Model>::new()])
                .into_connection(),
        );

        let repo = AccountRepository::new(db);
        let result = repo.get_by_id("nonexistent").await;

        assert!(result.is_err());
        match result {
            Err(AppError::AccountNotFound(id)) => assert_eq!(id, "nonexistent"),
            _ => panic!("Expected AccountNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_find_by_username_lowercases() {
        let account = create_test_account("acc1", "tester");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[account.clone()]])
                .into_connection(),
        );

        let repo = AccountRepository::new(db);
        let result = repo.find_by_username("TESTER").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().username, "tester");
    }

    #[tokio::test]
    async fn test_create_account() {
        let account = create_test_account("acc1", "newbie");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[account.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = AccountRepository::new(db);

        let active = account::ActiveModel {
            id: Set("acc1".to_string()),
            username: Set("newbie".to_string()),
            username_lower: Set("newbie".to_string()),
            email: Set("newbie@example.com".to_string()),
            password_hash: Set("$argon2id$test".to_string()),
            ..Default::default()
        };

        let result = repo.create(active).await.unwrap();
        assert_eq!(result.username, "newbie");
    }

    #[tokio::test]
    async fn test_add_xp_issues_single_update() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = AccountRepository::new(db);
        repo.add_xp("acc1", 25).await.unwrap();
    }
}

//! Strike repository.

use std::sync::Arc;

use crate::entities::{Strike, account, strike};
use crowdstock_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// Strike count at which an account is banned in either role.
const BAN_STRIKE_THRESHOLD: i32 = 3;

/// Strike repository for database operations.
#[derive(Clone)]
pub struct StrikeRepository {
    db: Arc<DatabaseConnection>,
}

impl StrikeRepository {
    /// Create a new strike repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Record a strike against an account.
    ///
    /// Inserts the strike row, increments the matching role counter, and sets
    /// the ban flag once either counter reaches the threshold. The three
    /// effects commit as one transaction; partial application is never
    /// observable. The ban flag is latching - it is only ever set here, never
    /// cleared.
    pub async fn record(
        &self,
        id: &str,
        account_id: &str,
        kind: strike::StrikeKind,
        reason: &str,
    ) -> AppResult<(strike::Model, account::Model)> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let strike_model = strike::ActiveModel {
            id: Set(id.to_string()),
            account_id: Set(account_id.to_string()),
            kind: Set(kind),
            reason: Set(reason.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };
        let strike = strike_model
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let account = account::Entity::find_by_id(account_id)
            .one(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .ok_or_else(|| AppError::AccountNotFound(account_id.to_string()))?;

        let uploader_strikes = match kind {
            strike::StrikeKind::Uploader => account.uploader_strikes + 1,
            strike::StrikeKind::Reviewer => account.uploader_strikes,
        };
        let reviewer_strikes = match kind {
            strike::StrikeKind::Uploader => account.reviewer_strikes,
            strike::StrikeKind::Reviewer => account.reviewer_strikes + 1,
        };
        let banned = account.is_banned
            || uploader_strikes >= BAN_STRIKE_THRESHOLD
            || reviewer_strikes >= BAN_STRIKE_THRESHOLD;

        let mut active: account::ActiveModel = account.into();
        active.uploader_strikes = Set(uploader_strikes);
        active.reviewer_strikes = Set(reviewer_strikes);
        active.is_banned = Set(banned);
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        let account = active
            .update(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok((strike, account))
    }

    /// Get an account's strike history, newest first.
    pub async fn find_by_account(&self, account_id: &str) -> AppResult<Vec<strike::Model>> {
        Strike::find()
            .filter(strike::Column::AccountId.eq(account_id))
            .order_by_desc(strike::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count an account's strikes of one kind.
    pub async fn count_by_account_and_kind(
        &self,
        account_id: &str,
        kind: strike::StrikeKind,
    ) -> AppResult<u64> {
        Strike::find()
            .filter(strike::Column::AccountId.eq(account_id))
            .filter(strike::Column::Kind.eq(kind))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::strike::StrikeKind;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_strike(id: &str, kind: StrikeKind) -> strike::Model {
        strike::Model {
            id: id.to_string(),
            account_id: "acc1".to_string(),
            kind,
            reason: "duplicate content".to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn create_test_account(uploader_strikes: i32, is_banned: bool) -> account::Model {
        account::Model {
            id: "acc1".to_string(),
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
            uploader_strikes,
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

    #[tokio::test]
    async fn test_record_third_strike_bans() {
        let strike = create_test_strike("s3", StrikeKind::Uploader);
        let before = create_test_account(2, false);
        let after = account::Model {
            uploader_strikes: 3,
            is_banned: true,
            ..before.clone()
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[strike.clone()]])
                .append_query_results([[before]])
                .append_query_results([[after]])
                .append_exec_results([
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                ])
                .into_connection(),
        );

        let repo = StrikeRepository::new(db);
        let (recorded, account) = repo
            .record("s3", "acc1", StrikeKind::Uploader, "duplicate content")
            .await
            .unwrap();

        assert_eq!(recorded.id, "s3");
        assert_eq!(account.uploader_strikes, 3);
        assert!(account.is_banned);
    }

    #[tokio::test]
    async fn test_find_by_account() {
        let s1 = create_test_strike("s1", StrikeKind::Uploader);
        let s2 = create_test_strike("s2", StrikeKind::Reviewer);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[s2, s1]])
                .into_connection(),
        );

        let repo = StrikeRepository::new(db);
        let result = repo.find_by_account("acc1").await.unwrap();

        assert_eq!(result.len(), 2);
    }
}

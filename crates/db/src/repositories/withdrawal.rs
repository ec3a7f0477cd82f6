//! Withdrawal request repository.

use std::sync::Arc;

use crate::entities::{WithdrawalRequest, withdrawal_request};
use crowdstock_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

/// Withdrawal request repository for database operations.
#[derive(Clone)]
pub struct WithdrawalRepository {
    db: Arc<DatabaseConnection>,
}

impl WithdrawalRepository {
    /// Create a new withdrawal repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a withdrawal request by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<withdrawal_request::Model>> {
        WithdrawalRequest::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a withdrawal request by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<withdrawal_request::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("WithdrawalRequest: {id}")))
    }

    /// Create a new withdrawal request.
    pub async fn create(
        &self,
        model: withdrawal_request::ActiveModel,
    ) -> AppResult<withdrawal_request::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a withdrawal request.
    pub async fn update(
        &self,
        model: withdrawal_request::ActiveModel,
    ) -> AppResult<withdrawal_request::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get withdrawal requests for an account, newest first.
    pub async fn find_by_account(
        &self,
        account_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<withdrawal_request::Model>> {
        WithdrawalRequest::find()
            .filter(withdrawal_request::Column::AccountId.eq(account_id))
            .order_by_desc(withdrawal_request::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get pending withdrawal requests (admin queue, oldest first).
    pub async fn find_pending(
        &self,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<withdrawal_request::Model>> {
        WithdrawalRequest::find()
            .filter(
                withdrawal_request::Column::Status
                    .eq(withdrawal_request::WithdrawalStatus::Pending),
            )
            .order_by_asc(withdrawal_request::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count pending withdrawal requests.
    pub async fn count_pending(&self) -> AppResult<u64> {
        WithdrawalRequest::find()
            .filter(
                withdrawal_request::Column::Status
                    .eq(withdrawal_request::WithdrawalStatus::Pending),
            )
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::withdrawal_request::WithdrawalStatus;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_request(id: &str, status: WithdrawalStatus) -> withdrawal_request::Model {
        withdrawal_request::Model {
            id: id.to_string(),
            account_id: "acc1".to_string(),
            amount_xp: 500,
            amount_usd: 5.0,
            status,
            payment_method: Some("paypal".to_string()),
            payment_details: None,
            created_at: Utc::now().into(),
            processed_at: None,
            admin_notes: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_account() {
        let w1 = create_test_request("w1", WithdrawalStatus::Pending);
        let w2 = create_test_request("w2", WithdrawalStatus::Approved);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[w2, w1]])
                .into_connection(),
        );

        let repo = WithdrawalRepository::new(db);
        let result = repo.find_by_account("acc1", 10, 0).await.unwrap();

        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<withdrawal_request::Model>::new()])
                .into_connection(),
        );

        let repo = WithdrawalRepository::new(db);
        assert!(repo.get_by_id("missing").await.is_err());
    }
}

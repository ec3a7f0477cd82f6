//! Contest repository.

use std::sync::Arc;

use crate::entities::{Contest, ContestEntry, contest, contest_entry};
use crowdstock_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    sea_query::Expr,
};

/// Contest repository for database operations.
#[derive(Clone)]
pub struct ContestRepository {
    db: Arc<DatabaseConnection>,
}

impl ContestRepository {
    /// Create a new contest repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a contest by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<contest::Model>> {
        Contest::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a contest by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<contest::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Contest: {id}")))
    }

    /// Create a new contest.
    pub async fn create(&self, model: contest::ActiveModel) -> AppResult<contest::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a contest.
    pub async fn update(&self, model: contest::ActiveModel) -> AppResult<contest::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get active contests, newest first.
    pub async fn find_active(&self) -> AppResult<Vec<contest::Model>> {
        Contest::find()
            .filter(contest::Column::Status.eq(contest::ContestStatus::Active))
            .order_by_desc(contest::Column::StartDate)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ========== Entries ==========

    /// Find an account's entry in a contest.
    pub async fn find_entry(
        &self,
        contest_id: &str,
        account_id: &str,
    ) -> AppResult<Option<contest_entry::Model>> {
        ContestEntry::find()
            .filter(contest_entry::Column::ContestId.eq(contest_id))
            .filter(contest_entry::Column::AccountId.eq(account_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get an entry by ID, returning an error if not found.
    pub async fn get_entry_by_id(&self, id: &str) -> AppResult<contest_entry::Model> {
        ContestEntry::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .ok_or_else(|| AppError::NotFound(format!("ContestEntry: {id}")))
    }

    /// Create a contest entry.
    pub async fn create_entry(
        &self,
        model: contest_entry::ActiveModel,
    ) -> AppResult<contest_entry::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a contest entry.
    pub async fn update_entry(
        &self,
        model: contest_entry::ActiveModel,
    ) -> AppResult<contest_entry::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get all entries for a contest ordered by contest XP, highest first
    /// (the aggregate read behind final ranking).
    pub async fn find_entries_by_xp(&self, contest_id: &str) -> AppResult<Vec<contest_entry::Model>> {
        ContestEntry::find()
            .filter(contest_entry::Column::ContestId.eq(contest_id))
            .order_by_desc(contest_entry::Column::XpEarned)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Increment an entry's upload counter (single UPDATE, no fetch).
    pub async fn increment_entry_uploads(&self, entry_id: &str) -> AppResult<()> {
        ContestEntry::update_many()
            .col_expr(
                contest_entry::Column::UploadsCount,
                Expr::col(contest_entry::Column::UploadsCount).add(1),
            )
            .filter(contest_entry::Column::Id.eq(entry_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Increment an entry's review counter (single UPDATE, no fetch).
    pub async fn increment_entry_reviews(&self, entry_id: &str) -> AppResult<()> {
        ContestEntry::update_many()
            .col_expr(
                contest_entry::Column::ReviewsCount,
                Expr::col(contest_entry::Column::ReviewsCount).add(1),
            )
            .filter(contest_entry::Column::Id.eq(entry_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Add contest XP to an entry (single UPDATE, no fetch).
    pub async fn add_entry_xp(&self, entry_id: &str, delta: i32) -> AppResult<()> {
        ContestEntry::update_many()
            .col_expr(
                contest_entry::Column::XpEarned,
                Expr::col(contest_entry::Column::XpEarned).add(delta),
            )
            .filter(contest_entry::Column::Id.eq(entry_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::contest::ContestStatus;
    use chrono::{Duration, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_contest(id: &str) -> contest::Model {
        let start = Utc::now();
        contest::Model {
            id: id.to_string(),
            name: "August Photo Sprint".to_string(),
            start_date: start.into(),
            upload_phase_end: (start + Duration::days(10)).into(),
            review_phase_end: (start + Duration::days(20)).into(),
            status: ContestStatus::Active,
            total_prize_pool: 16000,
            created_at: start.into(),
        }
    }

    fn create_test_entry(id: &str, xp: i32) -> contest_entry::Model {
        contest_entry::Model {
            id: id.to_string(),
            contest_id: "c1".to_string(),
            account_id: format!("acc-{id}"),
            uploads_count: 1,
            reviews_count: 2,
            xp_earned: xp,
            final_rank: None,
            prize_amount: 0,
        }
    }

    #[tokio::test]
    async fn test_find_active() {
        let contest = create_test_contest("c1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[contest]])
                .into_connection(),
        );

        let repo = ContestRepository::new(db);
        let result = repo.find_active().await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].status, ContestStatus::Active);
    }

    #[tokio::test]
    async fn test_find_entries_by_xp() {
        let e1 = create_test_entry("e1", 300);
        let e2 = create_test_entry("e2", 120);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[e1, e2]])
                .into_connection(),
        );

        let repo = ContestRepository::new(db);
        let result = repo.find_entries_by_xp("c1").await.unwrap();

        assert_eq!(result.len(), 2);
        assert!(result[0].xp_earned >= result[1].xp_earned);
    }
}

//! Badge and weekly award repository.

use std::sync::Arc;

use crate::entities::{Badge, WeeklyAward, badge, weekly_award};
use crowdstock_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Badge repository for database operations.
#[derive(Clone)]
pub struct BadgeRepository {
    db: Arc<DatabaseConnection>,
}

impl BadgeRepository {
    /// Create a new badge repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a badge.
    pub async fn create(&self, model: badge::ActiveModel) -> AppResult<badge::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get an account's badge collection, newest first.
    pub async fn find_by_account(&self, account_id: &str) -> AppResult<Vec<badge::Model>> {
        Badge::find()
            .filter(badge::Column::AccountId.eq(account_id))
            .order_by_desc(badge::Column::EarnedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ========== Weekly Awards ==========

    /// Create a weekly award.
    pub async fn create_award(
        &self,
        model: weekly_award::ActiveModel,
    ) -> AppResult<weekly_award::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get an account's weekly awards, newest first.
    pub async fn find_awards_by_account(
        &self,
        account_id: &str,
    ) -> AppResult<Vec<weekly_award::Model>> {
        WeeklyAward::find()
            .filter(weekly_award::Column::AccountId.eq(account_id))
            .order_by_desc(weekly_award::Column::WeekStart)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an account's award of a given kind for a given week.
    pub async fn find_award(
        &self,
        account_id: &str,
        kind: weekly_award::AwardKind,
        week_start: chrono::DateTime<chrono::Utc>,
    ) -> AppResult<Option<weekly_award::Model>> {
        WeeklyAward::find()
            .filter(weekly_award::Column::AccountId.eq(account_id))
            .filter(weekly_award::Column::Kind.eq(kind))
            .filter(weekly_award::Column::WeekStart.eq(week_start))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

//! Admin action repository.

use std::sync::Arc;

use crate::entities::{AdminAction, admin_action};
use crowdstock_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

/// Admin action repository for database operations.
#[derive(Clone)]
pub struct AdminActionRepository {
    db: Arc<DatabaseConnection>,
}

impl AdminActionRepository {
    /// Create a new admin action repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Record an admin action.
    pub async fn create(&self, model: admin_action::ActiveModel) -> AppResult<admin_action::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get the audit trail for a target entity, newest first.
    pub async fn find_by_target(
        &self,
        target_id: &str,
        limit: u64,
    ) -> AppResult<Vec<admin_action::Model>> {
        AdminAction::find()
            .filter(admin_action::Column::TargetId.eq(target_id))
            .order_by_desc(admin_action::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get actions performed by an admin, newest first.
    pub async fn find_by_admin(
        &self,
        admin_id: &str,
        limit: u64,
    ) -> AppResult<Vec<admin_action::Model>> {
        AdminAction::find()
            .filter(admin_action::Column::AdminId.eq(admin_id))
            .order_by_desc(admin_action::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

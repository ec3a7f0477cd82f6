//! Invite repository.

use std::sync::Arc;

use crate::entities::{Invite, invite};
use crowdstock_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Invite repository for database operations.
#[derive(Clone)]
pub struct InviteRepository {
    db: Arc<DatabaseConnection>,
}

impl InviteRepository {
    /// Create a new invite repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an invite by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<invite::Model>> {
        Invite::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get an invite by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<invite::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Invite: {id}")))
    }

    /// Create a new invite.
    pub async fn create(&self, model: invite::ActiveModel) -> AppResult<invite::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an invite.
    pub async fn update(&self, model: invite::ActiveModel) -> AppResult<invite::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get invites sent by an account, newest first.
    pub async fn find_by_inviter(&self, inviter_id: &str) -> AppResult<Vec<invite::Model>> {
        Invite::find()
            .filter(invite::Column::InviterId.eq(inviter_id))
            .order_by_desc(invite::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the oldest pending invite addressed to an email.
    pub async fn find_pending_by_email(&self, email: &str) -> AppResult<Option<invite::Model>> {
        Invite::find()
            .filter(invite::Column::InviteeEmail.eq(email))
            .filter(invite::Column::Status.eq(invite::InviteStatus::Pending))
            .order_by_asc(invite::Column::CreatedAt)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a pending invite from a specific inviter to an email.
    pub async fn find_pending(
        &self,
        inviter_id: &str,
        email: &str,
    ) -> AppResult<Option<invite::Model>> {
        Invite::find()
            .filter(invite::Column::InviterId.eq(inviter_id))
            .filter(invite::Column::InviteeEmail.eq(email))
            .filter(invite::Column::Status.eq(invite::InviteStatus::Pending))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::invite::InviteStatus;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_invite(id: &str, status: InviteStatus) -> invite::Model {
        invite::Model {
            id: id.to_string(),
            inviter_id: "acc1".to_string(),
            invitee_email: "friend@example.com".to_string(),
            invitee_id: None,
            xp_awarded: 0,
            status,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_pending_by_email() {
        let invite = create_test_invite("i1", InviteStatus::Pending);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[invite]])
                .into_connection(),
        );

        let repo = InviteRepository::new(db);
        let result = repo
            .find_pending_by_email("friend@example.com")
            .await
            .unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().status, InviteStatus::Pending);
    }

    #[tokio::test]
    async fn test_find_by_inviter_empty() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<invite::Model>::new()])
                .into_connection(),
        );

        let repo = InviteRepository::new(db);
        let result = repo.find_by_inviter("acc1").await.unwrap();

        assert!(result.is_empty());
    }
}

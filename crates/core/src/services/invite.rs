//! Invite service: referral bookkeeping.

use chrono::Utc;
use crowdstock_common::{AppError, AppResult, IdGenerator};
use crowdstock_db::{
    entities::{account, invite},
    repositories::{AccountRepository, InviteRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

pub use crowdstock_db::entities::invite::InviteStatus;

/// XP awarded to the inviter when an invite completes.
pub const REFERRAL_XP_AWARD: i32 = 50;

/// Input for creating an invite.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateInviteInput {
    #[validate(email)]
    pub invitee_email: String,
}

/// Invite service for business logic.
#[derive(Clone)]
pub struct InviteService {
    invite_repo: InviteRepository,
    account_repo: AccountRepository,
    id_gen: IdGenerator,
}

impl InviteService {
    /// Create a new invite service.
    #[must_use]
    pub const fn new(invite_repo: InviteRepository, account_repo: AccountRepository) -> Self {
        Self {
            invite_repo,
            account_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Invite someone by email.
    pub async fn create_invite(
        &self,
        inviter_id: &str,
        input: CreateInviteInput,
    ) -> AppResult<invite::Model> {
        input.validate()?;

        let inviter = self.account_repo.get_by_id(inviter_id).await?;
        if inviter.is_banned {
            return Err(AppError::Forbidden("Account is banned".to_string()));
        }

        let email = input.invitee_email.trim().to_lowercase();

        if self
            .account_repo
            .find_by_email(&email)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        if self
            .invite_repo
            .find_pending(inviter_id, &email)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "A pending invite for this email already exists".to_string(),
            ));
        }

        let model = invite::ActiveModel {
            id: Set(self.id_gen.generate()),
            inviter_id: Set(inviter_id.to_string()),
            invitee_email: Set(email),
            invitee_id: Set(None),
            xp_awarded: Set(0),
            status: Set(InviteStatus::Pending),
            created_at: Set(Utc::now().into()),
        };

        self.invite_repo.create(model).await
    }

    /// Complete the oldest pending invite for an email, if any.
    ///
    /// Called after the invitee registers. Awards the inviter the referral
    /// XP through the rollup and links the invitee's referral chain if it
    /// is not already set. Returns `None` when no invite was waiting.
    pub async fn complete_invite(
        &self,
        email: &str,
        invitee: &account::Model,
    ) -> AppResult<Option<invite::Model>> {
        let email = email.trim().to_lowercase();

        let Some(pending) = self.invite_repo.find_pending_by_email(&email).await? else {
            return Ok(None);
        };

        let inviter = self.account_repo.get_by_id(&pending.inviter_id).await?;

        let mut active: invite::ActiveModel = pending.into();
        active.status = Set(InviteStatus::Completed);
        active.invitee_id = Set(Some(invitee.id.clone()));
        active.xp_awarded = Set(REFERRAL_XP_AWARD);
        let completed = self.invite_repo.update(active).await?;

        self.account_repo
            .add_xp(&inviter.id, REFERRAL_XP_AWARD)
            .await?;

        // Link the referral chain unless registration already did
        if invitee.referred_by.is_none() && inviter.referral_code.is_some() {
            let mut invitee_active: account::ActiveModel = invitee.clone().into();
            invitee_active.referred_by = Set(inviter.referral_code);
            invitee_active.updated_at = Set(Some(Utc::now().into()));
            self.account_repo.update(invitee_active).await?;
        }

        tracing::debug!(
            inviter_id = %completed.inviter_id,
            invitee_id = %invitee.id,
            "Referral invite completed"
        );

        Ok(Some(completed))
    }

    /// Get invites sent by an account, newest first.
    pub async fn invites_by_account(&self, inviter_id: &str) -> AppResult<Vec<invite::Model>> {
        self.invite_repo.find_by_inviter(inviter_id).await
    }
}

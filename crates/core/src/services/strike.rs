//! Strike and ban engine.

use crowdstock_common::{AppError, AppResult, IdGenerator};
use crowdstock_db::{
    entities::{account, admin_action, strike},
    repositories::{AccountRepository, AdminActionRepository, StrikeRepository},
};
use sea_orm::Set;

pub use crowdstock_db::entities::strike::StrikeKind;

/// Strike service for business logic.
#[derive(Clone)]
pub struct StrikeService {
    strike_repo: StrikeRepository,
    account_repo: AccountRepository,
    admin_repo: AdminActionRepository,
    id_gen: IdGenerator,
}

impl StrikeService {
    /// Create a new strike service.
    #[must_use]
    pub const fn new(
        strike_repo: StrikeRepository,
        account_repo: AccountRepository,
        admin_repo: AdminActionRepository,
    ) -> Self {
        Self {
            strike_repo,
            account_repo,
            admin_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Parse a strike kind from the outer layer's string form.
    ///
    /// Unrecognized kinds are rejected; a strike that silently counted
    /// against nothing would be indistinguishable from a recorded one.
    pub fn parse_kind(kind: &str) -> AppResult<StrikeKind> {
        match kind {
            "uploader" => Ok(StrikeKind::Uploader),
            "reviewer" => Ok(StrikeKind::Reviewer),
            other => Err(AppError::Validation(format!(
                "Unknown strike kind: {other}"
            ))),
        }
    }

    /// Record a strike against an account.
    ///
    /// Appends the immutable strike record, increments the matching role
    /// counter, and bans the account once either counter reaches three. The
    /// three effects commit as a single transaction.
    pub async fn add_strike(
        &self,
        account_id: &str,
        kind: StrikeKind,
        reason: &str,
    ) -> AppResult<(strike::Model, account::Model)> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(AppError::BadRequest("Strike reason is required".to_string()));
        }
        if reason.len() > 500 {
            return Err(AppError::BadRequest("Strike reason too long".to_string()));
        }

        let id = self.id_gen.generate();
        let (strike, account) = self.strike_repo.record(&id, account_id, kind, reason).await?;

        if account.is_banned {
            tracing::info!(
                account_id = %account.id,
                uploader_strikes = account.uploader_strikes,
                reviewer_strikes = account.reviewer_strikes,
                "Account banned by strike threshold"
            );
        }

        Ok((strike, account))
    }

    /// Get an account's strike history, newest first.
    pub async fn strike_history(&self, account_id: &str) -> AppResult<Vec<strike::Model>> {
        self.strike_repo.find_by_account(account_id).await
    }

    /// Lift a ban. The ban flag never clears automatically; this is the
    /// explicit admin override, recorded in the audit trail. Strike counters
    /// are left untouched.
    pub async fn lift_ban(
        &self,
        admin_id: &str,
        account_id: &str,
        reason: &str,
    ) -> AppResult<()> {
        let account = self.account_repo.get_by_id(account_id).await?;
        if !account.is_banned {
            return Err(AppError::BadRequest("Account is not banned".to_string()));
        }

        self.account_repo.set_ban_flag(account_id, false).await?;

        let action = admin_action::ActiveModel {
            id: Set(self.id_gen.generate()),
            admin_id: Set(admin_id.to_string()),
            action_type: Set("lift_ban".to_string()),
            target_id: Set(account_id.to_string()),
            description: Set(reason.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };
        self.admin_repo.create(action).await?;

        Ok(())
    }
}

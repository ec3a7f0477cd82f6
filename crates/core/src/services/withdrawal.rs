//! Withdrawal service: XP-to-cash conversion lifecycle.

use chrono::Utc;
use crowdstock_common::{AppError, AppResult, EconomyConfig, IdGenerator};
use crowdstock_db::{
    entities::{admin_action, withdrawal_request},
    repositories::{AccountRepository, AdminActionRepository, WithdrawalRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

pub use crowdstock_db::entities::withdrawal_request::WithdrawalStatus;

/// Input for requesting a withdrawal.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateWithdrawalInput {
    pub amount_xp: i32,

    #[validate(length(min = 1, max = 128))]
    pub payment_method: String,

    #[validate(length(max = 4096))]
    pub payment_details: Option<String>,
}

/// Withdrawal service for business logic.
#[derive(Clone)]
pub struct WithdrawalService {
    withdrawal_repo: WithdrawalRepository,
    account_repo: AccountRepository,
    admin_repo: AdminActionRepository,
    economy: EconomyConfig,
    id_gen: IdGenerator,
}

impl WithdrawalService {
    /// Create a new withdrawal service.
    #[must_use]
    pub const fn new(
        withdrawal_repo: WithdrawalRepository,
        account_repo: AccountRepository,
        admin_repo: AdminActionRepository,
        economy: EconomyConfig,
    ) -> Self {
        Self {
            withdrawal_repo,
            account_repo,
            admin_repo,
            economy,
            id_gen: IdGenerator::new(),
        }
    }

    /// Request an XP-to-cash withdrawal.
    ///
    /// Requires KYC approval and a sufficient lifetime XP balance. The USD
    /// value is fixed at the conversion rate in effect now; the XP itself is
    /// only deducted if an admin approves.
    pub async fn request_withdrawal(
        &self,
        account_id: &str,
        input: CreateWithdrawalInput,
    ) -> AppResult<withdrawal_request::Model> {
        input.validate()?;

        let account = self.account_repo.get_by_id(account_id).await?;

        if !account.kyc_verified {
            return Err(AppError::Forbidden(
                "KYC verification required for withdrawals".to_string(),
            ));
        }

        if input.amount_xp < self.economy.min_withdrawal_xp {
            return Err(AppError::BadRequest(format!(
                "Minimum withdrawal is {} XP",
                self.economy.min_withdrawal_xp
            )));
        }

        if input.amount_xp > account.xp_points {
            return Err(AppError::BadRequest(
                "Insufficient XP balance".to_string(),
            ));
        }

        let model = withdrawal_request::ActiveModel {
            id: Set(self.id_gen.generate()),
            account_id: Set(account_id.to_string()),
            amount_xp: Set(input.amount_xp),
            amount_usd: Set(usd_value(input.amount_xp, self.economy.xp_to_usd_rate)),
            status: Set(WithdrawalStatus::Pending),
            payment_method: Set(Some(input.payment_method)),
            payment_details: Set(input.payment_details),
            created_at: Set(Utc::now().into()),
            processed_at: Set(None),
            admin_notes: Set(None),
        };

        self.withdrawal_repo.create(model).await
    }

    /// Approve a pending request, deducting the XP.
    pub async fn approve(
        &self,
        admin_id: &str,
        request_id: &str,
        notes: Option<String>,
    ) -> AppResult<withdrawal_request::Model> {
        let request = self.withdrawal_repo.get_by_id(request_id).await?;

        if request.status != WithdrawalStatus::Pending {
            return Err(AppError::BadRequest(
                "Request already processed".to_string(),
            ));
        }

        // Deduction happens at approval, not request time, so a rejected
        // request never touches the balance.
        self.account_repo
            .deduct_xp(&request.account_id, request.amount_xp)
            .await?;

        let mut active: withdrawal_request::ActiveModel = request.into();
        active.status = Set(WithdrawalStatus::Approved);
        active.processed_at = Set(Some(Utc::now().into()));
        active.admin_notes = Set(notes.clone());
        let updated = self.withdrawal_repo.update(active).await?;

        self.record_action(admin_id, "approve_withdrawal", request_id, notes)
            .await?;

        Ok(updated)
    }

    /// Reject a pending request. The balance is untouched.
    pub async fn reject(
        &self,
        admin_id: &str,
        request_id: &str,
        notes: Option<String>,
    ) -> AppResult<withdrawal_request::Model> {
        let request = self.withdrawal_repo.get_by_id(request_id).await?;

        if request.status != WithdrawalStatus::Pending {
            return Err(AppError::BadRequest(
                "Request already processed".to_string(),
            ));
        }

        let mut active: withdrawal_request::ActiveModel = request.into();
        active.status = Set(WithdrawalStatus::Rejected);
        active.processed_at = Set(Some(Utc::now().into()));
        active.admin_notes = Set(notes.clone());
        let updated = self.withdrawal_repo.update(active).await?;

        self.record_action(admin_id, "reject_withdrawal", request_id, notes)
            .await?;

        Ok(updated)
    }

    /// Get withdrawal requests for an account, newest first.
    pub async fn withdrawals_for_account(
        &self,
        account_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<withdrawal_request::Model>> {
        self.withdrawal_repo
            .find_by_account(account_id, limit, offset)
            .await
    }

    /// Get the pending admin queue, oldest first.
    pub async fn pending_queue(
        &self,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<withdrawal_request::Model>> {
        self.withdrawal_repo.find_pending(limit, offset).await
    }

    async fn record_action(
        &self,
        admin_id: &str,
        action_type: &str,
        target_id: &str,
        notes: Option<String>,
    ) -> AppResult<()> {
        let action = admin_action::ActiveModel {
            id: Set(self.id_gen.generate()),
            admin_id: Set(admin_id.to_string()),
            action_type: Set(action_type.to_string()),
            target_id: Set(target_id.to_string()),
            description: Set(notes.unwrap_or_default()),
            created_at: Set(Utc::now().into()),
        };
        self.admin_repo.create(action).await?;
        Ok(())
    }
}

/// USD value of an XP amount at the given conversion rate.
fn usd_value(amount_xp: i32, rate: f64) -> f64 {
    f64::from(amount_xp) * rate
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crowdstock_db::entities::account;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn service_with(db: sea_orm::DatabaseConnection) -> WithdrawalService {
        let db = Arc::new(db);
        WithdrawalService::new(
            WithdrawalRepository::new(db.clone()),
            AccountRepository::new(db.clone()),
            AdminActionRepository::new(db),
            EconomyConfig::default(),
        )
    }

    fn create_test_account(kyc_verified: bool, xp_points: i32) -> account::Model {
        account::Model {
            id: "acc1".to_string(),
            username: "tester".to_string(),
            username_lower: "tester".to_string(),
            email: "tester@example.com".to_string(),
            password_hash: "$argon2id$test".to_string(),
            is_verified: true,
            kyc_verified,
            document_path: None,
            selfie_path: None,
            xp_points,
            weekly_xp: 0,
            monthly_xp: 0,
            uploader_strikes: 0,
            reviewer_strikes: 0,
            is_banned: false,
            daily_upload_bytes: 0,
            daily_upload_reset: None,
            accuracy_percentage: 0.0,
            referral_code: None,
            referred_by: None,
            seasonal_badges: None,
            created_at: chrono::Utc::now().into(),
            updated_at: None,
        }
    }

    fn valid_input(amount_xp: i32) -> CreateWithdrawalInput {
        CreateWithdrawalInput {
            amount_xp,
            payment_method: "paypal".to_string(),
            payment_details: None,
        }
    }

    #[test]
    fn test_usd_value() {
        assert!((usd_value(500, 0.01) - 5.0).abs() < f64::EPSILON);
        assert!((usd_value(0, 0.01)).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_request_requires_kyc() {
        let account = create_test_account(false, 10_000);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[account]])
            .into_connection();
        let service = service_with(db);

        let result = service.request_withdrawal("acc1", valid_input(500)).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_request_rejects_below_minimum() {
        let account = create_test_account(true, 10_000);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[account]])
            .into_connection();
        let service = service_with(db);

        let result = service.request_withdrawal("acc1", valid_input(50)).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_request_rejects_overdraw() {
        let account = create_test_account(true, 400);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[account]])
            .into_connection();
        let service = service_with(db);

        let result = service.request_withdrawal("acc1", valid_input(500)).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_approve_rejects_processed_request() {
        let request = withdrawal_request::Model {
            id: "w1".to_string(),
            account_id: "acc1".to_string(),
            amount_xp: 500,
            amount_usd: 5.0,
            status: WithdrawalStatus::Approved,
            payment_method: Some("paypal".to_string()),
            payment_details: None,
            created_at: chrono::Utc::now().into(),
            processed_at: Some(chrono::Utc::now().into()),
            admin_notes: None,
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[request]])
            .into_connection();
        let service = service_with(db);

        let result = service.approve("admin1", "w1", None).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}

//! Account service.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Utc};
use crowdstock_common::{AppError, AppResult, IdGenerator};
use crowdstock_db::{entities::account, repositories::AccountRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Daily upload ceiling per account: 500 MiB.
pub const DAILY_UPLOAD_LIMIT: i64 = 500 * 1024 * 1024;

/// Why a quota answer is a degraded default rather than a computed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaFallback {
    /// Persisting the daily-window reset failed; the full ceiling was
    /// returned instead of an accurate remainder.
    ResetPersistFailed,
}

/// Result of a daily-quota check.
///
/// Carries either the computed remainder or the full-ceiling default with a
/// tag saying why, so callers can tell real data from a degraded answer.
#[derive(Debug, Clone, Copy)]
pub struct QuotaStatus {
    /// Remaining bytes the account may upload today.
    pub remaining: i64,
    /// Present when the value is a fail-safe default, not a computed one.
    pub fallback: Option<QuotaFallback>,
}

impl QuotaStatus {
    /// Whether this answer is a degraded default.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.fallback.is_some()
    }
}

/// Input for registering a new account.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterAccountInput {
    #[validate(length(min = 1, max = 128))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    /// Referral code of the account that referred this one.
    pub referred_by: Option<String>,
}

/// Input for submitting KYC documents.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitKycInput {
    #[validate(length(min = 1, max = 512))]
    pub document_path: String,

    #[validate(length(min = 1, max = 512))]
    pub selfie_path: String,
}

/// Account service for business logic.
#[derive(Clone)]
pub struct AccountService {
    account_repo: AccountRepository,
    id_gen: IdGenerator,
}

impl AccountService {
    /// Create a new account service.
    #[must_use]
    pub const fn new(account_repo: AccountRepository) -> Self {
        Self {
            account_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Register a new account.
    pub async fn register(&self, input: RegisterAccountInput) -> AppResult<account::Model> {
        input.validate()?;

        if self
            .account_repo
            .find_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Username already taken".to_string()));
        }

        if self
            .account_repo
            .find_by_email(&input.email)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        // Resolve the referral code before creating anything
        let referred_by = match input.referred_by {
            Some(code) => {
                let code = code.trim().to_uppercase();
                if self
                    .account_repo
                    .find_by_referral_code(&code)
                    .await?
                    .is_none()
                {
                    return Err(AppError::BadRequest("Unknown referral code".to_string()));
                }
                Some(code)
            }
            None => None,
        };

        let password_hash = hash_password(&input.password)?;
        let account_id = self.id_gen.generate();
        let referral_code = self.id_gen.generate_referral_code();

        let model = account::ActiveModel {
            id: Set(account_id),
            username: Set(input.username.clone()),
            username_lower: Set(input.username.to_lowercase()),
            email: Set(input.email),
            password_hash: Set(password_hash),
            referral_code: Set(Some(referral_code)),
            referred_by: Set(referred_by),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        self.account_repo.create(model).await
    }

    /// Get an account by ID.
    pub async fn get(&self, id: &str) -> AppResult<account::Model> {
        self.account_repo.get_by_id(id).await
    }

    /// Authenticate an account by username and password.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<account::Model> {
        let account = self
            .account_repo
            .find_by_username(username)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !verify_password(password, &account.password_hash)? {
            return Err(AppError::Unauthorized);
        }

        Ok(account)
    }

    /// Mark an account's email as verified.
    pub async fn mark_verified(&self, account_id: &str) -> AppResult<account::Model> {
        let account = self.account_repo.get_by_id(account_id).await?;
        let mut active: account::ActiveModel = account.into();
        active.is_verified = Set(true);
        active.updated_at = Set(Some(Utc::now().into()));
        self.account_repo.update(active).await
    }

    /// Store KYC document paths. Approval is a separate admin step.
    pub async fn submit_kyc(
        &self,
        account_id: &str,
        input: SubmitKycInput,
    ) -> AppResult<account::Model> {
        input.validate()?;

        let account = self.account_repo.get_by_id(account_id).await?;
        let mut active: account::ActiveModel = account.into();
        active.document_path = Set(Some(input.document_path));
        active.selfie_path = Set(Some(input.selfie_path));
        active.updated_at = Set(Some(Utc::now().into()));
        self.account_repo.update(active).await
    }

    /// Approve an account's KYC submission, unlocking withdrawals.
    pub async fn approve_kyc(&self, account_id: &str) -> AppResult<account::Model> {
        let account = self.account_repo.get_by_id(account_id).await?;

        if account.document_path.is_none() || account.selfie_path.is_none() {
            return Err(AppError::BadRequest(
                "No KYC documents submitted".to_string(),
            ));
        }

        let mut active: account::ActiveModel = account.into();
        active.kyc_verified = Set(true);
        active.updated_at = Set(Some(Utc::now().into()));
        self.account_repo.update(active).await
    }

    /// Record the review-accuracy percentage computed by the external
    /// analysis pipeline. Clamped to [0, 100].
    pub async fn set_accuracy_percentage(
        &self,
        account_id: &str,
        percentage: f64,
    ) -> AppResult<account::Model> {
        let account = self.account_repo.get_by_id(account_id).await?;
        let mut active: account::ActiveModel = account.into();
        active.accuracy_percentage = Set(percentage.clamp(0.0, 100.0));
        active.updated_at = Set(Some(Utc::now().into()));
        self.account_repo.update(active).await
    }

    // ========== Daily Quota ==========

    /// Remaining daily upload capacity in bytes.
    ///
    /// If the stored reset timestamp's calendar date (UTC) is before today,
    /// the byte counter is zeroed and the reset timestamp advances to now;
    /// that mutation is persisted here, not deferred to the caller. An absent
    /// reset timestamp is initialized to now without zeroing.
    ///
    /// A persistence fault during the reset check never propagates: the
    /// method degrades to the full ceiling and tags the answer, favoring
    /// availability over strict quota accuracy.
    pub async fn remaining_quota(&self, account: &account::Model) -> QuotaStatus {
        let now = Utc::now();

        let used = match self.refresh_daily_window(account, now).await {
            Ok(used) => used,
            Err(e) => {
                tracing::warn!(
                    account_id = %account.id,
                    error = %e,
                    "Daily quota reset failed, degrading to full ceiling"
                );
                return QuotaStatus {
                    remaining: DAILY_UPLOAD_LIMIT,
                    fallback: Some(QuotaFallback::ResetPersistFailed),
                };
            }
        };

        QuotaStatus {
            remaining: (DAILY_UPLOAD_LIMIT - used).max(0),
            fallback: None,
        }
    }

    /// Roll the daily window forward if needed; returns bytes used today.
    async fn refresh_daily_window(
        &self,
        account: &account::Model,
        now: DateTime<Utc>,
    ) -> AppResult<i64> {
        match account.daily_upload_reset {
            Some(reset) if window_rolled_over(reset.with_timezone(&Utc), now) => {
                self.account_repo.reset_daily_usage(&account.id, now).await?;
                Ok(0)
            }
            Some(_) => Ok(account.daily_upload_bytes),
            None => {
                // First quota check ever: stamp the window without zeroing
                self.account_repo.init_daily_reset(&account.id, now).await?;
                Ok(account.daily_upload_bytes)
            }
        }
    }

    /// Whether the account may upload a file of the given size.
    ///
    /// True iff the remaining quota covers the size and the account is not
    /// banned. Shares the reset side effect of [`Self::remaining_quota`].
    pub async fn can_upload(&self, account: &account::Model, size: i64) -> bool {
        self.remaining_quota(account).await.remaining >= size && !account.is_banned
    }

    /// Record uploaded bytes against the daily counter.
    pub async fn record_upload_usage(&self, account_id: &str, bytes: i64) -> AppResult<()> {
        self.account_repo
            .add_daily_upload_bytes(account_id, bytes)
            .await
    }

    // ========== XP Rollup ==========

    /// Apply an XP delta to the lifetime, weekly, and monthly accumulators.
    ///
    /// The weekly and monthly accumulators are never reset by this layer;
    /// an external scheduled maintenance job must reset them on week/month
    /// boundaries. Without that job they increase monotonically.
    pub async fn apply_xp(&self, account_id: &str, delta: i32) -> AppResult<()> {
        self.account_repo.add_xp(account_id, delta).await
    }

    /// Deduct from the lifetime XP balance, floored at zero.
    pub async fn deduct_xp(&self, account_id: &str, amount: i32) -> AppResult<()> {
        self.account_repo.deduct_xp(account_id, amount).await
    }
}

/// Whether the daily window has rolled over: the reset timestamp's calendar
/// date (UTC) is strictly before today's.
fn window_rolled_over(reset: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now.date_naive() > reset.date_naive()
}

/// Hash a password using Argon2.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

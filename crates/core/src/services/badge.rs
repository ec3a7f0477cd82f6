//! Badge tiering and award service.

use chrono::{DateTime, Utc};
use crowdstock_common::{AppError, AppResult, IdGenerator};
use crowdstock_db::{
    entities::{account, badge, weekly_award},
    repositories::{AccountRepository, BadgeRepository},
};
use sea_orm::Set;

pub use crowdstock_db::entities::badge::BadgeKind;
pub use crowdstock_db::entities::weekly_award::AwardKind;

/// XP bonus granted with a weekly award.
pub const WEEKLY_AWARD_XP_BONUS: i32 = 100;

/// Percentile-derived display rank. Recomputed on demand, never stored as
/// ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeTier {
    Top1,
    Top5,
    Top10,
    Top25,
    Top50,
    ActiveUser,
    #[default]
    NewUser,
}

impl BadgeTier {
    /// Display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top1 => "Top 1%",
            Self::Top5 => "Top 5%",
            Self::Top10 => "Top 10%",
            Self::Top25 => "Top 25%",
            Self::Top50 => "Top 50%",
            Self::ActiveUser => "Active User",
            Self::NewUser => "New User",
        }
    }

    /// Display color for the tier (product UI palette).
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Top1 => "danger",    // Fire badge (red)
            Self::Top5 => "warning",   // Gold
            Self::Top10 => "light",    // Silver
            Self::Top25 => "dark",     // Bronze
            Self::Top50 => "primary",  // Blue
            Self::ActiveUser | Self::NewUser => "secondary",
        }
    }
}

/// Why a tier answer is a degraded default rather than a computed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierFallback {
    /// The population counts could not be read; `NewUser` was returned.
    CountUnavailable,
}

/// Result of a badge-tier computation.
#[derive(Debug, Clone, Copy)]
pub struct TierStatus {
    /// The computed (or fail-safe) tier.
    pub tier: BadgeTier,
    /// Present when the tier is a fail-safe default, not a computed one.
    pub fallback: Option<TierFallback>,
}

impl TierStatus {
    /// Whether this answer is a degraded default.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.fallback.is_some()
    }
}

/// Badge service for business logic.
#[derive(Clone)]
pub struct BadgeService {
    badge_repo: BadgeRepository,
    account_repo: AccountRepository,
    id_gen: IdGenerator,
}

impl BadgeService {
    /// Create a new badge service.
    #[must_use]
    pub const fn new(badge_repo: BadgeRepository, account_repo: AccountRepository) -> Self {
        Self {
            badge_repo,
            account_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Compute the account's badge tier from its XP percentile rank.
    ///
    /// percentile = accounts with strictly more XP / total accounts * 100.
    /// Recomputes over the full population on every call; accepted at
    /// current scale. Zero accounts or any persistence fault yield the
    /// fail-safe `NewUser`, the latter tagged in the result.
    pub async fn badge_tier(&self, account: &account::Model) -> TierStatus {
        let counts = async {
            let total = self.account_repo.count_all().await?;
            if total == 0 {
                return Ok::<_, AppError>(None);
            }
            let above = self
                .account_repo
                .count_with_xp_above(account.xp_points)
                .await?;
            Ok(Some((above, total)))
        };

        match counts.await {
            Ok(None) => TierStatus {
                tier: BadgeTier::NewUser,
                fallback: None,
            },
            Ok(Some((above, total))) => {
                let percentile = (above as f64 / total as f64) * 100.0;
                TierStatus {
                    tier: tier_for_percentile(percentile),
                    fallback: None,
                }
            }
            Err(e) => {
                tracing::warn!(
                    account_id = %account.id,
                    error = %e,
                    "Badge tier computation failed, degrading to New User"
                );
                TierStatus {
                    tier: BadgeTier::NewUser,
                    fallback: Some(TierFallback::CountUnavailable),
                }
            }
        }
    }

    /// Display color for the account's current tier.
    pub async fn badge_color(&self, account: &account::Model) -> &'static str {
        self.badge_tier(account).await.tier.color()
    }

    /// Grant a badge to an account.
    pub async fn award_badge(
        &self,
        account_id: &str,
        kind: BadgeKind,
        badge_name: &str,
        description: Option<String>,
        is_animated: bool,
    ) -> AppResult<badge::Model> {
        self.account_repo.get_by_id(account_id).await?;

        let model = badge::ActiveModel {
            id: Set(self.id_gen.generate()),
            account_id: Set(account_id.to_string()),
            kind: Set(kind),
            badge_name: Set(badge_name.to_string()),
            description: Set(description),
            earned_at: Set(Utc::now().into()),
            is_animated: Set(is_animated),
        };

        self.badge_repo.create(model).await
    }

    /// Get an account's badge collection, newest first.
    pub async fn badges(&self, account_id: &str) -> AppResult<Vec<badge::Model>> {
        self.badge_repo.find_by_account(account_id).await
    }

    /// Grant a weekly award and its XP bonus.
    ///
    /// One award of a kind per account per week; the bonus feeds the XP
    /// rollup like any other earning.
    pub async fn grant_weekly_award(
        &self,
        account_id: &str,
        kind: AwardKind,
        week_start: DateTime<Utc>,
    ) -> AppResult<weekly_award::Model> {
        self.account_repo.get_by_id(account_id).await?;

        if self
            .badge_repo
            .find_award(account_id, kind, week_start)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "Award already granted for this week".to_string(),
            ));
        }

        let model = weekly_award::ActiveModel {
            id: Set(self.id_gen.generate()),
            account_id: Set(account_id.to_string()),
            kind: Set(kind),
            week_start: Set(week_start.into()),
            xp_bonus: Set(WEEKLY_AWARD_XP_BONUS),
            created_at: Set(Utc::now().into()),
        };

        let award = self.badge_repo.create_award(model).await?;
        self.account_repo
            .add_xp(account_id, WEEKLY_AWARD_XP_BONUS)
            .await?;

        Ok(award)
    }

    /// The account's seasonal badge collection, an opaque serialized blob
    /// owned by the display layer. Re-emitted verbatim.
    #[must_use]
    pub fn seasonal_badges(account: &account::Model) -> Option<&str> {
        account.seasonal_badges.as_deref()
    }

    /// Replace the seasonal badge blob. Stored verbatim, never inspected.
    pub async fn set_seasonal_badges(
        &self,
        account_id: &str,
        raw: Option<String>,
    ) -> AppResult<account::Model> {
        let account = self.account_repo.get_by_id(account_id).await?;
        let mut active: account::ActiveModel = account.into();
        active.seasonal_badges = Set(raw);
        active.updated_at = Set(Some(Utc::now().into()));
        self.account_repo.update(active).await
    }
}

/// Map a percentile to its tier. Thresholds are evaluated in order; first
/// match wins.
fn tier_for_percentile(percentile: f64) -> BadgeTier {
    if percentile <= 1.0 {
        BadgeTier::Top1
    } else if percentile <= 5.0 {
        BadgeTier::Top5
    } else if percentile <= 10.0 {
        BadgeTier::Top10
    } else if percentile <= 25.0 {
        BadgeTier::Top25
    } else if percentile <= 50.0 {
        BadgeTier::Top50
    } else {
        BadgeTier::ActiveUser
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use maplit::btreemap;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, RuntimeErr, Value};
    use std::sync::Arc;

    fn create_test_account(id: &str, xp: i32) -> account::Model {
        account::Model {
            id: id.to_string(),
            username: "tester".to_string(),
            username_lower: "tester".to_string(),
            email: "tester@example.com".to_string(),
            password_hash: "$argon2id$test".to_string(),
            is_verified: false,
            kyc_verified: false,
            document_path: None,
            selfie_path: None,
            xp_points: xp,
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
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service_with(db: sea_orm::DatabaseConnection) -> BadgeService {
        let db = Arc::new(db);
        BadgeService::new(BadgeRepository::new(db.clone()), AccountRepository::new(db))
    }

    fn count_result(n: i64) -> Vec<std::collections::BTreeMap<&'static str, Value>> {
        vec![btreemap! { "num_items" => Value::from(n) }]
    }

    #[test]
    fn test_tier_for_percentile_thresholds() {
        assert_eq!(tier_for_percentile(0.0), BadgeTier::Top1);
        assert_eq!(tier_for_percentile(1.0), BadgeTier::Top1);
        assert_eq!(tier_for_percentile(1.1), BadgeTier::Top5);
        assert_eq!(tier_for_percentile(5.0), BadgeTier::Top5);
        assert_eq!(tier_for_percentile(10.0), BadgeTier::Top10);
        assert_eq!(tier_for_percentile(25.0), BadgeTier::Top25);
        assert_eq!(tier_for_percentile(50.0), BadgeTier::Top50);
        assert_eq!(tier_for_percentile(50.1), BadgeTier::ActiveUser);
        assert_eq!(tier_for_percentile(99.0), BadgeTier::ActiveUser);
    }

    #[test]
    fn test_tier_colors() {
        assert_eq!(BadgeTier::Top1.color(), "danger");
        assert_eq!(BadgeTier::Top5.color(), "warning");
        assert_eq!(BadgeTier::Top10.color(), "light");
        assert_eq!(BadgeTier::Top25.color(), "dark");
        assert_eq!(BadgeTier::Top50.color(), "primary");
        assert_eq!(BadgeTier::ActiveUser.color(), "secondary");
        assert_eq!(BadgeTier::NewUser.color(), "secondary");
    }

    #[test]
    fn test_tier_display_names() {
        assert_eq!(BadgeTier::Top1.as_str(), "Top 1%");
        assert_eq!(BadgeTier::NewUser.as_str(), "New User");
    }

    #[tokio::test]
    async fn test_badge_tier_zero_accounts_is_new_user() {
        let account = create_test_account("acc1", 0);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([count_result(0)])
            .into_connection();
        let service = service_with(db);

        let status = service.badge_tier(&account).await;

        assert_eq!(status.tier, BadgeTier::NewUser);
        assert!(!status.is_degraded());
    }

    #[tokio::test]
    async fn test_badge_tier_top_account_is_top1() {
        let account = create_test_account("acc1", 10_000);

        // 5 accounts total, none above this one: percentile 0
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([count_result(5)])
            .append_query_results([count_result(0)])
            .into_connection();
        let service = service_with(db);

        let status = service.badge_tier(&account).await;

        assert_eq!(status.tier, BadgeTier::Top1);
    }

    #[tokio::test]
    async fn test_badge_tier_mid_population() {
        let account = create_test_account("acc1", 100);

        // 30 of 100 accounts above: 30th percentile -> Top 50%
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([count_result(100)])
            .append_query_results([count_result(30)])
            .into_connection();
        let service = service_with(db);

        let status = service.badge_tier(&account).await;

        assert_eq!(status.tier, BadgeTier::Top50);
    }

    #[tokio::test]
    async fn test_badge_tier_degrades_on_count_failure() {
        let account = create_test_account("acc1", 100);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Query(RuntimeErr::Internal(
                "connection lost".to_string(),
            ))])
            .into_connection();
        let service = service_with(db);

        let status = service.badge_tier(&account).await;

        assert_eq!(status.tier, BadgeTier::NewUser);
        assert_eq!(status.fallback, Some(TierFallback::CountUnavailable));
    }

    #[test]
    fn test_seasonal_badges_passthrough() {
        let mut account = create_test_account("acc1", 0);
        assert!(BadgeService::seasonal_badges(&account).is_none());

        let blob = r#"[{"season":"summer_2025","badge":"gold"}]"#;
        account.seasonal_badges = Some(blob.to_string());

        // Returned verbatim, never parsed
        assert_eq!(BadgeService::seasonal_badges(&account), Some(blob));
    }
}

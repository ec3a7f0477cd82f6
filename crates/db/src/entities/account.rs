//! Account entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "account")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub username: String,

    pub username_lower: String,

    #[sea_orm(unique)]
    pub email: String,

    pub password_hash: String,

    /// Email verification flag.
    #[sea_orm(default_value = false)]
    pub is_verified: bool,

    /// KYC approval flag; gates withdrawals.
    #[sea_orm(default_value = false)]
    pub kyc_verified: bool,

    /// Identity document path (KYC).
    #[sea_orm(nullable)]
    pub document_path: Option<String>,

    /// Selfie path (KYC).
    #[sea_orm(nullable)]
    pub selfie_path: Option<String>,

    /// Lifetime XP balance.
    #[sea_orm(default_value = 0)]
    pub xp_points: i32,

    /// Weekly XP accumulator. Never reset by this layer; an external
    /// scheduled maintenance job owns the week-boundary reset.
    #[sea_orm(default_value = 0)]
    pub weekly_xp: i32,

    /// Monthly XP accumulator. Same external-reset contract as `weekly_xp`.
    #[sea_orm(default_value = 0)]
    pub monthly_xp: i32,

    /// Strikes received in the uploader role.
    #[sea_orm(default_value = 0)]
    pub uploader_strikes: i32,

    /// Strikes received in the reviewer role.
    #[sea_orm(default_value = 0)]
    pub reviewer_strikes: i32,

    /// Set once either strike counter reaches 3; never auto-cleared.
    #[sea_orm(default_value = false)]
    pub is_banned: bool,

    /// Bytes uploaded since the last daily reset.
    #[sea_orm(default_value = 0)]
    pub daily_upload_bytes: i64,

    /// When the daily byte counter was last reset (UTC). NULL = no usage yet.
    #[sea_orm(nullable)]
    pub daily_upload_reset: Option<DateTimeWithTimeZone>,

    /// Review accuracy percentage, maintained by the external analysis
    /// pipeline.
    #[sea_orm(default_value = 0.0)]
    pub accuracy_percentage: f64,

    /// This account's own referral code.
    #[sea_orm(unique, nullable)]
    pub referral_code: Option<String>,

    /// Referral code of the account that referred this one.
    #[sea_orm(nullable)]
    pub referred_by: Option<String>,

    /// Seasonal badge collection, serialized JSON. Opaque to this layer;
    /// re-emitted verbatim.
    #[sea_orm(column_type = "Text", nullable)]
    pub seasonal_badges: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::upload::Entity")]
    Uploads,

    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,

    #[sea_orm(has_many = "super::strike::Entity")]
    Strikes,

    #[sea_orm(has_many = "super::withdrawal_request::Entity")]
    Withdrawals,

    #[sea_orm(has_many = "super::contest_entry::Entity")]
    ContestEntries,
}

impl Related<super::upload::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Uploads.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::strike::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Strikes.def()
    }
}

impl Related<super::withdrawal_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Withdrawals.def()
    }
}

impl Related<super::contest_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContestEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

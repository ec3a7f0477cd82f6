//! Weekly award entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Weekly special award categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum AwardKind {
    #[sea_orm(string_value = "smartest_review")]
    SmartestReview,
    #[sea_orm(string_value = "best_detective")]
    BestDetective,
    #[sea_orm(string_value = "fastest_climber")]
    FastestClimber,
    #[sea_orm(string_value = "reviewer_hero")]
    ReviewerHero,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "weekly_award")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub account_id: String,

    pub kind: AwardKind,

    /// Start of the award week (UTC).
    pub week_start: DateTimeWithTimeZone,

    /// XP bonus granted with the award.
    #[sea_orm(default_value = 100)]
    pub xp_bonus: i32,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::Id",
        on_delete = "Cascade"
    )]
    Account,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Badge entity (special badges and achievements).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// How a badge was earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum BadgeKind {
    #[sea_orm(string_value = "weekly_award")]
    WeeklyAward,
    #[sea_orm(string_value = "seasonal")]
    Seasonal,
    #[sea_orm(string_value = "ranking")]
    Ranking,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "badge")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub account_id: String,

    pub kind: BadgeKind,

    pub badge_name: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    pub earned_at: DateTimeWithTimeZone,

    /// Animated display treatment (fire badges).
    #[sea_orm(default_value = false)]
    pub is_animated: bool,
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

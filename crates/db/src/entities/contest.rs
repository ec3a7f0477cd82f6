//! Contest entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Contest lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[derive(Default)]
pub enum ContestStatus {
    #[sea_orm(string_value = "active")]
    #[default]
    Active,
    #[sea_orm(string_value = "ended")]
    Ended,
}

/// Time-boxed contest with an upload phase and a review phase.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "contest")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    pub start_date: DateTimeWithTimeZone,

    /// End of the upload phase (10 days after start).
    pub upload_phase_end: DateTimeWithTimeZone,

    /// End of the review phase (20 days after start).
    pub review_phase_end: DateTimeWithTimeZone,

    pub status: ContestStatus,

    /// Total prize pool in XP.
    #[sea_orm(default_value = 16000)]
    pub total_prize_pool: i32,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::contest_entry::Entity")]
    Entries,
}

impl Related<super::contest_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

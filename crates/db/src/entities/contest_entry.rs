//! Contest entry entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One account's participation in one contest.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "contest_entry")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub contest_id: String,

    pub account_id: String,

    /// Uploads submitted during the contest.
    #[sea_orm(default_value = 0)]
    pub uploads_count: i32,

    /// Reviews written during the contest.
    #[sea_orm(default_value = 0)]
    pub reviews_count: i32,

    /// XP earned during the contest window.
    #[sea_orm(default_value = 0)]
    pub xp_earned: i32,

    /// Final placement, set when the contest closes. NULL until then.
    #[sea_orm(nullable)]
    pub final_rank: Option<i32>,

    /// Prize amount in XP, set when the contest closes.
    #[sea_orm(default_value = 0)]
    pub prize_amount: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::contest::Entity",
        from = "Column::ContestId",
        to = "super::contest::Column::Id",
        on_delete = "Cascade"
    )]
    Contest,

    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::Id",
        on_delete = "Cascade"
    )]
    Account,
}

impl Related<super::contest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contest.def()
    }
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

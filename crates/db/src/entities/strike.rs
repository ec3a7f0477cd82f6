//! Strike entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Which role a strike was issued against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum StrikeKind {
    #[sea_orm(string_value = "uploader")]
    Uploader,
    #[sea_orm(string_value = "reviewer")]
    Reviewer,
}

/// Strike model - append-only evidence trail behind the ban counters.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "strike")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// The struck account.
    pub account_id: String,
    /// Role the strike was issued against.
    pub kind: StrikeKind,
    /// Reason for the strike.
    pub reason: String,
    /// When the strike was recorded.
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

//! Invite entity (referral tracking).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Invite status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[derive(Default)]
pub enum InviteStatus {
    #[sea_orm(string_value = "pending")]
    #[default]
    Pending,
    #[sea_orm(string_value = "completed")]
    Completed,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "invite")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// The inviting account.
    pub inviter_id: String,

    pub invitee_email: String,

    /// Set when the invitee registers.
    #[sea_orm(nullable)]
    pub invitee_id: Option<String>,

    /// XP awarded to the inviter on completion.
    #[sea_orm(default_value = 0)]
    pub xp_awarded: i32,

    pub status: InviteStatus,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::InviterId",
        to = "super::account::Column::Id",
        on_delete = "Cascade"
    )]
    Inviter,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inviter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

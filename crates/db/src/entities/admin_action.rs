//! Admin action entity (audit trail).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Audit record for administrative actions. Entities in this system are only
/// destroyed or overridden through explicit admin action; this table is the
/// evidence trail for those actions.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "admin_action")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// The admin who acted.
    pub admin_id: String,

    /// Action discriminator (approve_withdrawal, lift_ban, ...).
    pub action_type: String,

    /// ID of the affected account/upload/withdrawal.
    pub target_id: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

//! Withdrawal request entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Withdrawal request status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[derive(Default)]
pub enum WithdrawalStatus {
    #[sea_orm(string_value = "pending")]
    #[default]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// XP-to-cash conversion request.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "withdrawal_request")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Requesting account.
    pub account_id: String,

    /// XP amount being converted.
    pub amount_xp: i32,

    /// USD value at the conversion rate in effect when the request was made.
    pub amount_usd: f64,

    pub status: WithdrawalStatus,

    /// Payout method (paypal, bank transfer, ...).
    #[sea_orm(nullable)]
    pub payment_method: Option<String>,

    /// Method-specific payout details.
    #[sea_orm(column_type = "Text", nullable)]
    pub payment_details: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    /// When an admin approved or rejected the request.
    #[sea_orm(nullable)]
    pub processed_at: Option<DateTimeWithTimeZone>,

    /// Admin audit notes.
    #[sea_orm(column_type = "Text", nullable)]
    pub admin_notes: Option<String>,
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

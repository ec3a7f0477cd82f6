//! Upload entity (submitted media items).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Upload review lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[derive(Default)]
pub enum UploadStatus {
    #[sea_orm(string_value = "pending")]
    #[default]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "upload")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owner account ID.
    pub account_id: String,

    /// Stored file name.
    pub filename: String,

    /// File name as submitted by the uploader.
    pub original_filename: String,

    /// Storage path (managed by the external storage layer).
    pub file_path: String,

    /// File size in bytes.
    pub file_size: i64,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub category: String,

    pub status: UploadStatus,

    /// Uploader consented to AI analysis of the media.
    #[sea_orm(default_value = false)]
    pub ai_consent: bool,

    /// Duplicate-detection score, written by the external analysis pipeline.
    #[sea_orm(default_value = 0.0)]
    pub duplicate_score: f64,

    /// Spam-detection score, written by the external analysis pipeline.
    #[sea_orm(default_value = 0.0)]
    pub spam_score: f64,

    pub uploaded_at: DateTimeWithTimeZone,

    /// End of the free-deletion window. Fixed at creation to
    /// `uploaded_at` + 48 hours, never recomputed.
    pub deletion_deadline: DateTimeWithTimeZone,
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

    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Review entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Binary review rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ReviewRating {
    #[sea_orm(string_value = "good")]
    Good,
    #[sea_orm(string_value = "bad")]
    Bad,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "review")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// The upload being reviewed.
    pub upload_id: String,

    /// The reviewing account.
    pub reviewer_id: String,

    pub rating: ReviewRating,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// XP awarded to the reviewer for this review.
    #[sea_orm(default_value = 10)]
    pub xp_earned: i32,

    /// Flagged as abusive by moderation.
    #[sea_orm(default_value = false)]
    pub is_flagged: bool,

    /// Review quality score in [0, 1], maintained by the external
    /// abuse-detection pipeline.
    #[sea_orm(default_value = 1.0)]
    pub quality_score: f64,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::upload::Entity",
        from = "Column::UploadId",
        to = "super::upload::Column::Id",
        on_delete = "Cascade"
    )]
    Upload,

    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::ReviewerId",
        to = "super::account::Column::Id",
        on_delete = "Cascade"
    )]
    Reviewer,
}

impl Related<super::upload::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Upload.def()
    }
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviewer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

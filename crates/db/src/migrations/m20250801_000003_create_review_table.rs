//! Create review table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Review::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Review::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Review::UploadId).string_len(32).not_null())
                    .col(ColumnDef::new(Review::ReviewerId).string_len(32).not_null())
                    .col(ColumnDef::new(Review::Rating).string_len(16).not_null())
                    .col(ColumnDef::new(Review::Description).text().not_null())
                    .col(
                        ColumnDef::new(Review::XpEarned)
                            .integer()
                            .not_null()
                            .default(10),
                    )
                    .col(
                        ColumnDef::new(Review::IsFlagged)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Review::QualityScore)
                            .double()
                            .not_null()
                            .default(1.0),
                    )
                    .col(
                        ColumnDef::new(Review::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_upload")
                            .from(Review::Table, Review::UploadId)
                            .to(Upload::Table, Upload::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_reviewer")
                            .from(Review::Table, Review::ReviewerId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (upload_id, reviewer_id) - one review per reviewer per upload
        manager
            .create_index(
                Index::create()
                    .name("idx_review_upload_reviewer")
                    .table(Review::Table)
                    .col(Review::UploadId)
                    .col(Review::ReviewerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: reviewer_id (listing an account's reviews)
        manager
            .create_index(
                Index::create()
                    .name("idx_review_reviewer_id")
                    .table(Review::Table)
                    .col(Review::ReviewerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Review::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Review {
    Table,
    Id,
    UploadId,
    ReviewerId,
    Rating,
    Description,
    XpEarned,
    IsFlagged,
    QualityScore,
    CreatedAt,
}

#[derive(Iden)]
enum Upload {
    Table,
    Id,
}

#[derive(Iden)]
enum Account {
    Table,
    Id,
}

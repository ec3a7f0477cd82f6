//! Create upload table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Upload::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Upload::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Upload::AccountId).string_len(32).not_null())
                    .col(ColumnDef::new(Upload::Filename).string_len(256).not_null())
                    .col(
                        ColumnDef::new(Upload::OriginalFilename)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Upload::FilePath).string_len(512).not_null())
                    .col(ColumnDef::new(Upload::FileSize).big_integer().not_null())
                    .col(ColumnDef::new(Upload::Description).text().not_null())
                    .col(ColumnDef::new(Upload::Category).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Upload::Status)
                            .string_len(32)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Upload::AiConsent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Upload::DuplicateScore)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Upload::SpamScore)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Upload::UploadedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Upload::DeletionDeadline)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_upload_account")
                            .from(Upload::Table, Upload::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: account_id (listing an account's uploads)
        manager
            .create_index(
                Index::create()
                    .name("idx_upload_account_id")
                    .table(Upload::Table)
                    .col(Upload::AccountId)
                    .to_owned(),
            )
            .await?;

        // Index: status (review queue scans)
        manager
            .create_index(
                Index::create()
                    .name("idx_upload_status")
                    .table(Upload::Table)
                    .col(Upload::Status)
                    .to_owned(),
            )
            .await?;

        // Index: uploaded_at (pagination)
        manager
            .create_index(
                Index::create()
                    .name("idx_upload_uploaded_at")
                    .table(Upload::Table)
                    .col(Upload::UploadedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Upload::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Upload {
    Table,
    Id,
    AccountId,
    Filename,
    OriginalFilename,
    FilePath,
    FileSize,
    Description,
    Category,
    Status,
    AiConsent,
    DuplicateScore,
    SpamScore,
    UploadedAt,
    DeletionDeadline,
}

#[derive(Iden)]
enum Account {
    Table,
    Id,
}

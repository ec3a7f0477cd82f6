//! Create contest and contest entry tables migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contest::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contest::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contest::Name).string_len(256).not_null())
                    .col(
                        ColumnDef::new(Contest::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Contest::UploadPhaseEnd)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Contest::ReviewPhaseEnd)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Contest::Status)
                            .string_len(32)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Contest::TotalPrizePool)
                            .integer()
                            .not_null()
                            .default(16000),
                    )
                    .col(
                        ColumnDef::new(Contest::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContestEntry::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContestEntry::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ContestEntry::ContestId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContestEntry::AccountId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContestEntry::UploadsCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ContestEntry::ReviewsCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ContestEntry::XpEarned)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(ContestEntry::FinalRank).integer())
                    .col(
                        ColumnDef::new(ContestEntry::PrizeAmount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contest_entry_contest")
                            .from(ContestEntry::Table, ContestEntry::ContestId)
                            .to(Contest::Table, Contest::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contest_entry_account")
                            .from(ContestEntry::Table, ContestEntry::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (contest_id, account_id) - one entry per account per contest
        manager
            .create_index(
                Index::create()
                    .name("idx_contest_entry_contest_account")
                    .table(ContestEntry::Table)
                    .col(ContestEntry::ContestId)
                    .col(ContestEntry::AccountId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: (contest_id, xp_earned) - leaderboard reads
        manager
            .create_index(
                Index::create()
                    .name("idx_contest_entry_contest_xp")
                    .table(ContestEntry::Table)
                    .col(ContestEntry::ContestId)
                    .col(ContestEntry::XpEarned)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContestEntry::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Contest::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Contest {
    Table,
    Id,
    Name,
    StartDate,
    UploadPhaseEnd,
    ReviewPhaseEnd,
    Status,
    TotalPrizePool,
    CreatedAt,
}

#[derive(Iden)]
enum ContestEntry {
    Table,
    Id,
    ContestId,
    AccountId,
    UploadsCount,
    ReviewsCount,
    XpEarned,
    FinalRank,
    PrizeAmount,
}

#[derive(Iden)]
enum Account {
    Table,
    Id,
}

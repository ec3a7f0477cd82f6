//! Create badge and weekly award tables migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Badge::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Badge::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Badge::AccountId).string_len(32).not_null())
                    .col(ColumnDef::new(Badge::Kind).string_len(32).not_null())
                    .col(ColumnDef::new(Badge::BadgeName).string_len(128).not_null())
                    .col(ColumnDef::new(Badge::Description).text())
                    .col(
                        ColumnDef::new(Badge::EarnedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Badge::IsAnimated)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_badge_account")
                            .from(Badge::Table, Badge::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: account_id (badge collection display)
        manager
            .create_index(
                Index::create()
                    .name("idx_badge_account_id")
                    .table(Badge::Table)
                    .col(Badge::AccountId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WeeklyAward::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WeeklyAward::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WeeklyAward::AccountId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(WeeklyAward::Kind).string_len(32).not_null())
                    .col(
                        ColumnDef::new(WeeklyAward::WeekStart)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WeeklyAward::XpBonus)
                            .integer()
                            .not_null()
                            .default(100),
                    )
                    .col(
                        ColumnDef::new(WeeklyAward::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_weekly_award_account")
                            .from(WeeklyAward::Table, WeeklyAward::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (account_id, kind, week_start) - one award of a kind per week
        manager
            .create_index(
                Index::create()
                    .name("idx_weekly_award_account_kind_week")
                    .table(WeeklyAward::Table)
                    .col(WeeklyAward::AccountId)
                    .col(WeeklyAward::Kind)
                    .col(WeeklyAward::WeekStart)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WeeklyAward::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Badge::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Badge {
    Table,
    Id,
    AccountId,
    Kind,
    BadgeName,
    Description,
    EarnedAt,
    IsAnimated,
}

#[derive(Iden)]
enum WeeklyAward {
    Table,
    Id,
    AccountId,
    Kind,
    WeekStart,
    XpBonus,
    CreatedAt,
}

#[derive(Iden)]
enum Account {
    Table,
    Id,
}

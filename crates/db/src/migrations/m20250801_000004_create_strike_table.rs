//! Create strike table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Strike::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Strike::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Strike::AccountId).string_len(32).not_null())
                    .col(ColumnDef::new(Strike::Kind).string_len(16).not_null())
                    .col(ColumnDef::new(Strike::Reason).string_len(512).not_null())
                    .col(
                        ColumnDef::new(Strike::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_strike_account")
                            .from(Strike::Table, Strike::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: account_id (listing an account's strike history)
        manager
            .create_index(
                Index::create()
                    .name("idx_strike_account_id")
                    .table(Strike::Table)
                    .col(Strike::AccountId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Strike::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Strike {
    Table,
    Id,
    AccountId,
    Kind,
    Reason,
    CreatedAt,
}

#[derive(Iden)]
enum Account {
    Table,
    Id,
}

//! Create withdrawal request table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WithdrawalRequest::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WithdrawalRequest::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WithdrawalRequest::AccountId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WithdrawalRequest::AmountXp)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WithdrawalRequest::AmountUsd)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WithdrawalRequest::Status)
                            .string_len(32)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(WithdrawalRequest::PaymentMethod).string_len(128))
                    .col(ColumnDef::new(WithdrawalRequest::PaymentDetails).text())
                    .col(
                        ColumnDef::new(WithdrawalRequest::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(WithdrawalRequest::ProcessedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(WithdrawalRequest::AdminNotes).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_withdrawal_request_account")
                            .from(WithdrawalRequest::Table, WithdrawalRequest::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: account_id (listing an account's withdrawals)
        manager
            .create_index(
                Index::create()
                    .name("idx_withdrawal_request_account_id")
                    .table(WithdrawalRequest::Table)
                    .col(WithdrawalRequest::AccountId)
                    .to_owned(),
            )
            .await?;

        // Index: status (admin pending queue)
        manager
            .create_index(
                Index::create()
                    .name("idx_withdrawal_request_status")
                    .table(WithdrawalRequest::Table)
                    .col(WithdrawalRequest::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WithdrawalRequest::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum WithdrawalRequest {
    Table,
    Id,
    AccountId,
    AmountXp,
    AmountUsd,
    Status,
    PaymentMethod,
    PaymentDetails,
    CreatedAt,
    ProcessedAt,
    AdminNotes,
}

#[derive(Iden)]
enum Account {
    Table,
    Id,
}

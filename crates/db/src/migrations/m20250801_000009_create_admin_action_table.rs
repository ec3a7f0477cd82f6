//! Create admin action table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminAction::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdminAction::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AdminAction::AdminId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdminAction::ActionType)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdminAction::TargetId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(AdminAction::Description).text().not_null())
                    .col(
                        ColumnDef::new(AdminAction::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_admin_action_admin")
                            .from(AdminAction::Table, AdminAction::AdminId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: target_id (audit lookups per affected entity)
        manager
            .create_index(
                Index::create()
                    .name("idx_admin_action_target_id")
                    .table(AdminAction::Table)
                    .col(AdminAction::TargetId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminAction::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AdminAction {
    Table,
    Id,
    AdminId,
    ActionType,
    TargetId,
    Description,
    CreatedAt,
}

#[derive(Iden)]
enum Account {
    Table,
    Id,
}

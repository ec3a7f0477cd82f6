//! Create invite table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Invite::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Invite::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Invite::InviterId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Invite::InviteeEmail)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Invite::InviteeId).string_len(32))
                    .col(
                        ColumnDef::new(Invite::XpAwarded)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Invite::Status)
                            .string_len(32)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Invite::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invite_inviter")
                            .from(Invite::Table, Invite::InviterId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: inviter_id (listing an account's invites)
        manager
            .create_index(
                Index::create()
                    .name("idx_invite_inviter_id")
                    .table(Invite::Table)
                    .col(Invite::InviterId)
                    .to_owned(),
            )
            .await?;

        // Index: invitee_email (completion lookup on registration)
        manager
            .create_index(
                Index::create()
                    .name("idx_invite_invitee_email")
                    .table(Invite::Table)
                    .col(Invite::InviteeEmail)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Invite::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Invite {
    Table,
    Id,
    InviterId,
    InviteeEmail,
    InviteeId,
    XpAwarded,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum Account {
    Table,
    Id,
}

//! Create account table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Account::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Account::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Account::Username).string_len(128).not_null())
                    .col(
                        ColumnDef::new(Account::UsernameLower)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Account::Email).string_len(256).not_null())
                    .col(
                        ColumnDef::new(Account::PasswordHash)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Account::IsVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Account::KycVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Account::DocumentPath).string_len(512))
                    .col(ColumnDef::new(Account::SelfiePath).string_len(512))
                    .col(
                        ColumnDef::new(Account::XpPoints)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Account::WeeklyXp)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Account::MonthlyXp)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Account::UploaderStrikes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Account::ReviewerStrikes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Account::IsBanned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Account::DailyUploadBytes)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Account::DailyUploadReset).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Account::AccuracyPercentage)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Account::ReferralCode).string_len(20))
                    .col(ColumnDef::new(Account::ReferredBy).string_len(20))
                    .col(ColumnDef::new(Account::SeasonalBadges).text())
                    .col(
                        ColumnDef::new(Account::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Account::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Unique index: username
        manager
            .create_index(
                Index::create()
                    .name("idx_account_username")
                    .table(Account::Table)
                    .col(Account::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Unique index: username_lower (case-insensitive lookup)
        manager
            .create_index(
                Index::create()
                    .name("idx_account_username_lower")
                    .table(Account::Table)
                    .col(Account::UsernameLower)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Unique index: email
        manager
            .create_index(
                Index::create()
                    .name("idx_account_email")
                    .table(Account::Table)
                    .col(Account::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Unique index: referral_code
        manager
            .create_index(
                Index::create()
                    .name("idx_account_referral_code")
                    .table(Account::Table)
                    .col(Account::ReferralCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: xp_points (percentile ranking scans)
        manager
            .create_index(
                Index::create()
                    .name("idx_account_xp_points")
                    .table(Account::Table)
                    .col(Account::XpPoints)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Account::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Account {
    Table,
    Id,
    Username,
    UsernameLower,
    Email,
    PasswordHash,
    IsVerified,
    KycVerified,
    DocumentPath,
    SelfiePath,
    XpPoints,
    WeeklyXp,
    MonthlyXp,
    UploaderStrikes,
    ReviewerStrikes,
    IsBanned,
    DailyUploadBytes,
    DailyUploadReset,
    AccuracyPercentage,
    ReferralCode,
    ReferredBy,
    SeasonalBadges,
    CreatedAt,
    UpdatedAt,
}

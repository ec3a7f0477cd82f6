//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250801_000001_create_account_table;
mod m20250801_000002_create_upload_table;
mod m20250801_000003_create_review_table;
mod m20250801_000004_create_strike_table;
mod m20250801_000005_create_withdrawal_request_table;
mod m20250801_000006_create_contest_tables;
mod m20250801_000007_create_badge_tables;
mod m20250801_000008_create_invite_table;
mod m20250801_000009_create_admin_action_table;

/// Migration runner.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250801_000001_create_account_table::Migration),
            Box::new(m20250801_000002_create_upload_table::Migration),
            Box::new(m20250801_000003_create_review_table::Migration),
            Box::new(m20250801_000004_create_strike_table::Migration),
            Box::new(m20250801_000005_create_withdrawal_request_table::Migration),
            Box::new(m20250801_000006_create_contest_tables::Migration),
            Box::new(m20250801_000007_create_badge_tables::Migration),
            Box::new(m20250801_000008_create_invite_table::Migration),
            Box::new(m20250801_000009_create_admin_action_table::Migration),
        ]
    }
}

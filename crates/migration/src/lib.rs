//! # Vitalog Database Migrations
//!
//! Schema migrations for the Vitalog PostgreSQL database and the start-up
//! seed that guarantees an administrator account.

pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_users_table;
mod m20261001_000002_create_water_tables;
mod m20261001_000003_create_tasks_table;
mod m20261001_000004_create_logs_table;
mod m20261001_000005_add_updated_at_triggers;
pub mod migrator;
pub mod seeds;

pub use migrator::Migrator;
pub use seeds::{AdminSeedConfig, AdminSeedGuard, SeaAccountStore, SeedError, SeedOutcome};

/// Database connection helper for CLI usage
pub async fn connect_to_database(database_url: &str) -> Result<sea_orm::DatabaseConnection, sea_orm::DbErr> {
    sea_orm::Database::connect(database_url).await
}

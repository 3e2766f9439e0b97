//! # CLI Migration Command
//!
//! Database migration handling for the Vitalog CLI.

use error::{Result, ResultExt as _};
use migration::{Migrator, MigratorTrait as _};
use tracing::info;

use crate::{commands::MigrateArgs, config::DatabaseConfig};

/// Runs database migrations
///
/// # Arguments
///
/// * `config` - Database configuration
/// * `args` - Migrate command arguments
///
/// # Returns
///
/// A `Result` indicating success or failure.
pub async fn migrate(config: &DatabaseConfig, args: MigrateArgs) -> Result<()> {
    info!(
        target: "migrate",
        dry_run = %args.dry_run,
        rollback = %args.rollback,
        "Running database migrations..."
    );

    let database_url = crate::config::build_database_url(config);
    let db = migration::connect_to_database(&database_url)
        .await
        .context("Failed to connect to database")?;

    if args.dry_run {
        let pending = Migrator::get_pending_migrations(&db)
            .await
            .context("Failed to get pending migrations")?;

        info!(
            target: "migrate",
            pending_count = %pending.len(),
            "Dry run, nothing applied"
        );

        for m in &pending {
            info!(target: "migrate", migration = %m.name(), "Would apply");
        }

        return Ok(());
    }

    if args.rollback {
        info!(target: "migrate", "Rolling back the last migration...");

        Migrator::down(&db, Some(1))
            .await
            .context("Failed to rollback migration")?;

        info!(target: "migrate", "Rollback completed successfully");
        return Ok(());
    }

    Migrator::up(&db, None)
        .await
        .context("Failed to run migrations")?;

    info!(target: "migrate", "Migrations completed successfully");
    Ok(())
}

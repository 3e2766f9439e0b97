//! # CLI Seed Command
//!
//! Runs the administrator seed once against the configured database.

use std::sync::Arc;

use error::{Result, ResultExt as _};
use migration::{AdminSeedConfig, AdminSeedGuard, SeaAccountStore, SeedOutcome};
use tracing::{info, warn};

use crate::config::DatabaseConfig;

/// Human-readable summary of a seed run.
pub fn describe(outcome: SeedOutcome) -> &'static str {
    match outcome {
        SeedOutcome::Created => "Administrator account created",
        SeedOutcome::AlreadyExists | SeedOutcome::AlreadySeeded => "Administrator account already exists",
        SeedOutcome::CreatedConcurrently => "Administrator account was created by another process",
        SeedOutcome::SkippedMissingConfig => {
            "Administrator credentials are not configured; set VITALOG_ADMIN_USERNAME and VITALOG_ADMIN_PASSWORD"
        },
    }
}

/// Ensures the administrator account exists.
///
/// # Errors
///
/// Fails when the database is unreachable or the seed itself fails.
pub async fn seed(config: &DatabaseConfig) -> Result<()> {
    let database_url = crate::config::build_database_url(config);
    let db = migration::connect_to_database(&database_url)
        .await
        .context("Failed to connect to database")?;

    let guard = AdminSeedGuard::new(SeaAccountStore::new(Arc::new(db)), AdminSeedConfig::from_env());
    let outcome = guard.ensure_seeded().await?;

    if outcome == SeedOutcome::SkippedMissingConfig {
        warn!(target: "seed", ?outcome, "{}", describe(outcome));
    }
    else {
        info!(target: "seed", ?outcome, "{}", describe(outcome));
    }
    Ok(())
}

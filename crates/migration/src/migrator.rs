//! # Database Migrator
//!
//! Ordered list of schema migrations applied by `vitalog migrate` and at server start-up.

use sea_orm_migration::prelude::*;

use crate::{
    m20261001_000001_create_users_table,
    m20261001_000002_create_water_tables,
    m20261001_000003_create_tasks_table,
    m20261001_000004_create_logs_table,
    m20261001_000005_add_updated_at_triggers,
};

/// The main migrator that coordinates all migration operations
///
/// # Example
///
/// ```rust,ignore
/// use migration::{Migrator, MigratorTrait};
///
/// Migrator::up(&db, None).await?;
/// ```
#[derive(Debug)]
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    /// Migrations run in the order listed; the users table must come first.
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_users_table::Migration),
            Box::new(m20261001_000002_create_water_tables::Migration),
            Box::new(m20261001_000003_create_tasks_table::Migration),
            Box::new(m20261001_000004_create_logs_table::Migration),
            Box::new(m20261001_000005_add_updated_at_triggers::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_order() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();

        assert_eq!(names.len(), 5);
        assert_eq!(names[0], "m20261001_000001_create_users_table");
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted, "migrations must be listed in name order");
    }
}

//! Migration: keep `updated_at` current on every row update.
//!
//! Tables affected: users, water_settings, tasks.

use sea_orm_migration::prelude::*;

const TABLES: [&str; 3] = ["users", "water_settings", "tasks"];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            r#"
            CREATE OR REPLACE FUNCTION update_updated_at_column()
            RETURNS TRIGGER AS $$
            BEGIN
                NEW.updated_at = CURRENT_TIMESTAMP;
                RETURN NEW;
            END;
            $$ language 'plpgsql';
            "#,
        )
        .await?;

        for table in TABLES {
            let trigger_name = format!("update_{}_updated_at", table);
            let sql = format!(
                "DROP TRIGGER IF EXISTS {trigger_name} ON {table}; CREATE TRIGGER {trigger_name} BEFORE UPDATE ON \
                 {table} FOR EACH ROW EXECUTE FUNCTION update_updated_at_column()"
            );
            db.execute_unprepared(&sql).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for table in TABLES {
            let sql = format!("DROP TRIGGER IF EXISTS update_{table}_updated_at ON {table}");
            db.execute_unprepared(&sql).await?;
        }

        db.execute_unprepared("DROP FUNCTION IF EXISTS update_updated_at_column()")
            .await?;

        Ok(())
    }
}

use sea_orm_migration::{prelude::*, schema::*};

use crate::m20261001_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WaterSettings::Table)
                    .if_not_exists()
                    .col(uuid(WaterSettings::Id).primary_key())
                    .col(uuid(WaterSettings::UserId).unique_key())
                    .col(integer(WaterSettings::CupSizeCc).check(Expr::col(WaterSettings::CupSizeCc).gt(0)))
                    .col(integer(WaterSettings::DailyTargetCc).check(Expr::col(WaterSettings::DailyTargetCc).gt(0)))
                    .col(integer(WaterSettings::DefaultDrinkCc).check(Expr::col(WaterSettings::DefaultDrinkCc).gt(0)))
                    .col(text(WaterSettings::Note).default(""))
                    .col(
                        ColumnDef::new(WaterSettings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(WaterSettings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_water_settings_user_id")
                            .from(WaterSettings::Table, WaterSettings::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WaterEntries::Table)
                    .if_not_exists()
                    .col(uuid(WaterEntries::Id).primary_key())
                    .col(uuid(WaterEntries::UserId))
                    .col(string_len(WaterEntries::Date, 10))
                    .col(integer(WaterEntries::AmountCc).check(Expr::col(WaterEntries::AmountCc).gte(0)))
                    .col(string_len(WaterEntries::Time, 5))
                    .col(text(WaterEntries::Note).default(""))
                    .col(
                        ColumnDef::new(WaterEntries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_water_entries_user_id")
                            .from(WaterEntries::Table, WaterEntries::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_water_entries_user_date")
                    .table(WaterEntries::Table)
                    .col(WaterEntries::UserId)
                    .col(WaterEntries::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WaterEntries::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(WaterSettings::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum WaterSettings {
    Table,
    Id,
    UserId,
    CupSizeCc,
    DailyTargetCc,
    DefaultDrinkCc,
    Note,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum WaterEntries {
    Table,
    Id,
    UserId,
    Date,
    AmountCc,
    Time,
    Note,
    CreatedAt,
}

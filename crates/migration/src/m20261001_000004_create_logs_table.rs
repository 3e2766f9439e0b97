use sea_orm_migration::{prelude::*, schema::*, sea_query::extension::postgres::Type};

use crate::m20261001_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(LogType::Table)
                    .values([LogType::Food, LogType::Sport, LogType::Weight, LogType::Mood])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Logs::Table)
                    .if_not_exists()
                    .col(uuid(Logs::Id).primary_key())
                    .col(uuid(Logs::UserId))
                    .col(enumeration(
                        Logs::LogType,
                        LogType::Table,
                        [LogType::Food, LogType::Sport, LogType::Weight, LogType::Mood],
                    ))
                    .col(string_len(Logs::Date, 10))
                    .col(string_len(Logs::Time, 5))
                    .col(json_binary(Logs::Data))
                    .col(
                        ColumnDef::new(Logs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_logs_user_id")
                            .from(Logs::Table, Logs::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Date browsing and trend range scans
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_logs_user_date")
                    .table(Logs::Table)
                    .col(Logs::UserId)
                    .col(Logs::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_logs_user_type_date")
                    .table(Logs::Table)
                    .col(Logs::UserId)
                    .col(Logs::LogType)
                    .col(Logs::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Logs::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(LogType::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Logs {
    Table,
    Id,
    UserId,
    LogType,
    Date,
    Time,
    Data,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum LogType {
    #[sea_orm(iden = "log_type")]
    Table,
    #[sea_orm(iden = "food")]
    Food,
    #[sea_orm(iden = "sport")]
    Sport,
    #[sea_orm(iden = "weight")]
    Weight,
    #[sea_orm(iden = "mood")]
    Mood,
}

use sea_orm_migration::{prelude::*, schema::*, sea_query::extension::postgres::Type};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(UserRole::Table)
                    .values([UserRole::Admin, UserRole::Member, UserRole::Coach])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(UserStatus::Table)
                    .values([UserStatus::Active, UserStatus::Suspended])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(uuid(Users::Id).primary_key())
                    .col(string(Users::Username).unique_key())
                    .col(text(Users::PasswordHash).default(""))
                    .col(string(Users::Name))
                    .col(text(Users::Avatar).default(""))
                    .col(
                        enumeration(
                            Users::Role,
                            UserRole::Table,
                            [UserRole::Admin, UserRole::Member, UserRole::Coach],
                        )
                        .default("member"),
                    )
                    .col(
                        enumeration(
                            Users::Status,
                            UserStatus::Table,
                            [UserStatus::Active, UserStatus::Suspended],
                        )
                        .default("active"),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Member listing is newest first
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_created_at")
                    .table(Users::Table)
                    .col(Users::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(UserStatus::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(UserRole::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Users {
    Table,
    Id,
    Username,
    PasswordHash,
    Name,
    Avatar,
    Role,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum UserRole {
    #[sea_orm(iden = "user_role")]
    Table,
    #[sea_orm(iden = "admin")]
    Admin,
    #[sea_orm(iden = "member")]
    Member,
    #[sea_orm(iden = "coach")]
    Coach,
}

#[derive(DeriveIden)]
pub enum UserStatus {
    #[sea_orm(iden = "user_status")]
    Table,
    #[sea_orm(iden = "active")]
    Active,
    #[sea_orm(iden = "suspended")]
    Suspended,
}

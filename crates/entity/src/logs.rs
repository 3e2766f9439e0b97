//! Logs Entity
//!
//! Food, sport, weight and mood entries. The `data` column holds the
//! type-specific payload as JSON.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub use super::sea_orm_active_enums::LogType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Uuid")]
    pub id:         Uuid,
    pub user_id:    Uuid,
    pub log_type:   LogType,
    pub date:       String,
    pub time:       String,
    #[sea_orm(column_type = "JsonBinary")]
    pub data:       Json,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl ActiveModelBehavior for ActiveModel {}

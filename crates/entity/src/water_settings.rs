//! Water Settings Entity
//!
//! Per-user hydration preferences. One row per user.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cup size used when a user has no settings row yet.
pub const DEFAULT_CUP_SIZE_CC: i32 = 300;
/// Daily target used when a user has no settings row yet.
pub const DEFAULT_DAILY_TARGET_CC: i32 = 1800;
/// Quick-add amount used when a user has no settings row yet.
pub const DEFAULT_DRINK_CC: i32 = 250;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "water_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Uuid")]
    pub id:               Uuid,
    #[sea_orm(unique)]
    pub user_id:          Uuid,
    pub cup_size_cc:      i32,
    pub daily_target_cc:  i32,
    pub default_drink_cc: i32,
    pub note:             String,
    pub created_at:       DateTimeUtc,
    pub updated_at:       DateTimeUtc,
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

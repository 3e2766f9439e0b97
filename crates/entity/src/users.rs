//! Users Entity
//!
//! Accounts with credentials, profile fields, role and status.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub use super::sea_orm_active_enums::{UserRole, UserStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Uuid")]
    pub id:            Uuid,
    #[sea_orm(unique)]
    pub username:      String,
    /// Empty for accounts created without a password; such accounts cannot sign in.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name:          String,
    pub avatar:        String,
    pub role:          UserRole,
    pub status:        UserStatus,
    pub created_at:    DateTimeUtc,
    pub updated_at:    DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::water_settings::Entity")]
    WaterSettings,
    #[sea_orm(has_many = "super::water_entries::Entity")]
    WaterEntries,
    #[sea_orm(has_many = "super::tasks::Entity")]
    Tasks,
    #[sea_orm(has_many = "super::logs::Entity")]
    Logs,
}

impl Related<super::water_settings::Entity> for Entity {
    fn to() -> RelationDef { Relation::WaterSettings.def() }
}

impl Related<super::water_entries::Entity> for Entity {
    fn to() -> RelationDef { Relation::WaterEntries.def() }
}

impl Related<super::tasks::Entity> for Entity {
    fn to() -> RelationDef { Relation::Tasks.def() }
}

impl Related<super::logs::Entity> for Entity {
    fn to() -> RelationDef { Relation::Logs.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether the account may sign in.
    pub fn is_active(&self) -> bool { self.status == UserStatus::Active }

    pub fn is_admin(&self) -> bool { self.role == UserRole::Admin }
}

/// Default avatar for a username.
pub fn default_avatar(username: &str) -> String {
    format!("https://api.dicebear.com/7.x/avataaars/svg?seed={}", username)
}

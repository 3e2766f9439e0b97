//! PostgreSQL enum types shared by the entities.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account role enumeration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Manages member accounts
    #[sea_orm(string_value = "admin")]
    Admin,
    /// Regular tracked user
    #[sea_orm(string_value = "member")]
    Member,
    #[sea_orm(string_value = "coach")]
    Coach,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Member => "member",
            UserRole::Coach => "coach",
        }
    }

    /// Parses the lowercase wire value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(UserRole::Admin),
            "member" => Some(UserRole::Member),
            "coach" => Some(UserRole::Coach),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

/// User account status enumeration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_status")]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Account can sign in
    #[sea_orm(string_value = "active")]
    Active,
    /// Account is suspended by an administrator
    #[sea_orm(string_value = "suspended")]
    Suspended,
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Suspended => write!(f, "suspended"),
        }
    }
}

/// Kind of a health log entry; selects the shape of its `data` payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "log_type")]
#[serde(rename_all = "lowercase")]
pub enum LogType {
    #[sea_orm(string_value = "food")]
    Food,
    #[sea_orm(string_value = "sport")]
    Sport,
    #[sea_orm(string_value = "weight")]
    Weight,
    #[sea_orm(string_value = "mood")]
    Mood,
}

impl std::fmt::Display for LogType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogType::Food => write!(f, "food"),
            LogType::Sport => write!(f, "sport"),
            LogType::Weight => write!(f, "weight"),
            LogType::Mood => write!(f, "mood"),
        }
    }
}

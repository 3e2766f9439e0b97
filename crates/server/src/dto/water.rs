//! # Water Data Transfer Objects

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::calendar::{validate_clock_time, validate_date_key};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterSettingsResponse {
    pub id:               String,
    pub user_id:          String,
    pub cup_size_cc:      i32,
    pub daily_target_cc:  i32,
    pub default_drink_cc: i32,
    pub note:             String,
    pub created_at:       String,
    pub updated_at:       String,
}

impl From<entity::water_settings::Model> for WaterSettingsResponse {
    fn from(settings: entity::water_settings::Model) -> Self {
        Self {
            id:               settings.id.to_string(),
            user_id:          settings.user_id.to_string(),
            cup_size_cc:      settings.cup_size_cc,
            daily_target_cc:  settings.daily_target_cc,
            default_drink_cc: settings.default_drink_cc,
            note:             settings.note,
            created_at:       settings.created_at.to_rfc3339(),
            updated_at:       settings.updated_at.to_rfc3339(),
        }
    }
}

/// Replaces the caller's hydration settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWaterSettingsRequest {
    #[validate(range(min = 1, max = 5000, message = "Cup size must be between 1 and 5000 cc"))]
    pub cup_size_cc:      i32,
    #[validate(range(min = 1, max = 20000, message = "Daily target must be between 1 and 20000 cc"))]
    pub daily_target_cc:  i32,
    #[validate(range(min = 1, max = 5000, message = "Default drink must be between 1 and 5000 cc"))]
    pub default_drink_cc: i32,
    #[validate(length(max = 1000, message = "Note must not exceed 1000 characters"))]
    pub note:             Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterEntryResponse {
    pub id:         String,
    pub user_id:    String,
    pub date:       String,
    pub amount_cc:  i32,
    pub time:       String,
    pub note:       String,
    pub created_at: String,
}

impl From<entity::water_entries::Model> for WaterEntryResponse {
    fn from(entry: entity::water_entries::Model) -> Self {
        Self {
            id:         entry.id.to_string(),
            user_id:    entry.user_id.to_string(),
            date:       entry.date,
            amount_cc:  entry.amount_cc,
            time:       entry.time,
            note:       entry.note,
            created_at: entry.created_at.to_rfc3339(),
        }
    }
}

/// Records one drink
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWaterEntryRequest {
    #[validate(range(min = 0, max = 10000, message = "Amount must be between 0 and 10000 cc"))]
    pub amount_cc: i32,
    #[validate(custom(function = "validate_clock_time"))]
    pub time:      String,
    #[validate(length(max = 1000, message = "Note must not exceed 1000 characters"))]
    pub note:      Option<String>,
    /// Defaults to today
    #[validate(custom(function = "validate_date_key"))]
    pub date:      Option<String>,
}

/// `?date=` filter; absent means today
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

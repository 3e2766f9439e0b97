//! # Log Data Transfer Objects
//!
//! Log entries share a date and time; the `data` object depends on `type`.

use entity::sea_orm_active_enums::LogType;
use error::{AppError, Result};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use validator::Validate;

use crate::calendar::{validate_clock_time, validate_date_key};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogResponse {
    pub id:         String,
    pub user_id:    String,
    #[serde(rename = "type")]
    pub log_type:   LogType,
    pub date:       String,
    pub time:       String,
    pub data:       serde_json::Value,
    pub created_at: String,
}

impl From<entity::logs::Model> for LogResponse {
    fn from(log: entity::logs::Model) -> Self {
        Self {
            id:         log.id.to_string(),
            user_id:    log.user_id.to_string(),
            log_type:   log.log_type,
            date:       log.date,
            time:       log.time,
            data:       log.data,
            created_at: log.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct CreateLogRequest {
    #[serde(rename = "type")]
    pub log_type: LogType,
    /// Defaults to today
    #[validate(custom(function = "validate_date_key"))]
    pub date:     Option<String>,
    #[validate(custom(function = "validate_clock_time"))]
    pub time:     String,
    pub data:     serde_json::Value,
}

/// Meal record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct FoodData {
    #[validate(length(min = 1, max = 64, message = "Meal is required"))]
    pub meal:  String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 2048, message = "Image must not exceed 2048 characters"))]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1000, message = "Notes must not exceed 1000 characters"))]
    pub notes: Option<String>,
}

/// Exercise record; duration in minutes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SportData {
    #[validate(length(min = 1, max = 64, message = "Sport type is required"))]
    pub sport_type: String,
    #[validate(range(min = 0.0, max = 1440.0, message = "Duration must be between 0 and 1440 minutes"))]
    pub duration:   f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Calories must not be negative"))]
    pub calories:   Option<f64>,
}

/// Body weight in kilograms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct WeightData {
    #[validate(range(exclusive_min = 0.0, max = 1000.0, message = "Weight must be between 0 and 1000 kg"))]
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct MoodData {
    #[validate(length(min = 1, max = 32, message = "Emoji is required"))]
    pub emoji: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1000, message = "Notes must not exceed 1000 characters"))]
    pub notes: Option<String>,
}

/// Typed log payload.
#[derive(Debug, Clone, PartialEq)]
pub enum LogPayload {
    Food(FoodData),
    Sport(SportData),
    Weight(WeightData),
    Mood(MoodData),
}

impl LogPayload {
    /// Parses and validates `data` as the payload of `log_type`.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the shape or values do not fit the type.
    pub fn parse(log_type: LogType, data: serde_json::Value) -> Result<Self> {
        Ok(match log_type {
            LogType::Food => LogPayload::Food(typed(log_type, data)?),
            LogType::Sport => LogPayload::Sport(typed(log_type, data)?),
            LogType::Weight => LogPayload::Weight(typed(log_type, data)?),
            LogType::Mood => LogPayload::Mood(typed(log_type, data)?),
        })
    }

    /// Normalised JSON for storage.
    ///
    /// # Errors
    ///
    /// Returns an internal error if serialization fails.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        let value = match self {
            LogPayload::Food(data) => serde_json::to_value(data),
            LogPayload::Sport(data) => serde_json::to_value(data),
            LogPayload::Weight(data) => serde_json::to_value(data),
            LogPayload::Mood(data) => serde_json::to_value(data),
        };
        value.map_err(|e| AppError::internal(format!("Failed to encode log data: {}", e)))
    }
}

fn typed<T: DeserializeOwned + Validate>(log_type: LogType, data: serde_json::Value) -> Result<T> {
    let payload: T = serde_json::from_value(data)
        .map_err(|e| AppError::validation(format!("data: invalid {} payload: {}", log_type, e)))?;
    payload.validate()?;
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_sport_payload() {
        let payload = LogPayload::parse(
            LogType::Sport,
            json!({"sportType": "跑步", "duration": 30, "calories": 250}),
        )
        .unwrap();
        assert_eq!(
            payload,
            LogPayload::Sport(SportData {
                sport_type: "跑步".to_string(),
                duration:   30.0,
                calories:   Some(250.0),
            })
        );
        assert_eq!(payload.to_json().unwrap()["sportType"], "跑步");
    }

    #[test]
    fn test_payload_must_match_type() {
        let err = LogPayload::parse(LogType::Weight, json!({"meal": "早餐"})).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");

        let err = LogPayload::parse(LogType::Weight, json!({"weight": -3})).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let payload = LogPayload::parse(LogType::Mood, json!({"emoji": "😊"})).unwrap();
        assert_eq!(payload.to_json().unwrap(), json!({"emoji": "😊"}));
    }

    #[test]
    fn test_create_request_uses_type_key() {
        let req: CreateLogRequest = serde_json::from_value(json!({
            "type": "food",
            "time": "08:30",
            "data": {"meal": "早餐"}
        }))
        .unwrap();
        assert_eq!(req.log_type, LogType::Food);
        assert!(req.validate().is_ok());
        assert!(req.date.is_none());
    }
}

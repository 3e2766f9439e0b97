//! # Calendar Helpers
//!
//! Dates travel and are stored as `YYYY-MM-DD` strings and clock times as
//! `HH:mm`, so string order equals chronological order.

use chrono::{NaiveDate, NaiveTime};
use validator::ValidationError;

/// Storage format of calendar dates.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Storage format of clock times.
pub const TIME_FORMAT: &str = "%H:%M";

/// Formats a date as its storage key.
pub fn date_key(date: NaiveDate) -> String { date.format(DATE_KEY_FORMAT).to_string() }

/// Parses a strict `YYYY-MM-DD` key.
pub fn parse_date_key(value: &str) -> Option<NaiveDate> {
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_KEY_FORMAT).ok()
}

/// Validator for optional date fields.
pub fn validate_date_key(value: &str) -> Result<(), ValidationError> {
    match parse_date_key(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("date").with_message("Date must be formatted as YYYY-MM-DD".into())),
    }
}

/// Validator for `HH:mm` clock times.
pub fn validate_clock_time(value: &str) -> Result<(), ValidationError> {
    if value.len() == 5 && NaiveTime::parse_from_str(value, TIME_FORMAT).is_ok() {
        Ok(())
    }
    else {
        Err(ValidationError::new("time").with_message("Time must be formatted as HH:mm".into()))
    }
}

/// Resolves an optional date parameter, defaulting to `today`.
///
/// # Errors
///
/// Returns a validation error when the value is not a `YYYY-MM-DD` date.
pub fn resolve_date_param(value: Option<&str>, today: NaiveDate) -> error::Result<String> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(date_key(today)),
        Some(raw) => {
            parse_date_key(raw)
                .map(date_key)
                .ok_or_else(|| error::AppError::validation("date: Date must be formatted as YYYY-MM-DD"))
        },
    }
}

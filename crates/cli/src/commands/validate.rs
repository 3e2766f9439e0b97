//! # CLI Validate Command
//!
//! Configuration validation for the Vitalog CLI.

use auth::JwtConfig;
use error::{AppError, Result};
use tracing::{info, warn};

use crate::config::{DatabaseConfig, parse_timezone};

/// Variables without a usable default
pub const REQUIRED_VARS: [&str; 3] = [
    "VITALOG_DATABASE_HOST",
    "VITALOG_DATABASE_PASSWORD",
    "VITALOG_JWT_SECRET",
];

/// Validates configuration from the process environment.
pub fn validate() -> Result<()> { validate_with(|name| std::env::var(name).ok()) }

/// Validates configuration read through `lookup`.
///
/// # Errors
///
/// Returns a validation error listing missing variables, or a config error
/// for the first malformed value.
pub fn validate_with(lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
    info!(target: "validate", "Validating configuration...");

    let missing: Vec<&str> = REQUIRED_VARS
        .iter()
        .copied()
        .filter(|var| lookup(var).is_none_or(|v| v.trim().is_empty()))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::validation(format!(
            "Missing required environment variables: {}",
            missing.join(", ")
        )));
    }

    DatabaseConfig::from_lookup(&lookup)?;

    let mut jwt = JwtConfig::new(lookup("VITALOG_JWT_SECRET").unwrap_or_default());
    if let Some(raw) = lookup("VITALOG_JWT_EXPIRATION_SECONDS") {
        jwt.expiration_seconds = raw.parse().map_err(|_| {
            AppError::config(format!(
                "VITALOG_JWT_EXPIRATION_SECONDS must be a positive integer, got '{}'",
                raw
            ))
        })?;
    }
    jwt.validate()?;

    let tz = parse_timezone(lookup(crate::config::TIMEZONE_VAR).as_deref())?;

    let admin_configured = ["VITALOG_ADMIN_USERNAME", "VITALOG_ADMIN_PASSWORD"]
        .iter()
        .all(|var| lookup(var).is_some_and(|v| !v.trim().is_empty()));
    if !admin_configured {
        warn!(target: "validate", "Administrator credentials not set; the admin seed will be skipped");
    }

    info!(target: "validate", timezone = %tz, admin_seed = admin_configured, "Configuration is valid");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    const SECRET: &str = "dml0YWxvZy10ZXN0LXNlY3JldC1mb3Itcm91dGVyLXRlc3RzLTAxMjM0NTY3ODk=";

    fn env(pairs: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<&str, &str> = pairs.iter().copied().collect();
        move |name| vars.get(name).map(|v| v.to_string())
    }

    fn complete() -> Vec<(&'static str, &'static str)> {
        vec![
            ("VITALOG_DATABASE_HOST", "localhost"),
            ("VITALOG_DATABASE_PASSWORD", "secret"),
            ("VITALOG_JWT_SECRET", SECRET),
        ]
    }

    #[test]
    fn test_validate_accepts_complete_configuration() {
        assert!(validate_with(env(&complete())).is_ok());
    }

    #[test]
    fn test_validate_lists_missing_variables() {
        let err = validate_with(env(&[("VITALOG_DATABASE_HOST", "localhost")])).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(err.message().contains("VITALOG_DATABASE_PASSWORD"));
        assert!(err.message().contains("VITALOG_JWT_SECRET"));
    }

    #[test]
    fn test_validate_rejects_short_secret() {
        let mut vars = complete();
        vars[2] = ("VITALOG_JWT_SECRET", "c2hvcnQ=");
        assert!(validate_with(env(&vars)).is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_timezone() {
        let mut vars = complete();
        vars.push(("VITALOG_TIMEZONE", "Atlantis/Capital"));
        assert!(validate_with(env(&vars)).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_port() {
        let mut vars = complete();
        vars.push(("VITALOG_DATABASE_PORT", "99999"));
        assert!(validate_with(env(&vars)).is_err());
    }
}

//! # Authentication Module
//!
//! Login, the caller's own profile and administrator member management.

pub mod handlers;
pub mod members;
pub mod profile;

use ::auth::{PasswordConfig, hash_password, secrecy::ExposeSecret, validate_password_strength};
use error::{AppError, Result};

/// Validates and hashes a new password.
///
/// # Errors
///
/// Returns a validation error listing every unmet rule, or an internal
/// error when hashing fails.
pub(crate) fn hash_new_password(field: &str, password: &str, config: Option<PasswordConfig>) -> Result<String> {
    if let Err(errors) = validate_password_strength(password) {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        return Err(AppError::validation(format!(
            "{}: {}",
            field,
            messages.join(", ")
        )));
    }

    let secret = ::auth::secrecy::SecretString::from(password.to_string());
    let hashed = hash_password(&secret, config).map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;
    Ok(hashed.expose_secret().to_string())
}

/// Maps a unique-constraint violation on `users.username` to a conflict.
pub(crate) fn username_conflict(err: sea_orm::DbErr) -> AppError {
    match err.sql_err() {
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("Username already taken"),
        _ => err.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_new_password_rejects_weak_passwords() {
        let err = hash_new_password("newPassword", "abcdefgh", None).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(err.message().contains("newPassword"));

        let err = hash_new_password("password", "1234", None).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_hash_new_password_accepts_letters_and_digits() {
        let fast = PasswordConfig {
            memory_cost: 1024,
            time_cost: 1,
            parallelism: 1,
            ..Default::default()
        };
        let hash = hash_new_password("password", "walk3times", Some(fast)).unwrap();
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_username_conflict_passthrough() {
        let err = username_conflict(sea_orm::DbErr::Custom("boom".to_string()));
        assert_eq!(err.code(), "DATABASE_ERROR");
    }
}

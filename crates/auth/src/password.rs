//! Password hashing and verification utilities using Argon2id.
//!
//! Hashes are stored in a PHC-style string:
//! `$argon2id$v=19$m=<kib>,t=<iterations>,p=<lanes>$<salt_b64>$<hash_b64>`.

use argon2::{Algorithm, Argon2, Params, Version};
use base64::prelude::*;
use rand::{RngCore, rng};
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Minimum accepted password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum accepted password length in characters.
pub const MAX_PASSWORD_LENGTH: usize = 256;

/// Errors that can occur during password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Hashing failed: {0}")]
    HashingFailed(String),

    #[error("Verification failed: password does not match")]
    VerificationFailed,

    #[error("Invalid hash format")]
    InvalidHashFormat,

    #[error("Base64 decoding failed: {0}")]
    DecodingFailed(#[from] base64::DecodeError),
}

/// Configuration for Argon2id password hashing.
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    /// Memory cost in KiB (default: 15 MiB = 15360 KiB)
    pub memory_cost: u32,
    /// Number of iterations (default: 3)
    pub time_cost:   u32,
    /// Number of lanes (default: 2)
    pub parallelism: u32,
    /// Length of the generated hash (default: 32 bytes)
    pub hash_length: u32,
    /// Length of the salt (default: 16 bytes)
    pub salt_length: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_cost: 15360,
            time_cost:   3,
            parallelism: 2,
            hash_length: 32,
            salt_length: 16,
        }
    }
}

fn argon2_for(memory_cost: u32, time_cost: u32, parallelism: u32, output_len: usize) -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(memory_cost, time_cost, parallelism, Some(output_len))
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a password using Argon2id.
///
/// # Arguments
///
/// * `password` - The password to hash
/// * `config` - Optional configuration for Argon2id parameters
///
/// # Returns
///
/// The encoded hash as a `SecretString`.
///
/// # Example
///
/// ```
/// use auth::password::hash_password;
/// use secrecy::SecretString;
///
/// let password = SecretString::from("walk10000steps".to_string());
/// let hash = hash_password(&password, None).unwrap();
/// ```
pub fn hash_password(password: &SecretString, config: Option<PasswordConfig>) -> Result<SecretString, PasswordError> {
    let config = config.unwrap_or_default();

    let mut salt = vec![0u8; config.salt_length as usize];
    rng().fill_bytes(&mut salt);

    let argon2 = argon2_for(
        config.memory_cost,
        config.time_cost,
        config.parallelism,
        config.hash_length as usize,
    )?;

    let mut output = vec![0u8; config.hash_length as usize];
    argon2
        .hash_password_into(password.expose_secret().as_bytes(), &salt, &mut output)
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    let encoded = format!(
        "$argon2id$v=19$m={},t={},p={}${}${}",
        config.memory_cost,
        config.time_cost,
        config.parallelism,
        BASE64_STANDARD.encode(&salt),
        BASE64_STANDARD.encode(&output)
    );

    Ok(SecretString::from(encoded))
}

/// Parsed form of an encoded hash.
struct EncodedHash {
    memory_cost: u32,
    time_cost:   u32,
    parallelism: u32,
    salt:        Vec<u8>,
    hash:        Vec<u8>,
}

fn parse_encoded_hash(encoded: &str) -> Result<EncodedHash, PasswordError> {
    // ["", "argon2id", "v=19", "m=..,t=..,p=..", "<salt>", "<hash>"]
    let parts: Vec<&str> = encoded.split('$').collect();
    let [empty, algorithm, version, params, salt_b64, hash_b64] = parts.as_slice()
    else {
        return Err(PasswordError::InvalidHashFormat);
    };
    if !empty.is_empty() || *algorithm != "argon2id" || *version != "v=19" {
        return Err(PasswordError::InvalidHashFormat);
    }

    let mut memory_cost = None;
    let mut time_cost = None;
    let mut parallelism = None;
    for param in params.split(',') {
        let (key, value) = param
            .split_once('=')
            .ok_or(PasswordError::InvalidHashFormat)?;
        let value: u32 = value
            .parse()
            .map_err(|_| PasswordError::InvalidHashFormat)?;
        match key {
            "m" => memory_cost = Some(value),
            "t" => time_cost = Some(value),
            "p" => parallelism = Some(value),
            _ => return Err(PasswordError::InvalidHashFormat),
        }
    }

    Ok(EncodedHash {
        memory_cost: memory_cost.ok_or(PasswordError::InvalidHashFormat)?,
        time_cost:   time_cost.ok_or(PasswordError::InvalidHashFormat)?,
        parallelism: parallelism.ok_or(PasswordError::InvalidHashFormat)?,
        salt:        BASE64_STANDARD.decode(salt_b64)?,
        hash:        BASE64_STANDARD.decode(hash_b64)?,
    })
}

/// Verifies a password against a stored hash.
///
/// An empty stored hash (accounts created without a password) never verifies.
///
/// # Example
///
/// ```
/// use auth::password::{hash_password, verify_password};
/// use secrecy::{ExposeSecret, SecretString};
///
/// let password = SecretString::from("walk10000steps".to_string());
/// let hash = hash_password(&password, None).unwrap();
///
/// assert!(verify_password(&password, hash.expose_secret()).is_ok());
/// ```
pub fn verify_password(password: &SecretString, expected_hash: &str) -> Result<(), PasswordError> {
    if expected_hash.is_empty() {
        return Err(PasswordError::VerificationFailed);
    }

    let parsed = parse_encoded_hash(expected_hash)?;
    if parsed.hash.is_empty() {
        return Err(PasswordError::InvalidHashFormat);
    }

    let argon2 = argon2_for(
        parsed.memory_cost,
        parsed.time_cost,
        parsed.parallelism,
        parsed.hash.len(),
    )?;

    let mut computed = vec![0u8; parsed.hash.len()];
    argon2
        .hash_password_into(
            password.expose_secret().as_bytes(),
            &parsed.salt,
            &mut computed,
        )
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    if computed.as_slice().ct_eq(&parsed.hash).into() {
        Ok(())
    }
    else {
        Err(PasswordError::VerificationFailed)
    }
}

/// Checks a new password against the account password policy.
///
/// A password needs at least [`MIN_PASSWORD_LENGTH`] characters, at least one
/// letter and at least one digit.
pub fn validate_password_strength(password: &str) -> Result<(), Vec<PasswordValidationError>> {
    let mut errors = Vec::new();
    let length = password.chars().count();

    if length < MIN_PASSWORD_LENGTH {
        errors.push(PasswordValidationError::TooShort);
    }

    if length > MAX_PASSWORD_LENGTH {
        errors.push(PasswordValidationError::TooLong);
    }

    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        errors.push(PasswordValidationError::MissingLetter);
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push(PasswordValidationError::MissingDigit);
    }

    if errors.is_empty() {
        Ok(())
    }
    else {
        Err(errors)
    }
}

/// Errors for password validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordValidationError {
    #[error("Password must be at least 8 characters long")]
    TooShort,

    #[error("Password must be at most 256 characters long")]
    TooLong,

    #[error("Password must contain at least one letter")]
    MissingLetter,

    #[error("Password must contain at least one digit")]
    MissingDigit,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> Option<PasswordConfig> {
        Some(PasswordConfig {
            memory_cost: 1024,
            time_cost: 1,
            parallelism: 1,
            ..Default::default()
        })
    }

    #[test]
    fn test_hash_and_verify() {
        let password = SecretString::from("hydrate2024".to_string());
        let hash = hash_password(&password, fast_config()).unwrap();
        assert!(hash.expose_secret().starts_with("$argon2id$v=19$m=1024,t=1,p=1$"));
        let result = verify_password(&password, hash.expose_secret());
        assert!(result.is_ok(), "Verification failed: {:?}", result);
    }

    #[test]
    fn test_hashes_are_salted() {
        let password = SecretString::from("hydrate2024".to_string());
        let first = hash_password(&password, fast_config()).unwrap();
        let second = hash_password(&password, fast_config()).unwrap();
        assert_ne!(first.expose_secret(), second.expose_secret());
    }

    #[test]
    fn test_wrong_password_fails() {
        let password = SecretString::from("hydrate2024".to_string());
        let wrong = SecretString::from("hydrate2025".to_string());
        let hash = hash_password(&password, fast_config()).unwrap();
        assert!(matches!(
            verify_password(&wrong, hash.expose_secret()),
            Err(PasswordError::VerificationFailed)
        ));
    }

    #[test]
    fn test_empty_hash_never_verifies() {
        let password = SecretString::from("".to_string());
        assert!(matches!(
            verify_password(&password, ""),
            Err(PasswordError::VerificationFailed)
        ));
    }

    #[test]
    fn test_malformed_hash_rejected() {
        let password = SecretString::from("hydrate2024".to_string());
        assert!(matches!(
            verify_password(&password, "$bcrypt$v=19$m=1,t=1,p=1$AA==$AA=="),
            Err(PasswordError::InvalidHashFormat)
        ));
        assert!(matches!(
            verify_password(&password, "$argon2id$v=19$m=1024$AA==$AA=="),
            Err(PasswordError::InvalidHashFormat)
        ));
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password_strength("abc12345").is_ok());
        assert_eq!(
            validate_password_strength("abc1").unwrap_err(),
            vec![PasswordValidationError::TooShort]
        );
        assert_eq!(
            validate_password_strength("abcdefgh").unwrap_err(),
            vec![PasswordValidationError::MissingDigit]
        );
        assert_eq!(
            validate_password_strength("12345678").unwrap_err(),
            vec![PasswordValidationError::MissingLetter]
        );
    }
}

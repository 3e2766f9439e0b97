//! # JWT Token Management
//!
//! Bearer token issuing and validation for API authentication.

use std::{
    collections::HashSet,
    time::{Duration, SystemTime},
};

use base64::prelude::*;
use cuid2::CuidConstructor;
use error::{AppError, Result};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Default token lifetime: 30 days.
pub const DEFAULT_EXPIRATION_SECONDS: u64 = 30 * 24 * 60 * 60;

/// Shortest accepted signing secret, in decoded bytes.
const MIN_SECRET_BYTES: usize = 32;

/// JWT signing configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Base64-encoded HMAC secret
    pub secret:             String,
    /// Token lifetime in seconds
    pub expiration_seconds: u64,
    /// `iss` claim
    pub issuer:             String,
    /// `aud` claim
    pub audience:           String,
}

impl JwtConfig {
    /// Builds a configuration with the default issuer, audience and lifetime.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret:             secret.into(),
            expiration_seconds: DEFAULT_EXPIRATION_SECONDS,
            issuer:             "vitalog".to_string(),
            audience:           "vitalog-api".to_string(),
        }
    }

    /// Reads `VITALOG_JWT_SECRET` and `VITALOG_JWT_EXPIRATION_SECONDS`.
    ///
    /// # Errors
    ///
    /// Returns a config error if the secret is missing, not base64, or shorter than 32 bytes.
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("VITALOG_JWT_SECRET")
            .map_err(|_| AppError::config("VITALOG_JWT_SECRET is not set"))?;

        let mut config = Self::new(secret);
        if let Ok(raw) = std::env::var("VITALOG_JWT_EXPIRATION_SECONDS") {
            config.expiration_seconds = raw.parse().map_err(|_| {
                AppError::config(format!(
                    "VITALOG_JWT_EXPIRATION_SECONDS must be a positive integer, got '{}'",
                    raw
                ))
            })?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Checks that the secret decodes and is long enough.
    pub fn validate(&self) -> Result<()> {
        let decoded = BASE64_STANDARD
            .decode(&self.secret)
            .map_err(|e| AppError::config(format!("JWT secret is not valid base64: {}", e)))?;
        if decoded.len() < MIN_SECRET_BYTES {
            return Err(AppError::config(format!(
                "JWT secret must decode to at least {} bytes",
                MIN_SECRET_BYTES
            )));
        }
        if self.expiration_seconds == 0 {
            return Err(AppError::config("JWT expiration must be greater than zero"));
        }
        Ok(())
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID)
    pub sub:      String,
    /// Login name
    pub username: String,
    /// Display name
    pub name:     String,
    /// Account role (admin, member, coach)
    pub role:     String,
    /// Token issuer
    pub iss:      String,
    /// Token audience
    pub aud:      String,
    /// Expiration time (Unix timestamp)
    pub exp:      u64,
    /// Issued at (Unix timestamp)
    pub iat:      u64,
    /// Unique token ID
    pub jti:      String,
}

/// Identity carried by a token.
#[derive(Debug, Clone, Copy)]
pub struct TokenSubject<'a> {
    pub user_id:  &'a str,
    pub username: &'a str,
    pub name:     &'a str,
    pub role:     &'a str,
}

/// Creates a new JWT access token
///
/// # Errors
///
/// Returns an error if the clock is before the epoch or token encoding fails.
pub fn create_access_token(config: &JwtConfig, subject: TokenSubject<'_>) -> Result<String> {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_err(|e| AppError::internal(format!("Failed to get current time: {}", e)))?;
    let expiration = now + Duration::from_secs(config.expiration_seconds);

    let claims = Claims {
        sub:      subject.user_id.to_string(),
        username: subject.username.to_string(),
        name:     subject.name.to_string(),
        role:     subject.role.to_string(),
        iss:      config.issuer.clone(),
        aud:      config.audience.clone(),
        exp:      expiration.as_secs(),
        iat:      now.as_secs(),
        jti:      CuidConstructor::new().with_length(32).create_id(),
    };

    let key = EncodingKey::from_base64_secret(&config.secret)
        .map_err(|e| AppError::config(format!("Invalid JWT secret: {}", e)))?;

    jsonwebtoken::encode(&Header::default(), &claims, &key)
        .map_err(|e| AppError::internal(format!("Failed to encode token: {}", e)))
}

/// Validates a JWT token and returns the claims
///
/// # Errors
///
/// Returns an unauthorized error for expired, tampered or foreign tokens.
pub fn validate_token(config: &JwtConfig, token: &str) -> Result<Claims> {
    let decoding_key = DecodingKey::from_base64_secret(&config.secret)
        .map_err(|e| AppError::config(format!("Invalid JWT secret: {}", e)))?;

    let mut validation = Validation::default();
    validation.iss = Some(HashSet::from([config.issuer.clone()]));
    validation.aud = Some(HashSet::from([config.audience.clone()]));
    validation.validate_exp = true;

    jsonwebtoken::decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| AppError::unauthorized(format!("Token validation failed: {}", e)))
}

/// Extracts the Bearer token from the Authorization header
///
/// # Returns
///
/// The token string if present, or None if missing/invalid.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    let token = auth_header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    }
    else {
        Some(token)
    }
}

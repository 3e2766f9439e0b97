//! # Authentication Data Transfer Objects
//!
//! Request and response types for authentication endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::users::UserResponse;

/// Request body for user login
#[derive(Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login name
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    /// User's password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token for API requests
    pub token: String,

    /// Token lifetime in seconds
    pub expires_in: u64,

    /// Signed-in account
    pub user: UserResponse,
}

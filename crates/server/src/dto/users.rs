//! # User Data Transfer Objects
//!
//! Request and response types for profile and member endpoints.

use entity::sea_orm_active_enums::{UserRole, UserStatus};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Public view of an account. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id:         String,
    pub username:   String,
    pub name:       String,
    pub avatar:     String,
    pub role:       UserRole,
    pub status:     UserStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<entity::users::Model> for UserResponse {
    fn from(user: entity::users::Model) -> Self {
        Self {
            id:         user.id.to_string(),
            username:   user.username,
            name:       user.name,
            avatar:     user.avatar,
            role:       user.role,
            status:     user.status,
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

/// Request to update the caller's profile
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name:     String,
    #[validate(length(min = 1, max = 64, message = "Username must be between 1 and 64 characters"))]
    pub username: String,
    /// Omitted or null clears the avatar
    #[validate(length(max = 2048, message = "Avatar must not exceed 2048 characters"))]
    pub avatar:   Option<String>,
}

/// Query for the username availability check
#[derive(Debug, Clone, Deserialize)]
pub struct UsernameQuery {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsernameAvailability {
    pub available: bool,
}

/// Request to change the caller's password
#[derive(Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    pub new_password:     String,
}

impl std::fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangePasswordRequest").finish_non_exhaustive()
    }
}

/// Request to create a member account (admin operation)
#[derive(Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreateMemberRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name:     String,
    #[validate(length(min = 1, max = 64, message = "Username must be between 1 and 64 characters"))]
    pub username: String,
    pub role:     UserRole,
    pub status:   UserStatus,
    /// Accounts created without a password cannot sign in
    pub password: Option<String>,
}

impl std::fmt::Debug for CreateMemberRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateMemberRequest")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("role", &self.role)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Request to update a member account (admin operation)
#[derive(Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct UpdateMemberRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name:     String,
    pub role:     UserRole,
    pub status:   UserStatus,
    /// Replaces the password when present and non-empty
    pub password: Option<String>,
}

impl std::fmt::Debug for UpdateMemberRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateMemberRequest")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

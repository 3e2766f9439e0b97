//! # Profile Handlers
//!
//! The signed-in user's own name, username, avatar and password.

use ::auth::{secrecy::SecretString, verify_password};
use axum::Json;
use chrono::Utc;
use entity::users::{ActiveModel, Column as UserColumn, Entity as UsersEntity};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::{hash_new_password, username_conflict};
use crate::{
    AppState,
    dto::{
        SuccessResponse,
        users::{ChangePasswordRequest, UpdateProfileRequest, UserResponse, UsernameAvailability, UsernameQuery},
    },
    middleware::auth::AuthenticatedUser,
};

async fn username_taken_by_other(state: &AppState, username: &str, user_id: Uuid) -> Result<bool> {
    let count = UsersEntity::find()
        .filter(UserColumn::Username.eq(username))
        .filter(UserColumn::Id.ne(user_id))
        .count(&*state.db)
        .await?;
    Ok(count > 0)
}

/// Update the authenticated user's profile
///
/// # Arguments
///
/// * `state` - Application state
/// * `user` - Authenticated user from middleware
/// * `req` - New name, username and avatar
///
/// # Returns
///
/// Updated user profile response
///
/// # Errors
///
/// Conflict when another account owns the username, not found when the
/// caller's account no longer exists.
pub async fn update_profile_handler(
    state: &AppState,
    user: AuthenticatedUser,
    req: UpdateProfileRequest,
) -> Result<Json<UserResponse>> {
    req.validate()?;
    let username = req.username.trim().to_string();

    if username_taken_by_other(state, &username, user.id).await? {
        return Err(AppError::conflict("Username already taken"));
    }

    let db_user = UsersEntity::find_by_id(user.id)
        .one(&*state.db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let mut active_model: ActiveModel = db_user.into();
    active_model.name = Set(req.name.trim().to_string());
    active_model.username = Set(username);
    active_model.avatar = Set(req.avatar.unwrap_or_default());
    active_model.updated_at = Set(Utc::now());

    let updated = active_model
        .update(&*state.db)
        .await
        .map_err(username_conflict)?;

    info!(user_id = %user.id, "User profile updated");

    Ok(Json(updated.into()))
}

/// Whether `username` is free for the caller to take
pub async fn username_available_handler(
    state: &AppState,
    user: AuthenticatedUser,
    query: UsernameQuery,
) -> Result<Json<UsernameAvailability>> {
    let username = query.username.trim();
    if username.is_empty() {
        return Err(AppError::validation("username: Username is required"));
    }

    let taken = username_taken_by_other(state, username, user.id).await?;
    Ok(Json(UsernameAvailability {
        available: !taken,
    }))
}

/// Change the authenticated user's password
///
/// # Errors
///
/// Validation error for a weak new password, bad request when the
/// current password does not match.
pub async fn change_password_handler(
    state: &AppState,
    user: AuthenticatedUser,
    req: ChangePasswordRequest,
) -> Result<Json<SuccessResponse>> {
    req.validate()?;
    let new_hash = hash_new_password("newPassword", &req.new_password, None)?;

    let db_user = UsersEntity::find_by_id(user.id)
        .one(&*state.db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let current = SecretString::from(req.current_password);
    if verify_password(&current, &db_user.password_hash).is_err() {
        return Err(AppError::bad_request("Current password is incorrect"));
    }

    let mut active_model: ActiveModel = db_user.into();
    active_model.password_hash = Set(new_hash);
    active_model.updated_at = Set(Utc::now());
    active_model.update(&*state.db).await?;

    info!(user_id = %user.id, "Password changed");

    Ok(Json(SuccessResponse::new("Password updated")))
}

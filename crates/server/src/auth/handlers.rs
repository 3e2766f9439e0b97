//! # Authentication Handlers
//!
//! HTTP request handlers for authentication endpoints.

use ::auth::{TokenSubject, create_access_token, secrecy::SecretString, verify_password};
use axum::Json;
use entity::users::{Column, Entity as UsersEntity};
use error::{AppError, Result};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use tracing::info;
use validator::Validate;

use crate::{
    AppState,
    dto::{
        auth::{LoginRequest, LoginResponse},
        users::UserResponse,
    },
    middleware::auth::AuthenticatedUser,
};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Handler for the login endpoint
///
/// Makes sure the administrator account exists, then checks the
/// credentials. Unknown users, wrong passwords and suspended accounts all
/// get the same unauthorized response.
///
/// # Errors
///
/// Returns unauthorized for rejected credentials and an internal error
/// when the administrator seed fails.
pub async fn login_handler(state: &AppState, req: LoginRequest) -> Result<Json<LoginResponse>> {
    req.validate()?;
    state.seed_guard.ensure_seeded().await?;

    let user = UsersEntity::find()
        .filter(Column::Username.eq(req.username.trim()))
        .one(&*state.db)
        .await?;

    let Some(user) = user
    else {
        logging::log_auth_event!("login", req.username, false);
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    };

    let password_secret = SecretString::from(req.password);
    if verify_password(&password_secret, &user.password_hash).is_err() || !user.is_active() {
        logging::log_auth_event!("login", user.username, false);
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }

    let user_id = user.id.to_string();
    let token = create_access_token(
        &state.jwt_config,
        TokenSubject {
            user_id:  &user_id,
            username: &user.username,
            name:     &user.name,
            role:     user.role.as_str(),
        },
    )?;

    logging::log_auth_event!("login", user.username, true);
    info!(user_id = %user_id, "User logged in successfully");

    Ok(Json(LoginResponse {
        token,
        expires_in: state.jwt_config.expiration_seconds,
        user: user.into(),
    }))
}

/// Handler for the current-user endpoint
///
/// # Errors
///
/// Returns not found when the account was deleted after the token was issued.
pub async fn me_handler(state: &AppState, user: AuthenticatedUser) -> Result<Json<UserResponse>> {
    let db_user = UsersEntity::find_by_id(user.id)
        .one(&*state.db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(db_user.into()))
}

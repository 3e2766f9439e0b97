//! # Member Handlers
//!
//! Administrator management of member accounts. The router only reaches
//! these handlers after the admin gate.

use axum::{Json, http::StatusCode};
use chrono::Utc;
use entity::users::{self, ActiveModel, Column as UserColumn, Entity as UsersEntity};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::{hash_new_password, username_conflict};
use crate::{
    AppState,
    dto::{
        SuccessResponse,
        users::{CreateMemberRequest, UpdateMemberRequest, UserResponse},
    },
    middleware::auth::AuthenticatedUser,
};

/// Hash for an optional password; absent or empty yields an account that cannot sign in.
fn optional_password_hash(password: Option<&str>) -> Result<Option<String>> {
    match password.filter(|p| !p.is_empty()) {
        Some(p) => hash_new_password("password", p, None).map(Some),
        None => Ok(None),
    }
}

/// List all accounts, newest first
pub async fn list_members_handler(state: &AppState, _admin: AuthenticatedUser) -> Result<Json<Vec<UserResponse>>> {
    let members = UsersEntity::find()
        .order_by_desc(UserColumn::CreatedAt)
        .all(&*state.db)
        .await?;

    Ok(Json(members.into_iter().map(UserResponse::from).collect()))
}

/// Create a member account
///
/// # Arguments
///
/// * `state` - Application state
/// * `admin` - Authenticated administrator
/// * `req` - Name, username, role, status and optional password
///
/// # Returns
///
/// `201 Created` with the new account
///
/// # Errors
///
/// Conflict when the username exists, validation error for a weak password.
pub async fn create_member_handler(
    state: &AppState,
    admin: AuthenticatedUser,
    req: CreateMemberRequest,
) -> Result<(StatusCode, Json<UserResponse>)> {
    req.validate()?;
    let username = req.username.trim().to_string();
    let password_hash = optional_password_hash(req.password.as_deref())?.unwrap_or_default();

    let existing = UsersEntity::find()
        .filter(UserColumn::Username.eq(&username))
        .count(&*state.db)
        .await?;
    if existing > 0 {
        return Err(AppError::conflict("Username already taken"));
    }

    let now = Utc::now();
    let member = ActiveModel {
        id: Set(Uuid::new_v4()),
        avatar: Set(users::default_avatar(&username)),
        username: Set(username),
        password_hash: Set(password_hash),
        name: Set(req.name.trim().to_string()),
        role: Set(req.role),
        status: Set(req.status),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = member.insert(&*state.db).await.map_err(username_conflict)?;

    info!(admin_id = %admin.id, member_id = %created.id, role = %created.role, "Member created");

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Update a member's name, role, status and optionally password
///
/// # Errors
///
/// Not found when no account has `member_id`.
pub async fn update_member_handler(
    state: &AppState,
    admin: AuthenticatedUser,
    member_id: Uuid,
    req: UpdateMemberRequest,
) -> Result<Json<UserResponse>> {
    req.validate()?;
    let password_hash = optional_password_hash(req.password.as_deref())?;

    let member = UsersEntity::find_by_id(member_id)
        .one(&*state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Member not found"))?;

    let mut active_model: ActiveModel = member.into();
    active_model.name = Set(req.name.trim().to_string());
    active_model.role = Set(req.role);
    active_model.status = Set(req.status);
    if let Some(hash) = password_hash {
        active_model.password_hash = Set(hash);
    }
    active_model.updated_at = Set(Utc::now());

    let updated = active_model.update(&*state.db).await?;

    info!(admin_id = %admin.id, member_id = %member_id, "Member updated");

    Ok(Json(updated.into()))
}

/// Delete a member and, through cascading keys, all of their records
///
/// # Errors
///
/// Not found when no account has `member_id`.
pub async fn delete_member_handler(
    state: &AppState,
    admin: AuthenticatedUser,
    member_id: Uuid,
) -> Result<Json<SuccessResponse>> {
    let result = UsersEntity::delete_by_id(member_id)
        .exec(&*state.db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::not_found("Member not found"));
    }

    info!(admin_id = %admin.id, member_id = %member_id, "Member deleted");

    Ok(Json(SuccessResponse::new("Member deleted")))
}

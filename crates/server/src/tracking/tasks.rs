//! # Task Handlers
//!
//! Daily tasks worth experience points.

use axum::{Json, http::StatusCode};
use chrono::Utc;
use entity::tasks::{ActiveModel, Column, Entity as TasksEntity};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    AppState,
    calendar::resolve_date_param,
    dto::{
        tasks::{CreateTaskRequest, TaskResponse, ToggleTaskRequest},
        water::DateQuery,
    },
    middleware::auth::AuthenticatedUser,
};

/// Tasks of one day in creation order
pub async fn list_tasks_handler(
    state: &AppState,
    user: AuthenticatedUser,
    query: DateQuery,
) -> Result<Json<Vec<TaskResponse>>> {
    let date = resolve_date_param(query.date.as_deref(), state.clock.today())?;

    let tasks = TasksEntity::find()
        .filter(Column::UserId.eq(user.id))
        .filter(Column::Date.eq(date))
        .order_by_asc(Column::CreatedAt)
        .all(&*state.db)
        .await?;

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// Create an open task
pub async fn create_task_handler(
    state: &AppState,
    user: AuthenticatedUser,
    req: CreateTaskRequest,
) -> Result<(StatusCode, Json<TaskResponse>)> {
    req.validate()?;
    let date = resolve_date_param(req.date.as_deref(), state.clock.today())?;
    let now = Utc::now();

    let created = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.id),
        date: Set(date),
        title: Set(req.title.trim().to_string()),
        exp: Set(req.exp),
        completed: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&*state.db)
    .await?;

    info!(user_id = %user.id, task_id = %created.id, "Task created");

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Mark one of the caller's tasks done or open
///
/// # Errors
///
/// Not found when the task does not exist or belongs to someone else.
pub async fn toggle_task_handler(
    state: &AppState,
    user: AuthenticatedUser,
    task_id: Uuid,
    req: ToggleTaskRequest,
) -> Result<Json<TaskResponse>> {
    let task = TasksEntity::find_by_id(task_id)
        .filter(Column::UserId.eq(user.id))
        .one(&*state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Task not found"))?;

    let mut active_model: ActiveModel = task.into();
    active_model.completed = Set(req.completed);
    active_model.updated_at = Set(Utc::now());
    let updated = active_model.update(&*state.db).await?;

    info!(user_id = %user.id, task_id = %task_id, completed = req.completed, "Task toggled");

    Ok(Json(updated.into()))
}

//! # Log Handlers
//!
//! Food, sport, weight and mood entries browsed by calendar date.

use axum::{Json, http::StatusCode};
use chrono::Utc;
use entity::logs::{ActiveModel, Column, Entity as LogsEntity};
use error::Result;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    AppState,
    calendar::resolve_date_param,
    dto::{
        logs::{CreateLogRequest, LogPayload, LogResponse},
        water::DateQuery,
    },
    middleware::auth::AuthenticatedUser,
};

/// Logs of one day, latest first
pub async fn list_logs_handler(
    state: &AppState,
    user: AuthenticatedUser,
    query: DateQuery,
) -> Result<Json<Vec<LogResponse>>> {
    let date = resolve_date_param(query.date.as_deref(), state.clock.today())?;

    let logs = LogsEntity::find()
        .filter(Column::UserId.eq(user.id))
        .filter(Column::Date.eq(date))
        .order_by_desc(Column::Time)
        .all(&*state.db)
        .await?;

    Ok(Json(logs.into_iter().map(LogResponse::from).collect()))
}

/// Record a log entry after validating its payload against its type
pub async fn create_log_handler(
    state: &AppState,
    user: AuthenticatedUser,
    req: CreateLogRequest,
) -> Result<(StatusCode, Json<LogResponse>)> {
    req.validate()?;
    let payload = LogPayload::parse(req.log_type, req.data)?;
    let date = resolve_date_param(req.date.as_deref(), state.clock.today())?;

    let created = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.id),
        log_type: Set(req.log_type),
        date: Set(date),
        time: Set(req.time),
        data: Set(payload.to_json()?),
        created_at: Set(Utc::now()),
    }
    .insert(&*state.db)
    .await?;

    info!(user_id = %user.id, log_type = %created.log_type, date = %created.date, "Log recorded");

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Distinct dates that have at least one log, newest first
pub async fn log_dates_handler(state: &AppState, user: AuthenticatedUser) -> Result<Json<Vec<String>>> {
    let dates: Vec<String> = LogsEntity::find()
        .select_only()
        .column(Column::Date)
        .distinct()
        .filter(Column::UserId.eq(user.id))
        .order_by_desc(Column::Date)
        .into_tuple()
        .all(&*state.db)
        .await?;

    Ok(Json(dates))
}

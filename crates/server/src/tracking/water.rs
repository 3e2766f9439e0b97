//! # Water Handlers
//!
//! Hydration settings and drink entries.

use axum::{Json, http::StatusCode};
use chrono::Utc;
use entity::{
    water_entries,
    water_settings::{self, DEFAULT_CUP_SIZE_CC, DEFAULT_DAILY_TARGET_CC, DEFAULT_DRINK_CC},
};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, sea_query::OnConflict};
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use crate::{
    AppState,
    calendar::resolve_date_param,
    dto::water::{
        CreateWaterEntryRequest,
        DateQuery,
        UpdateWaterSettingsRequest,
        WaterEntryResponse,
        WaterSettingsResponse,
    },
    middleware::auth::AuthenticatedUser,
};

async fn find_settings(state: &AppState, user_id: Uuid) -> Result<Option<water_settings::Model>> {
    Ok(water_settings::Entity::find()
        .filter(water_settings::Column::UserId.eq(user_id))
        .one(&*state.db)
        .await?)
}

/// Get the caller's settings, creating the defaults on first read
pub async fn get_settings_handler(state: &AppState, user: AuthenticatedUser) -> Result<Json<WaterSettingsResponse>> {
    if let Some(existing) = find_settings(state, user.id).await? {
        return Ok(Json(existing.into()));
    }

    // A concurrent first read may insert the row first; keep whichever landed
    let now = Utc::now();
    let inserted = water_settings::Entity::insert(water_settings::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.id),
        cup_size_cc: Set(DEFAULT_CUP_SIZE_CC),
        daily_target_cc: Set(DEFAULT_DAILY_TARGET_CC),
        default_drink_cc: Set(DEFAULT_DRINK_CC),
        note: Set(String::new()),
        created_at: Set(now),
        updated_at: Set(now),
    })
    .on_conflict(
        OnConflict::column(water_settings::Column::UserId)
            .do_nothing()
            .to_owned(),
    )
    .exec_without_returning(&*state.db)
    .await?;

    debug!(user_id = %user.id, inserted, "Created default water settings");

    let settings = find_settings(state, user.id)
        .await?
        .ok_or_else(|| AppError::internal("Water settings missing after insert"))?;

    Ok(Json(settings.into()))
}

/// Replace the caller's settings, creating the row when missing
pub async fn update_settings_handler(
    state: &AppState,
    user: AuthenticatedUser,
    req: UpdateWaterSettingsRequest,
) -> Result<Json<WaterSettingsResponse>> {
    req.validate()?;
    let now = Utc::now();

    let saved = water_settings::Entity::insert(water_settings::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.id),
        cup_size_cc: Set(req.cup_size_cc),
        daily_target_cc: Set(req.daily_target_cc),
        default_drink_cc: Set(req.default_drink_cc),
        note: Set(req.note.unwrap_or_default()),
        created_at: Set(now),
        updated_at: Set(now),
    })
    .on_conflict(
        OnConflict::column(water_settings::Column::UserId)
            .update_columns([
                water_settings::Column::CupSizeCc,
                water_settings::Column::DailyTargetCc,
                water_settings::Column::DefaultDrinkCc,
                water_settings::Column::Note,
                water_settings::Column::UpdatedAt,
            ])
            .to_owned(),
    )
    .exec_with_returning(&*state.db)
    .await?;

    info!(user_id = %user.id, daily_target_cc = saved.daily_target_cc, "Water settings updated");

    Ok(Json(saved.into()))
}

/// Entries of one day, earliest first
pub async fn list_entries_handler(
    state: &AppState,
    user: AuthenticatedUser,
    query: DateQuery,
) -> Result<Json<Vec<WaterEntryResponse>>> {
    let date = resolve_date_param(query.date.as_deref(), state.clock.today())?;

    let entries = water_entries::Entity::find()
        .filter(water_entries::Column::UserId.eq(user.id))
        .filter(water_entries::Column::Date.eq(date))
        .order_by_asc(water_entries::Column::Time)
        .all(&*state.db)
        .await?;

    Ok(Json(entries.into_iter().map(WaterEntryResponse::from).collect()))
}

/// Record a drink
pub async fn create_entry_handler(
    state: &AppState,
    user: AuthenticatedUser,
    req: CreateWaterEntryRequest,
) -> Result<(StatusCode, Json<WaterEntryResponse>)> {
    req.validate()?;
    let date = resolve_date_param(req.date.as_deref(), state.clock.today())?;

    let created = water_entries::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.id),
        date: Set(date),
        amount_cc: Set(req.amount_cc),
        time: Set(req.time),
        note: Set(req.note.unwrap_or_default()),
        created_at: Set(Utc::now()),
    }
    .insert(&*state.db)
    .await?;

    debug!(user_id = %user.id, amount_cc = created.amount_cc, date = %created.date, "Water entry recorded");

    Ok((StatusCode::CREATED, Json(created.into())))
}

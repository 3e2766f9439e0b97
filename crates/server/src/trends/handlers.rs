//! # Trend Handlers
//!
//! Hydration, weight and activity series for the caller.

use axum::Json;
use entity::{
    logs::{self, LogType},
    water_entries,
};
use error::{AppError, Result};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::debug;

use super::{
    aggregate::{count_activities, mean_by_label, sum_by_label},
    range::{DateRange, TrendRangeRequest, resolve},
};
use crate::{
    AppState,
    dto::trends::{ActivityPoint, HydrationPoint, TrendResponse, WeightPoint},
    middleware::auth::AuthenticatedUser,
};

/// Rejects explicit month bounds outside 1..=12 or in reverse order.
///
/// # Errors
///
/// Returns a validation error naming the offending parameter.
pub fn validate_range_request(req: &TrendRangeRequest) -> Result<()> {
    for (field, month) in [("startMonth", req.start_month), ("endMonth", req.end_month)] {
        if let Some(month) = month &&
            !(1 ..= 12).contains(&month)
        {
            return Err(AppError::validation(format!(
                "{}: Month must be between 1 and 12",
                field
            )));
        }
    }

    if let (Some(start), Some(end)) = (req.start_month, req.end_month) &&
        start > end
    {
        return Err(AppError::validation(
            "startMonth: Start month must not be after end month",
        ));
    }

    Ok(())
}

fn resolve_for(state: &AppState, req: &TrendRangeRequest) -> Result<DateRange> {
    // A recognised keyword ignores the month bounds entirely
    if req.keyword().is_none() {
        validate_range_request(req)?;
    }
    let range = resolve(req, state.clock.today());
    debug!(
        start = %range.start,
        end = %range.end,
        label_format = %range.label_format,
        "Resolved trend range"
    );
    Ok(range)
}

async fn logs_in_range(state: &AppState, user: &AuthenticatedUser, log_type: LogType, range: &DateRange) -> Result<Vec<logs::Model>> {
    Ok(logs::Entity::find()
        .filter(logs::Column::UserId.eq(user.id))
        .filter(logs::Column::LogType.eq(log_type))
        .filter(logs::Column::Date.between(range.start_key(), range.end_key()))
        .order_by_asc(logs::Column::Date)
        .order_by_asc(logs::Column::Time)
        .all(&*state.db)
        .await?)
}

/// Total water drunk per label
pub async fn hydration_handler(
    state: &AppState,
    user: AuthenticatedUser,
    req: TrendRangeRequest,
) -> Result<Json<TrendResponse<HydrationPoint>>> {
    let range = resolve_for(state, &req)?;

    let entries = water_entries::Entity::find()
        .filter(water_entries::Column::UserId.eq(user.id))
        .filter(water_entries::Column::Date.between(range.start_key(), range.end_key()))
        .order_by_asc(water_entries::Column::Date)
        .order_by_asc(water_entries::Column::Time)
        .all(&*state.db)
        .await?;

    let data = sum_by_label(
        &range,
        entries
            .into_iter()
            .map(|entry| (entry.date, i64::from(entry.amount_cc))),
    )
    .into_iter()
    .map(|(date, amount)| {
        HydrationPoint {
            date,
            amount,
        }
    })
    .collect();

    Ok(Json(TrendResponse {
        data,
    }))
}

/// Mean body weight per label
pub async fn weight_handler(
    state: &AppState,
    user: AuthenticatedUser,
    req: TrendRangeRequest,
) -> Result<Json<TrendResponse<WeightPoint>>> {
    let range = resolve_for(state, &req)?;
    let entries = logs_in_range(state, &user, LogType::Weight, &range).await?;

    let samples = entries.into_iter().filter_map(|log| {
        let weight = log.data.get("weight").and_then(serde_json::Value::as_f64)?;
        Some((log.date, weight))
    });

    let data = mean_by_label(&range, samples)
        .into_iter()
        .map(|(date, weight)| {
            WeightPoint {
                date,
                weight,
            }
        })
        .collect();

    Ok(Json(TrendResponse {
        data,
    }))
}

/// Sport sessions per activity bucket
pub async fn activity_handler(
    state: &AppState,
    user: AuthenticatedUser,
    req: TrendRangeRequest,
) -> Result<Json<TrendResponse<ActivityPoint>>> {
    let range = resolve_for(state, &req)?;
    let entries = logs_in_range(state, &user, LogType::Sport, &range).await?;

    let sport_types = entries
        .iter()
        .filter_map(|log| log.data.get("sportType").and_then(serde_json::Value::as_str));

    let data = count_activities(sport_types)
        .into_iter()
        .map(|(bucket, value)| {
            ActivityPoint {
                name: bucket.name().to_string(),
                value,
                fill: bucket.fill().to_string(),
            }
        })
        .collect();

    Ok(Json(TrendResponse {
        data,
    }))
}

//! # API Router Configuration
//!
//! Configures API routes for the Vitalog application.

use axum::{
    Json,
    Router,
    extract::{Extension, State as AxumState},
    http::StatusCode,
    middleware,
    routing::{get, patch, post, put},
};
use error::Result;
use uuid::Uuid;

use crate::{
    AppState,
    dto::{
        SuccessResponse,
        auth::{LoginRequest, LoginResponse},
        logs::{CreateLogRequest, LogResponse},
        tasks::{CreateTaskRequest, TaskResponse, ToggleTaskRequest},
        trends::{ActivityPoint, HydrationPoint, TrendResponse, WeightPoint},
        users::{
            ChangePasswordRequest,
            CreateMemberRequest,
            UpdateMemberRequest,
            UpdateProfileRequest,
            UserResponse,
            UsernameAvailability,
            UsernameQuery,
        },
        water::{CreateWaterEntryRequest, DateQuery, UpdateWaterSettingsRequest, WaterEntryResponse, WaterSettingsResponse},
    },
    extract::{ApiJson, ApiPath, ApiQuery},
    middleware::{
        auth::{AuthenticatedUser, auth_middleware},
        permissions::admin_middleware,
        request_id::request_id_middleware,
        security_headers::{CorsConfig, cors_middleware, security_headers_middleware},
    },
    trends::TrendRangeRequest,
};

/// Creates the API router with all routes
///
/// # Arguments
///
/// * `state` - Application state containing DB pool and config
///
/// # Returns
///
/// Configured Axum router with all routes
pub fn create_router(state: AppState) -> Router {
    // Administrator routes; the role gate runs before any handler
    let admin_routes = Router::new()
        .route(
            "/api/v1/members",
            get(list_members_handler).post(create_member_handler),
        )
        .route(
            "/api/v1/members/{id}",
            put(update_member_handler).delete(delete_member_handler),
        )
        .layer(middleware::from_fn(admin_middleware));

    // Protected routes that require authentication
    let protected_routes = Router::new()
        .route("/api/v1/auth/me", get(me_handler))
        .route("/api/v1/profile", put(update_profile_handler))
        .route(
            "/api/v1/profile/username-available",
            get(username_available_handler),
        )
        .route("/api/v1/profile/password", post(change_password_handler))
        .route(
            "/api/v1/water/settings",
            get(get_water_settings_handler).put(update_water_settings_handler),
        )
        .route(
            "/api/v1/water/entries",
            get(list_water_entries_handler).post(create_water_entry_handler),
        )
        .route("/api/v1/tasks", get(list_tasks_handler).post(create_task_handler))
        .route("/api/v1/tasks/{id}", patch(toggle_task_handler))
        .route("/api/v1/logs", get(list_logs_handler).post(create_log_handler))
        .route("/api/v1/logs/dates", get(log_dates_handler))
        .route("/api/v1/trends/hydration", get(hydration_trend_handler))
        .route("/api/v1/trends/weight", get(weight_trend_handler))
        .route("/api/v1/trends/activity", get(activity_trend_handler))
        .merge(admin_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Public routes that don't require authentication
    let public_routes = Router::new().route("/api/v1/auth/login", post(login_handler));

    public_routes.merge(protected_routes).with_state(state)
}

/// Wrapper handler for login endpoint that uses State extractor
async fn login_handler(
    AxumState(state): AxumState<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    crate::auth::handlers::login_handler(&state, req).await
}

async fn me_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<UserResponse>> {
    crate::auth::handlers::me_handler(&state, user).await
}

async fn update_profile_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(req): ApiJson<UpdateProfileRequest>,
) -> Result<Json<UserResponse>> {
    crate::auth::profile::update_profile_handler(&state, user, req).await
}

async fn username_available_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiQuery(query): ApiQuery<UsernameQuery>,
) -> Result<Json<UsernameAvailability>> {
    crate::auth::profile::username_available_handler(&state, user, query).await
}

async fn change_password_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(req): ApiJson<ChangePasswordRequest>,
) -> Result<Json<SuccessResponse>> {
    crate::auth::profile::change_password_handler(&state, user, req).await
}

async fn get_water_settings_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<WaterSettingsResponse>> {
    crate::tracking::water::get_settings_handler(&state, user).await
}

async fn update_water_settings_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(req): ApiJson<UpdateWaterSettingsRequest>,
) -> Result<Json<WaterSettingsResponse>> {
    crate::tracking::water::update_settings_handler(&state, user, req).await
}

async fn list_water_entries_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiQuery(query): ApiQuery<DateQuery>,
) -> Result<Json<Vec<WaterEntryResponse>>> {
    crate::tracking::water::list_entries_handler(&state, user, query).await
}

async fn create_water_entry_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(req): ApiJson<CreateWaterEntryRequest>,
) -> Result<(StatusCode, Json<WaterEntryResponse>)> {
    crate::tracking::water::create_entry_handler(&state, user, req).await
}

async fn list_tasks_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiQuery(query): ApiQuery<DateQuery>,
) -> Result<Json<Vec<TaskResponse>>> {
    crate::tracking::tasks::list_tasks_handler(&state, user, query).await
}

async fn create_task_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(req): ApiJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>)> {
    crate::tracking::tasks::create_task_handler(&state, user, req).await
}

async fn toggle_task_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiPath(task_id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<ToggleTaskRequest>,
) -> Result<Json<TaskResponse>> {
    crate::tracking::tasks::toggle_task_handler(&state, user, task_id, req).await
}

async fn list_logs_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiQuery(query): ApiQuery<DateQuery>,
) -> Result<Json<Vec<LogResponse>>> {
    crate::tracking::logs::list_logs_handler(&state, user, query).await
}

async fn create_log_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(req): ApiJson<CreateLogRequest>,
) -> Result<(StatusCode, Json<LogResponse>)> {
    crate::tracking::logs::create_log_handler(&state, user, req).await
}

async fn log_dates_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<String>>> {
    crate::tracking::logs::log_dates_handler(&state, user).await
}

async fn hydration_trend_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiQuery(req): ApiQuery<TrendRangeRequest>,
) -> Result<Json<TrendResponse<HydrationPoint>>> {
    crate::trends::handlers::hydration_handler(&state, user, req).await
}

async fn weight_trend_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiQuery(req): ApiQuery<TrendRangeRequest>,
) -> Result<Json<TrendResponse<WeightPoint>>> {
    crate::trends::handlers::weight_handler(&state, user, req).await
}

async fn activity_trend_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiQuery(req): ApiQuery<TrendRangeRequest>,
) -> Result<Json<TrendResponse<ActivityPoint>>> {
    crate::trends::handlers::activity_handler(&state, user, req).await
}

/// Wrapper handler for listing members (admin only)
async fn list_members_handler(
    AxumState(state): AxumState<AppState>,
    Extension(admin): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<UserResponse>>> {
    crate::auth::members::list_members_handler(&state, admin).await
}

async fn create_member_handler(
    AxumState(state): AxumState<AppState>,
    Extension(admin): Extension<AuthenticatedUser>,
    ApiJson(req): ApiJson<CreateMemberRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    crate::auth::members::create_member_handler(&state, admin, req).await
}

async fn update_member_handler(
    AxumState(state): AxumState<AppState>,
    Extension(admin): Extension<AuthenticatedUser>,
    ApiPath(member_id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateMemberRequest>,
) -> Result<Json<UserResponse>> {
    crate::auth::members::update_member_handler(&state, admin, member_id, req).await
}

async fn delete_member_handler(
    AxumState(state): AxumState<AppState>,
    Extension(admin): Extension<AuthenticatedUser>,
    ApiPath(member_id): ApiPath<Uuid>,
) -> Result<Json<SuccessResponse>> {
    crate::auth::members::delete_member_handler(&state, admin, member_id).await
}

/// Creates the health check router
pub fn create_health_router() -> Router { Router::new().route("/health", get(|| async { "OK" })) }

/// Creates the main application router
///
/// # Arguments
///
/// * `state` - Application state containing DB pool and config
/// * `cors` - Cross-origin policy for browser clients
///
/// # Returns
///
/// Main router with health checks, API routes and the shared middleware
/// stack (request ids, security headers, CORS)
pub fn create_app_router(state: AppState, cors: CorsConfig) -> Router {
    Router::new()
        .merge(create_health_router())
        .merge(create_router(state))
        .layer(middleware::from_fn(move |req, next| {
            cors_middleware(req, next, cors.clone())
        }))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(request_id_middleware))
}

//! # Authentication Middleware
//!
//! JWT authentication middleware for protecting API endpoints.

use ::auth::{extract_bearer_token, validate_token};
use axum::{
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use entity::sea_orm_active_enums::UserRole;
use error::ErrorResponse;
use uuid::Uuid;

use crate::AppState;

/// User information extracted from JWT token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// User ID
    pub id:       Uuid,
    /// Login name at the time the token was issued
    pub username: String,
    /// Display name at the time the token was issued
    pub name:     String,
    /// Account role
    pub role:     UserRole,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool { self.role == UserRole::Admin }
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the JWT token
/// 3. Adds authenticated user info to request extensions
/// 4. Rejects requests with invalid/missing tokens before any handler runs
pub async fn auth_middleware(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let auth_header = match request.headers().get(header::AUTHORIZATION) {
        Some(value) => {
            match value.to_str() {
                Ok(h) => h,
                Err(_) => return create_auth_error_response("Invalid authorization header encoding"),
            }
        },
        None => return create_auth_error_response("Missing authorization header"),
    };

    let Some(token) = extract_bearer_token(auth_header)
    else {
        return create_auth_error_response("Invalid authorization header format");
    };

    let claims = match validate_token(&state.jwt_config, token) {
        Ok(claims) => claims,
        Err(e) => {
            let error_msg = e.to_string().to_lowercase();
            tracing::debug!(error = %e, "Rejected bearer token");
            if error_msg.contains("expired") {
                return create_auth_error_response("Token has expired");
            }
            else {
                return create_auth_error_response("Invalid token");
            }
        },
    };

    let (Ok(id), Some(role)) = (Uuid::parse_str(&claims.sub), UserRole::parse(&claims.role))
    else {
        return create_auth_error_response("Invalid token");
    };

    request.extensions_mut().insert(AuthenticatedUser {
        id,
        username: claims.username,
        name: claims.name,
        role,
    });

    next.run(request).await
}

/// Create standardized authentication error response
fn create_auth_error_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Bearer")],
        axum::Json(ErrorResponse::new("UNAUTHORIZED", message)),
    )
        .into_response()
}

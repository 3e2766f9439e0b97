//! # Permission Middleware
//!
//! Role gate for administrator-only endpoints. Runs after
//! [`auth_middleware`](super::auth::auth_middleware) and decides from the
//! token's role alone, so non-admin callers never reach the database.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use error::AppError;

use crate::middleware::auth::AuthenticatedUser;

/// Check that a user holds the admin role
///
/// # Errors
///
/// Returns a forbidden error for any other role.
pub fn require_admin(user: &AuthenticatedUser) -> Result<(), AppError> {
    if user.is_admin() {
        Ok(())
    }
    else {
        tracing::warn!(user_id = %user.id, role = %user.role, "Admin role required");
        Err(AppError::forbidden("Admin role required"))
    }
}

/// Admin-only middleware layer
pub async fn admin_middleware(request: Request, next: Next) -> Response {
    let Some(user) = request.extensions().get::<AuthenticatedUser>()
    else {
        return AppError::unauthorized("Authentication required").into_response();
    };

    match require_admin(user) {
        Ok(()) => next.run(request).await,
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use entity::sea_orm_active_enums::UserRole;
    use uuid::Uuid;

    use super::*;

    fn user(role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser {
            id: Uuid::new_v4(),
            username: "amy".to_string(),
            name: "Amy".to_string(),
            role,
        }
    }

    #[test]
    fn test_require_admin() {
        assert!(require_admin(&user(UserRole::Admin)).is_ok());
        assert_eq!(
            require_admin(&user(UserRole::Member)).unwrap_err().code(),
            "FORBIDDEN"
        );
        assert_eq!(
            require_admin(&user(UserRole::Coach)).unwrap_err().code(),
            "FORBIDDEN"
        );
    }
}

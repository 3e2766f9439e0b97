//! # Logging Macros
//!
//! Structured logging shorthands used by the HTTP layer.

/// Log a completed API request with method, path, status and duration.
#[macro_export]
macro_rules! log_api_request {
    ($method:expr, $path:expr, $status:expr, $duration:expr) => {
        tracing::info!(
            target: "api",
            method = %$method,
            path = %$path,
            status = %$status,
            duration_ms = %$duration,
            "API request"
        )
    };
}

/// Log an authentication event for a username.
#[macro_export]
macro_rules! log_auth_event {
    ($event:expr, $username:expr, $success:expr) => {
        tracing::info!(
            target: "auth",
            event = %$event,
            username = %$username,
            success = $success,
            "Authentication event"
        )
    };
}

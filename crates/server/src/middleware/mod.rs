//! # HTTP Middleware
//!
//! Custom middleware for request processing.

pub mod auth;
pub mod permissions;
pub mod request_id;
pub mod security_headers;

//! # Data Transfer Objects Module
//!
//! Request and response types for API endpoints. Bodies use camelCase.

pub mod auth;
pub mod logs;
pub mod tasks;
pub mod trends;
pub mod users;
pub mod water;

use serde::Serialize;

/// Generic success response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuccessResponse {
    /// Indicates operation success
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl SuccessResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

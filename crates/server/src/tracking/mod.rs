//! # Tracking Module
//!
//! Per-user hydration, daily tasks and health logs. Every query is scoped
//! to the authenticated user.

pub mod logs;
pub mod tasks;
pub mod water;

//! # Trends Module
//!
//! Chart series over a resolved date range. All endpoints share
//! [`range::resolve`] and the helpers in [`aggregate`].

pub mod aggregate;
pub mod handlers;
pub mod range;

pub use range::{DateRange, LabelFormat, RangeKeyword, TrendRangeRequest, resolve};

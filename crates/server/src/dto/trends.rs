//! # Trend Data Transfer Objects

use serde::Serialize;

/// Chart series wrapper
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendResponse<T> {
    pub data: Vec<T>,
}

/// Millilitres drunk per label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HydrationPoint {
    pub date:   String,
    pub amount: i64,
}

/// Mean weight per label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightPoint {
    pub date:   String,
    pub weight: f64,
}

/// Sessions per activity bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityPoint {
    pub name:  String,
    pub value: u64,
    pub fill:  String,
}

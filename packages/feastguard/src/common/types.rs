//! Shared value types used across domains.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A (latitude, longitude) pair in degrees. Serialized as `[lat, lon]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint(pub f64, pub f64);

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self(lat, lon)
    }

    pub fn lat(&self) -> f64 {
        self.0
    }

    pub fn lon(&self) -> f64 {
        self.1
    }
}

/// Perishability class of predicted surplus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodCategory {
    None,
    NonPerishable,
    Perishable,
}

impl FoodCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodCategory::None => "none",
            FoodCategory::NonPerishable => "non_perishable",
            FoodCategory::Perishable => "perishable",
        }
    }

    pub fn is_perishable(&self) -> bool {
        matches!(self, FoodCategory::Perishable)
    }

    pub fn is_surplus(&self) -> bool {
        !matches!(self, FoodCategory::None)
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How quickly surplus must be picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Round to two decimal places, the precision of every reported figure.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

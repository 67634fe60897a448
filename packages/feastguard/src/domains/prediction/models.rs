use serde::{Deserialize, Serialize};

use crate::common::{FoodCategory, Urgency};

/// Surplus forecast for one event. Created exactly once per processed event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub event_id: String,
    pub event_name: String,
    pub has_surplus: bool,
    pub predicted_kg: f64,
    pub category: FoodCategory,
    pub urgency: Urgency,
    pub surplus_score: f64,
    /// In [0, 1]
    pub confidence: f64,
    pub reasoning: String,
}

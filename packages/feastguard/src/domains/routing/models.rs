use serde::{Deserialize, Serialize};

use crate::common::{FoodCategory, GeoPoint, Urgency};
use crate::domains::prediction::Prediction;

/// Recipient name recorded on a null-match route.
pub const NO_MATCH: &str = "NO MATCH";

/// Runner-up recipient considered for a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub recipient_id: String,
    pub name: String,
    pub distance_km: f64,
    pub cost_score: f64,
}

/// Assignment of one event's surplus to a recipient.
///
/// A null match (`recipient_id == None`) records why no recipient could be
/// chosen. Null matches have no alternatives and no cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub event_id: String,
    pub event_name: String,
    pub event_location: Option<GeoPoint>,
    pub recipient_id: Option<String>,
    pub recipient_name: String,
    pub recipient_location: Option<GeoPoint>,
    pub distance_km: f64,
    pub volume_kg: f64,
    pub food_category: FoodCategory,
    pub urgency: Urgency,
    pub cost_score: Option<f64>,
    pub reasoning: String,
    pub alternatives: Vec<Alternative>,
}

impl Route {
    pub fn no_match(
        prediction: &Prediction,
        event_location: Option<GeoPoint>,
        reason: &str,
    ) -> Self {
        Self {
            event_id: prediction.event_id.clone(),
            event_name: prediction.event_name.clone(),
            event_location,
            recipient_id: None,
            recipient_name: NO_MATCH.to_string(),
            recipient_location: None,
            distance_km: 0.0,
            volume_kg: prediction.predicted_kg,
            food_category: prediction.category,
            urgency: prediction.urgency,
            cost_score: None,
            reasoning: format!("Unable to route: {}", reason),
            alternatives: Vec::new(),
        }
    }

    pub fn is_match(&self) -> bool {
        self.recipient_id.is_some()
    }
}

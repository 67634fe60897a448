use serde::{Deserialize, Serialize};

use crate::common::{FoodCategory, Urgency};

/// Coordination message drafted for a matched recipient.
///
/// At most one per event, and only for routes with a recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutreachMessage {
    pub recipient_id: String,
    pub recipient_name: String,
    pub event_id: String,
    pub event_name: String,
    pub message_content: String,
    pub urgency_level: Urgency,
    pub volume_kg: f64,
    pub food_category: FoodCategory,
    pub distance_km: f64,
    pub pickup_window: String,
    pub strategy_reasoning: String,
    pub estimated_send_time: String,
}

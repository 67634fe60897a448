use serde::{Deserialize, Serialize};

use crate::common::lenient::{lenient_f64, lenient_u32};
use crate::common::GeoPoint;

/// An upcoming catered event, as supplied by the caller.
///
/// Only `id` and `name` are required. Every other field may be missing, and
/// a numeric field holding an unusable value reads as missing. The
/// `*_or_default` accessors supply the documented safe defaults and the
/// prediction step records each substitution in the trace log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "event_id")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub attendees: Option<u32>,
    pub catering_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub duration_hours: Option<f64>,
    pub weather: Option<String>,
    #[serde(default)]
    pub food_type: Vec<String>,
    pub location: Option<GeoPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Event {
    /// Missing attendee count counts as nobody.
    pub fn attendees_or_default(&self) -> u32 {
        self.attendees.unwrap_or(0)
    }

    /// Missing or negative duration counts as zero hours.
    pub fn duration_or_default(&self) -> f64 {
        self.duration_hours.filter(|h| h.is_finite() && *h >= 0.0).unwrap_or(0.0)
    }

    pub fn catering_type_or_default(&self) -> &str {
        self.catering_type.as_deref().unwrap_or("plated")
    }

    pub fn weather_or_default(&self) -> &str {
        self.weather.as_deref().unwrap_or("mild")
    }

    /// Names of fields that fall back to a default, in a stable order.
    pub fn defaulted_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.attendees.is_none() {
            fields.push("attendees");
        }
        if self.catering_type.is_none() {
            fields.push("catering_type");
        }
        if self.duration_hours.map_or(true, |h| !h.is_finite() || h < 0.0) {
            fields.push("duration_hours");
        }
        if self.weather.is_none() {
            fields.push("weather");
        }
        if self.location.is_none() {
            fields.push("location");
        }
        fields
    }
}

//! Test fixtures for events and recipients.
//!
//! Scores noted on each event follow the surplus formula with mild weather
//! unless stated otherwise.

#![allow(dead_code)]

use feastguard_core::common::GeoPoint;
use feastguard_core::domains::intake::{Event, Recipient};

pub const DOWNTOWN: (f64, f64) = (39.7392, -104.9903);

pub fn event(
    id: &str,
    attendees: u32,
    catering: &str,
    hours: f64,
    weather: &str,
) -> Event {
    Event {
        id: id.to_string(),
        name: format!("Event {}", id),
        attendees: Some(attendees),
        catering_type: Some(catering.to_string()),
        duration_hours: Some(hours),
        weather: Some(weather.to_string()),
        food_type: vec!["sandwiches".to_string()],
        location: Some(GeoPoint::new(DOWNTOWN.0, DOWNTOWN.1)),
        date: Some("2026-11-02".to_string()),
        status: Some("confirmed".to_string()),
    }
}

/// Score 0.94: 470kg perishable, high urgency
pub fn buffet_event(id: &str) -> Event {
    event(id, 1000, "buffet", 6.0, "mild")
}

/// Score 0.41: 61.5kg non-perishable, medium urgency
pub fn plated_event(id: &str) -> Event {
    event(id, 300, "plated", 3.0, "mild")
}

/// Score 0.256 (cold): no surplus
pub fn quiet_event(id: &str) -> Event {
    event(id, 20, "plated", 1.0, "cold")
}

pub fn recipient(id: &str, lat_offset: f64, capacity: f64, load: f64) -> Recipient {
    Recipient {
        id: id.to_string(),
        name: format!("Recipient {}", id),
        location: Some(GeoPoint::new(DOWNTOWN.0 + lat_offset, DOWNTOWN.1)),
        capacity_kg: capacity,
        current_load_kg: load,
        accepts_perishable: true,
        accepts_non_perishable: true,
        operating_hours: Some("9am-5pm".to_string()),
        contact_available: Some(true),
    }
}

/// Large food bank a few km away that takes everything
pub fn food_bank() -> Recipient {
    recipient("R01", 0.03, 2000.0, 200.0)
}

/// Pantry that only takes shelf-stable food
pub fn dry_goods_pantry() -> Recipient {
    Recipient {
        accepts_perishable: false,
        ..recipient("R02", 0.01, 500.0, 0.0)
    }
}

//! Pure surplus scoring functions
//!
//! No side effects. The score is a weighted sum of attendance, duration,
//! catering style and weather, clamped to [0, 1].

use crate::common::{round2, FoodCategory, Urgency};
use crate::domains::intake::Event;

pub const ATTENDEES_WEIGHT: f64 = 0.3;
pub const DURATION_WEIGHT: f64 = 0.2;
pub const CATERING_WEIGHT: f64 = 0.4;
pub const WEATHER_WEIGHT: f64 = 0.1;

/// Score bands: [0, 0.3) none, [0.3, 0.6) non-perishable, [0.6, 1.0] perishable.
pub const NON_PERISHABLE_THRESHOLD: f64 = 0.3;
pub const PERISHABLE_THRESHOLD: f64 = 0.6;

/// Kilograms of food served per attendee at full catering.
pub const KG_PER_ATTENDEE: f64 = 0.5;

/// Unknown catering styles score like plated service.
pub fn catering_factor(catering_type: &str) -> f64 {
    match catering_type {
        "buffet" => 1.0,
        "plated" => 0.5,
        "snacks" => 0.2,
        "family_style" => 0.8,
        "cocktail" => 0.3,
        _ => 0.5,
    }
}

/// Subtracted from the score; cold and rain lower attendance, so they
/// increase the expected surplus.
pub fn weather_factor(weather: &str) -> f64 {
    match weather {
        "hot" => 0.1,
        "cold" => -0.1,
        "rainy" => -0.2,
        _ => 0.0,
    }
}

/// Surplus likelihood in [0, 1].
pub fn calculate_surplus_score(event: &Event) -> f64 {
    let attendees_score = ATTENDEES_WEIGHT * (event.attendees_or_default() as f64 / 1000.0);
    let duration_score = DURATION_WEIGHT * (event.duration_or_default() / 5.0);
    let catering_score = CATERING_WEIGHT * catering_factor(event.catering_type_or_default());
    let weather_score = WEATHER_WEIGHT * weather_factor(event.weather_or_default());

    let score = attendees_score + duration_score + catering_score - weather_score;
    score.clamp(0.0, 1.0)
}

/// Volume, category and urgency derived from a surplus score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurplusEstimate {
    pub predicted_kg: f64,
    pub category: FoodCategory,
    pub urgency: Urgency,
}

pub fn categorize(score: f64) -> FoodCategory {
    if score >= PERISHABLE_THRESHOLD {
        FoodCategory::Perishable
    } else if score >= NON_PERISHABLE_THRESHOLD {
        FoodCategory::NonPerishable
    } else {
        FoodCategory::None
    }
}

pub fn urgency_for(category: FoodCategory) -> Urgency {
    match category {
        FoodCategory::Perishable => Urgency::High,
        FoodCategory::NonPerishable => Urgency::Medium,
        FoodCategory::None => Urgency::Low,
    }
}

pub fn estimate_food_volume(event: &Event, surplus_score: f64) -> SurplusEstimate {
    let category = categorize(surplus_score);
    let served_kg = event.attendees_or_default() as f64 * KG_PER_ATTENDEE;
    SurplusEstimate {
        predicted_kg: round2(served_kg * surplus_score),
        category,
        urgency: urgency_for(category),
    }
}

/// Confidence is higher the further the score sits from the band edges,
/// with a boost for large buffets.
pub fn assess_confidence(event: &Event, surplus_score: f64) -> f64 {
    let mut confidence: f64 = if surplus_score < NON_PERISHABLE_THRESHOLD {
        0.6
    } else if surplus_score < PERISHABLE_THRESHOLD {
        0.7
    } else {
        0.85
    };

    if event.catering_type.as_deref() == Some("buffet") && event.attendees_or_default() > 500 {
        confidence = (confidence + 0.1).min(0.95);
    }

    round2(confidence)
}

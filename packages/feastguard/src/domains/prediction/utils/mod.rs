pub mod surplus;

pub use surplus::{
    assess_confidence, calculate_surplus_score, categorize, estimate_food_volume, urgency_for,
    SurplusEstimate,
};

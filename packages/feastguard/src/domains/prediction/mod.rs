//! Prediction domain - surplus forecasting per event.

pub mod activities;
pub mod models;
pub mod utils;

pub use activities::predict_step;
pub use models::Prediction;

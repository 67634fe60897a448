pub mod activities;
pub mod models;
pub mod utils;

pub use activities::*;
pub use models::OutreachMessage;

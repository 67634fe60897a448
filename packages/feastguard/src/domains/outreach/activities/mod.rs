pub mod message;

pub use message::{draft_message, message_step, Draft};

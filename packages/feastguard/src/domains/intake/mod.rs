//! Intake domain - the immutable input records of a run.
//!
//! Events and recipients arrive already parsed; nothing here performs I/O.

pub mod models;
pub mod utils;

pub use models::{Event, Recipient};

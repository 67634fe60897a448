pub mod lenient;
pub mod types;

pub use types::*;

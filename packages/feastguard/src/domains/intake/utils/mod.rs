pub mod loader;
pub mod selection;

pub use loader::{parse_records, ParsedRecords, SkippedRecord};
pub use selection::{interest_score, select_top_events};

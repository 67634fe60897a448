//! Lenient JSON record parsing.
//!
//! Input files are JSON arrays. A record that fails to deserialize (missing
//! id or name, unusable location) is set aside with its error instead of
//! failing the whole file.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// A record that could not be parsed, by array position.
#[derive(Debug, Clone)]
pub struct SkippedRecord {
    pub index: usize,
    pub error: String,
}

#[derive(Debug, Clone)]
pub struct ParsedRecords<T> {
    pub records: Vec<T>,
    pub skipped: Vec<SkippedRecord>,
}

pub fn parse_records<T: DeserializeOwned>(json: &str) -> Result<ParsedRecords<T>> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(json).context("Input must be a JSON array of records")?;

    let mut parsed = ParsedRecords {
        records: Vec::with_capacity(values.len()),
        skipped: Vec::new(),
    };

    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<T>(value) {
            Ok(record) => parsed.records.push(record),
            Err(e) => parsed.skipped.push(SkippedRecord {
                index,
                error: e.to_string(),
            }),
        }
    }

    Ok(parsed)
}

//! Field deserializers that read an unusable value as missing.
//!
//! A wrongly typed optional field should fall back to its default, not cost
//! the whole record. Numeric strings are accepted.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Non-negative whole number, or `None`.
pub fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number(&value).filter(|n| is_u32(*n)).map(|n| n as u32))
}

/// Finite number, or `None`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number(&value))
}

/// Finite number, or zero.
pub fn lenient_f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_f64(deserializer)?.unwrap_or(0.0))
}

fn is_u32(n: f64) -> bool {
    n.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&n)
}

fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "lenient_u32")]
        count: Option<u32>,
        #[serde(default, deserialize_with = "lenient_f64")]
        hours: Option<f64>,
    }

    fn sample(value: Value) -> Sample {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_numbers_and_numeric_strings() {
        let s = sample(json!({ "count": 850, "hours": "4.5" }));
        assert_eq!(s.count, Some(850));
        assert_eq!(s.hours, Some(4.5));

        assert_eq!(sample(json!({ "count": " 120 " })).count, Some(120));
    }

    #[test]
    fn test_unusable_values_read_as_missing() {
        for bad in [json!(850.5), json!(-3), json!("many"), json!(true), json!([1])] {
            assert_eq!(sample(json!({ "count": bad })).count, None);
        }
        assert_eq!(sample(json!({ "hours": {"h": 4} })).hours, None);
        assert_eq!(sample(json!({ "hours": null })).hours, None);
    }

    #[test]
    fn test_absent_fields_are_none() {
        let s = sample(json!({}));
        assert_eq!(s.count, None);
        assert_eq!(s.hours, None);
    }
}

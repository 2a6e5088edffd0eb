//! Lenient deserializers for the gateway's stringly-typed JSON.
//!
//! The TempStick API encodes numeric fields as numbers or strings depending
//! on the field and firmware revision, uses the empty string for unset
//! values, and reports the offline flag as `"0"`/`"1"`. These helpers
//! normalize all of that so downstream code only sees `Option<f64>` and
//! `bool`. Anything unparsable collapses to "absent" rather than failing the
//! whole record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a number that may arrive as a number, a numeric string, an
/// empty string, or null.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_f64))
}

/// Deserialize the gateway's offline flag: bool, number, or `"0"`/`"1"`
/// style string. Missing or unrecognized values read as `false`.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().is_some_and(value_to_bool))
}

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
            }
        }
        _ => None,
    }
}

fn value_to_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes"
        ),
        _ => false,
    }
}

//! Lenient field readers for JSON produced by language models and browser forms.
//!
//! A field that has the wrong JSON type degrades to `None` instead of failing
//! the whole document.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// `Some(value)` only for finite floats.
pub fn sanitize_number(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Accept a JSON number; anything else (strings included) becomes `None`.
pub fn number_from_value(value: &Value) -> Option<f64> {
    value.as_f64().and_then(sanitize_number)
}

/// Accept a JSON number or a string that parses as one. Form inputs send strings.
pub fn number_or_numeric_string(value: &Value) -> Option<f64> {
    match value {
        Value::Number(_) => number_from_value(value),
        Value::String(s) => s.trim().parse::<f64>().ok().and_then(sanitize_number),
        _ => None,
    }
}

/// Non-empty trimmed text from a string, or the printed form of a number.
pub fn text_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Value of the first key in `keys` that is present and not `null`.
///
/// Lists the canonical key first, then its aliases. An object may carry both.
pub fn first_present<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| !value.is_null())
}

/// serde `deserialize_with` adapter for [`number_from_value`].
pub fn finite_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

/// serde `deserialize_with` adapter for [`text_from_value`].
pub fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(text_from_value))
}

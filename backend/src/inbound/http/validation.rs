//! Coercion of loosely typed JSON values into profile draft inputs.
//!
//! Browser forms send numbers as strings and single hobbies as a bare
//! string. These helpers accept those shapes and reject anything that cannot
//! be read as the intended type.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::{FieldInput, ProfileValidationError};

/// Deserialize a field so that an explicit `null` is distinguishable from an
/// absent key: absent keys fall back to `None` through `#[serde(default)]`,
/// while `null` becomes `Some(Value::Null)`.
pub(crate) fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

pub(crate) fn text_input(
    field: &'static str,
    value: Option<Value>,
) -> Result<FieldInput<String>, ProfileValidationError> {
    match value {
        None => Ok(FieldInput::Absent),
        Some(Value::Null) => Ok(FieldInput::Null),
        Some(Value::String(text)) => Ok(FieldInput::Value(text)),
        Some(scalar @ (Value::Number(_) | Value::Bool(_))) => {
            Ok(FieldInput::Value(scalar.to_string()))
        }
        Some(Value::Array(_) | Value::Object(_)) => {
            Err(ProfileValidationError::InvalidText { field })
        }
    }
}

fn whole_number(value: f64) -> Option<i64> {
    let in_range = value >= i64::MIN as f64 && value <= i64::MAX as f64;
    (value.is_finite() && value.fract() == 0.0 && in_range).then_some(value as i64)
}

fn parse_age_text(text: &str) -> Result<i64, ProfileValidationError> {
    let trimmed = text.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().and_then(whole_number))
        .ok_or(ProfileValidationError::InvalidAge)
}

pub(crate) fn age_input(value: Option<Value>) -> Result<FieldInput<i64>, ProfileValidationError> {
    match value {
        None => Ok(FieldInput::Absent),
        Some(Value::Null) => Ok(FieldInput::Null),
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(whole_number))
            .map(FieldInput::Value)
            .ok_or(ProfileValidationError::InvalidAge),
        Some(Value::String(text)) if text.trim().is_empty() => Ok(FieldInput::Null),
        Some(Value::String(text)) => parse_age_text(&text).map(FieldInput::Value),
        Some(_) => Err(ProfileValidationError::InvalidAge),
    }
}

pub(crate) fn hobbies_input(
    value: Option<Value>,
) -> Result<FieldInput<Vec<String>>, ProfileValidationError> {
    const FIELD: &str = "hobbies";
    match value {
        None => Ok(FieldInput::Absent),
        Some(Value::Null) => Ok(FieldInput::Null),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match text_input(FIELD, Some(item))? {
                FieldInput::Value(text) => Ok(text),
                FieldInput::Absent | FieldInput::Null => Ok(String::new()),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(FieldInput::Value),
        Some(single) => match text_input(FIELD, Some(single))? {
            FieldInput::Value(text) => Ok(FieldInput::Value(vec![text])),
            FieldInput::Absent | FieldInput::Null => Ok(FieldInput::Null),
        },
    }
}

//! Total coercion of raw, possibly malformed records into an [`Entry`].
//!
//! Nothing here fails: a value that cannot be read as the field expects
//! resolves to the field's default.

use crate::models::Entry;
use crate::schema::{FieldKind, MetricField};
use chrono::NaiveDate;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

fn date_key_re() -> &'static Regex {
    static DATE_KEY_RE: OnceLock<Regex> = OnceLock::new();
    // ASCII digits only; `\d` would also accept other Unicode digits.
    DATE_KEY_RE.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date key regex"))
}

/// Digit-pattern check only. Calendar validity is not required of keys.
pub fn is_valid_date_key(key: &str) -> bool {
    date_key_re().is_match(key)
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn normalize(raw: &Value) -> Entry {
    let empty = Map::new();
    let fields = raw.as_object().unwrap_or(&empty);

    let mut entry = Entry::default();
    for field in MetricField::ALL {
        *entry.slot_mut(field) = normalize_field(field, fields.get(field.name()));
    }
    entry.date = metadata(fields.get("date"));
    entry.updated_at = metadata(fields.get("updated_at"));
    entry
}

pub fn normalize_field(field: MetricField, value: Option<&Value>) -> i32 {
    match field.kind() {
        FieldKind::Integer { min, max } => clamp_number(value, min, max, field.default_value()),
        FieldKind::Binary => to_binary(value),
    }
}

// `null`, booleans and empty strings count as missing and take the field
// default; they are not read as 0 or 1.
fn coerce_number(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn clamp_number(value: Option<&Value>, min: i32, max: i32, fallback: i32) -> i32 {
    match coerce_number(value) {
        // Half-up: 4.5 -> 5, -2.5 -> -2.
        Some(number) => (number + 0.5).floor().clamp(f64::from(min), f64::from(max)) as i32,
        None => fallback,
    }
}

fn to_binary(value: Option<&Value>) -> i32 {
    let set = match value {
        Some(Value::Number(number)) => number.as_f64() == Some(1.0),
        Some(Value::String(text)) => text == "1",
        Some(Value::Bool(flag)) => *flag,
        _ => false,
    };
    i32::from(set)
}

// Metadata is kept only as non-empty text.
fn metadata(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(text)) if !text.is_empty() => Some(text.clone()),
        _ => None,
    }
}

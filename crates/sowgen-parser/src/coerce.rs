//! Lenient scalar coercion
//!
//! Models routinely emit numerics as strings ("4.5") and vice versa. The
//! schema admits both; these helpers fold them into the typed form.

use serde_json::Value;

/// Coerce a JSON number or numeric string into f64
#[must_use]
pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Coerce into u8 (stage numbers); rejects negatives and fractions
#[must_use]
pub fn as_u8(value: &Value) -> Option<u8> {
    let f = as_f64(value)?;
    if f.fract() != 0.0 || !(0.0..=255.0).contains(&f) {
        return None;
    }
    Some(f as u8)
}

/// Coerce into u32 (phase sequence numbers)
#[must_use]
pub fn as_u32(value: &Value) -> Option<u32> {
    let f = as_f64(value)?;
    if f.fract() != 0.0 || !(0.0..=u32::MAX as f64).contains(&f) {
        return None;
    }
    Some(f as u32)
}

/// Coerce into an owned string; numbers render via display
#[must_use]
pub fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Collect an array of coercible strings; non-arrays yield empty
#[must_use]
pub fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(as_string).collect())
        .unwrap_or_default()
}

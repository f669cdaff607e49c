// File: crates/propmap-core/src/value.rs
// Summary: Lenient coercion of GeoJSON property values into numbers and display text.

use serde_json::Value;

/// Numeric reading of a property: JSON numbers and numeric strings.
/// Anything else (including NaN/inf after parsing) reads as missing.
pub fn numeric_value(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() { return None; }
            s.parse::<f64>().ok()?
        }
        _ => return None,
    };
    v.is_finite().then_some(v)
}

/// Raw text for popups and labels. `null` and nested values degrade to an empty string.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() { return i.to_string(); }
            if let Some(u) = n.as_u64() { return u.to_string(); }
            let f = n.as_f64().unwrap_or(f64::NAN);
            if f.fract() == 0.0 && f.abs() < 1e15 { format!("{}", f as i64) } else { f.to_string() }
        }
        Value::Bool(b) => b.to_string(),
        // null shows as a blank, not the literal "null"
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

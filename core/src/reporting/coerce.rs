//! Loose value conversions shared by the validator and the importer.
//!
//! The feed tolerates sloppy hand edits: apart from the enum fields, values
//! are converted to strings rather than rejected. The rules follow the
//! string conversion the site's scripts have always applied, so a value
//! renders the same whichever side wrote it.

use serde_json::{Number, Value};

/// Renders any JSON value as display text.
///
/// Integral numbers drop their fraction, arrays join their elements with
/// `,` (nulls become empty), objects collapse to `[object Object]`.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_string(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|v| match v {
                Value::Null => String::new(),
                other => display_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn number_string(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// String conversion where only an absent or `null` value falls back.
pub fn string_or(value: Option<&Value>, default: &str) -> String {
    match value {
        None | Some(Value::Null) => default.to_string(),
        Some(v) => display_string(v),
    }
}

/// Whether a value counts as set for fallback chains.
///
/// `null`, `false`, `0` and `""` are unset; arrays and objects are always set.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// The display string of `value` when it is set, `None` otherwise.
pub fn truthy_string(value: Option<&Value>) -> Option<String> {
    value.filter(|v| is_truthy(v)).map(display_string)
}

/// Element-wise string conversion of an array; anything else is empty.
pub fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().map(display_string).collect(),
        _ => Vec::new(),
    }
}

/// Feed `version`: integral numbers or numeric strings, else `1`.
pub fn version_number(value: Option<&Value>) -> u32 {
    const DEFAULT_VERSION: u32 = 1;
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                    .map(|f| f as u64)
            })
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(DEFAULT_VERSION),
        Some(Value::String(s)) => s.trim().parse::<u32>().unwrap_or(DEFAULT_VERSION),
        _ => DEFAULT_VERSION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_string_matches_script_conversion() {
        assert_eq!(display_string(&json!("abc")), "abc");
        assert_eq!(display_string(&json!(42)), "42");
        assert_eq!(display_string(&json!(2.0)), "2");
        assert_eq!(display_string(&json!(1.5)), "1.5");
        assert_eq!(display_string(&json!(true)), "true");
        assert_eq!(display_string(&json!(["a", null, 3])), "a,,3");
        assert_eq!(display_string(&json!({"k": "v"})), "[object Object]");
    }

    #[test]
    fn string_or_only_defaults_on_absent_or_null() {
        assert_eq!(string_or(None, "update"), "update");
        assert_eq!(string_or(Some(&Value::Null), "update"), "update");
        assert_eq!(string_or(Some(&json!("")), "update"), "");
        assert_eq!(string_or(Some(&json!(false)), "update"), "false");
    }

    #[test]
    fn truthy_string_skips_unset_values() {
        assert_eq!(truthy_string(Some(&json!(""))), None);
        assert_eq!(truthy_string(Some(&json!(0))), None);
        assert_eq!(truthy_string(Some(&json!(false))), None);
        assert_eq!(truthy_string(None), None);
        assert_eq!(truthy_string(Some(&json!("x"))), Some("x".to_string()));
        assert_eq!(truthy_string(Some(&json!(7))), Some("7".to_string()));
    }

    #[test]
    fn version_number_falls_back_to_one() {
        assert_eq!(version_number(Some(&json!(3))), 3);
        assert_eq!(version_number(Some(&json!("4"))), 4);
        assert_eq!(version_number(Some(&json!("four"))), 1);
        assert_eq!(version_number(Some(&json!(2.5))), 1);
        assert_eq!(version_number(None), 1);
    }
}

/*!
 * Serde utilities for loosely-typed batch data.
 *
 * Stage lists and progress maps reach us from storage in whatever shape the
 * dashboard happened to save them: numbers, numeric strings, JSON documents
 * serialized into TEXT columns. These helpers coerce those values without
 * ever failing, so a malformed field degrades to zero instead of aborting a
 * rendering pass.
 */

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Timestamp layouts written without an offset; read as UTC
const NAIVE_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Coerce a JSON value into an integer, falling back to `0`.
///
/// Handles:
/// - Integer numbers
/// - Floating-point numbers (truncated toward zero)
/// - String representations of numbers, with surrounding whitespace
/// - Anything else (null, bool, arrays, objects, non-numeric strings) as `0`
///
/// ```rust
/// use serde_json::json;
/// use uniform_production::utils::serde::lenient_i64;
///
/// assert_eq!(lenient_i64(&json!(42)), 42);
/// assert_eq!(lenient_i64(&json!("17")), 17);
/// assert_eq!(lenient_i64(&json!(9.8)), 9);
/// assert_eq!(lenient_i64(&json!("lots")), 0);
/// ```
pub fn lenient_i64(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => parse_numeric_str(s).unwrap_or(0),
        _ => 0,
    }
}

fn parse_numeric_str(s: &str) -> Option<i64> {
    let trimmed = s.trim();
    trimmed.parse::<i64>().ok().or_else(|| {
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f as i64)
    })
}

/// Accept JSON that may itself be wrapped in a string.
///
/// TEXT columns written by older dashboard versions hold the JSON document as
/// a string, sometimes double-encoded. Unwraps one level of string encoding
/// when the content parses as JSON; otherwise returns the value unchanged.
pub fn unwrap_json_string(value: Value) -> Value {
    match value {
        Value::String(s) => match serde_json::from_str::<Value>(&s) {
            Ok(inner) => inner,
            Err(_) => Value::String(s),
        },
        other => other,
    }
}

/// Parse a raw TEXT column that should contain JSON; `None` and blank text become `Null`.
pub fn parse_json_text(raw: Option<&str>) -> Value {
    match raw.map(str::trim) {
        None | Some("") => Value::Null,
        Some(text) => serde_json::from_str::<Value>(text)
            .map(unwrap_json_string)
            .unwrap_or(Value::Null),
    }
}

/// Deserialize an integer field that may be a number, a numeric string, or missing.
///
/// ```rust
/// use serde::Deserialize;
/// use uniform_production::utils::serde::deserialize_lenient_i64;
///
/// #[derive(Deserialize)]
/// struct Row {
///     #[serde(default, deserialize_with = "deserialize_lenient_i64")]
///     daily_target: i64,
/// }
///
/// let row: Row = serde_json::from_str(r#"{"daily_target": "25"}"#).unwrap();
/// assert_eq!(row.daily_target, 25);
/// ```
pub fn deserialize_lenient_i64<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(value.as_ref().map(lenient_i64).unwrap_or(0))
}

/// Coerce a JSON value into text, `None` for anything that is not a string or number.
///
/// ```rust
/// use serde_json::json;
/// use uniform_production::utils::serde::lenient_string;
///
/// assert_eq!(lenient_string(&json!("Blazers")), Some("Blazers".to_string()));
/// assert_eq!(lenient_string(&json!(2024)), Some("2024".to_string()));
/// assert_eq!(lenient_string(&json!(false)), None);
/// ```
pub fn lenient_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse a timestamp from RFC 3339 or an offset-less `YYYY-MM-DD HH:MM:SS`
/// (read as UTC). Anything else yields `None`.
pub fn lenient_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let Value::String(raw) = value else {
        return None;
    };
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize, Debug, PartialEq)]
    struct TestStruct {
        #[serde(default, deserialize_with = "deserialize_lenient_i64")]
        value: i64,
    }

    #[test]
    fn test_lenient_string() {
        assert_eq!(lenient_string(&json!("Skirts")), Some("Skirts".to_string()));
        assert_eq!(lenient_string(&json!(7)), Some("7".to_string()));
        assert_eq!(lenient_string(&json!(null)), None);
        assert_eq!(lenient_string(&json!(["a"])), None);
    }

    #[test]
    fn test_lenient_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        assert_eq!(lenient_timestamp(&json!("2024-06-01 09:00:00")), Some(expected));
        assert_eq!(lenient_timestamp(&json!("2024-06-01T09:00:00Z")), Some(expected));
        assert_eq!(lenient_timestamp(&json!("2024-06-01T11:00:00+02:00")), Some(expected));
        assert_eq!(lenient_timestamp(&json!("2024-06-01T09:00:00.000")), Some(expected));
    }

    #[test]
    fn test_lenient_timestamp_garbage_is_none() {
        assert_eq!(lenient_timestamp(&json!("yesterday")), None);
        assert_eq!(lenient_timestamp(&json!(1717232400)), None);
        assert_eq!(lenient_timestamp(&json!(null)), None);
    }

    #[test]
    fn test_lenient_i64_integer() {
        assert_eq!(lenient_i64(&json!(42)), 42);
        assert_eq!(lenient_i64(&json!(-3)), -3);
    }

    #[test]
    fn test_lenient_i64_string() {
        assert_eq!(lenient_i64(&json!("123")), 123);
        assert_eq!(lenient_i64(&json!(" 8 ")), 8);
        assert_eq!(lenient_i64(&json!("12.9")), 12);
    }

    #[test]
    fn test_lenient_i64_garbage_is_zero() {
        assert_eq!(lenient_i64(&json!(null)), 0);
        assert_eq!(lenient_i64(&json!(true)), 0);
        assert_eq!(lenient_i64(&json!("not-a-number")), 0);
        assert_eq!(lenient_i64(&json!([1, 2])), 0);
        assert_eq!(lenient_i64(&json!({"n": 1})), 0);
    }

    #[test]
    fn test_unwrap_json_string() {
        let wrapped = json!("[{\"id\":\"S1\",\"target\":5}]");
        assert_eq!(
            unwrap_json_string(wrapped),
            json!([{"id": "S1", "target": 5}])
        );
        assert_eq!(unwrap_json_string(json!("plain")), json!("plain"));
        assert_eq!(unwrap_json_string(json!({"a": 1})), json!({"a": 1}));
    }

    #[test]
    fn test_parse_json_text() {
        assert_eq!(parse_json_text(None), Value::Null);
        assert_eq!(parse_json_text(Some("   ")), Value::Null);
        assert_eq!(parse_json_text(Some("{broken")), Value::Null);
        assert_eq!(parse_json_text(Some("{\"S1\": 4}")), json!({"S1": 4}));
        // Double-encoded document from an older dashboard build
        assert_eq!(
            parse_json_text(Some("\"{\\\"S1\\\": 4}\"")),
            json!({"S1": 4})
        );
    }

    #[test]
    fn test_deserialize_lenient_i64_variants() {
        let parsed: TestStruct = serde_json::from_str(r#"{"value": "7"}"#).unwrap();
        assert_eq!(parsed.value, 7);
        let parsed: TestStruct = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert_eq!(parsed.value, 0);
        let parsed: TestStruct = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(parsed.value, 0);
        let parsed: TestStruct = serde_json::from_str(r#"{"value": "n/a"}"#).unwrap();
        assert_eq!(parsed.value, 0);
    }
}

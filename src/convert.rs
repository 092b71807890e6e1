//! Conversion of loosely-typed JSON tool arguments into plain text.
//!
//! Tool callers do not always send strings. Values are coerced the same way
//! everywhere: strings pass through, `null` becomes the empty string, and any
//! other JSON value is rendered as its JSON text.

use serde_json::{Map, Value as JsonValue};

use crate::error::{McpError, Result};

/// Render a JSON value as opaque text.
pub fn json_to_text(json: &JsonValue) -> String {
    match json {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

/// Helper to get a required text argument from JSON arguments.
///
/// The argument must be present; its value is coerced with [`json_to_text`].
pub fn get_string_arg(args: &Map<String, JsonValue>, name: &str) -> Result<String> {
    args.get(name)
        .map(json_to_text)
        .ok_or_else(|| McpError::MissingArg(name.to_string()))
}

/// Helper to get several required text arguments at once.
///
/// Reports every missing name in a single error, e.g. `key, value`.
pub fn get_string_args<const N: usize>(
    args: &Map<String, JsonValue>,
    names: [&str; N],
) -> Result<[String; N]> {
    let missing: Vec<&str> = names
        .iter()
        .copied()
        .filter(|name| !args.contains_key(*name))
        .collect();
    if !missing.is_empty() {
        return Err(McpError::MissingArg(missing.join(", ")));
    }
    Ok(names.map(|name| args.get(name).map(json_to_text).unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: JsonValue) -> Map<String, JsonValue> {
        match value {
            JsonValue::Object(m) => m,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_json_to_text() {
        assert_eq!(json_to_text(&json!("plain")), "plain");
        assert_eq!(json_to_text(&json!(null)), "");
        assert_eq!(json_to_text(&json!(1)), "1");
        assert_eq!(json_to_text(&json!(true)), "true");
        assert_eq!(json_to_text(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn test_get_string_arg_missing() {
        let err = get_string_arg(&args(json!({})), "key").unwrap_err();
        assert_eq!(err, McpError::MissingArg("key".to_string()));
    }

    #[test]
    fn test_get_string_args_reports_all_missing() {
        let err = get_string_args(&args(json!({})), ["key", "value"]).unwrap_err();
        assert_eq!(err, McpError::MissingArg("key, value".to_string()));

        let [key, value] = get_string_args(&args(json!({"key": "a", "value": 2})), ["key", "value"])
            .unwrap();
        assert_eq!(key, "a");
        assert_eq!(value, "2");
    }
}

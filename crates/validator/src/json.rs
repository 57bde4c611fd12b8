//! JSON helpers shared by the engine and the built-in rules.
//!
//! # Examples
//!
//! ```
//! use ruleshape_validator::json::{lookup, type_name};
//! use serde_json::json;
//!
//! let order = json!({"customer": {"emails": ["a@x.io", "b@x.io"]}});
//! assert_eq!(lookup(&order, "customer.emails.1"), Some(&json!("b@x.io")));
//! assert_eq!(lookup(&order, "customer.phone"), None);
//! assert_eq!(type_name(&order), "object");
//! ```

use serde_json::Value;

/// Returns the JSON type name of a value.
#[must_use]
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Resolves a dotted path (`"address.street"`, `"items.0.price"`) against
/// a value.
///
/// Numeric segments index into arrays. Returns `None` as soon as a segment
/// is missing; an empty path resolves to the value itself.
#[must_use]
pub fn lookup<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
    if path.is_empty() {
        return Some(value);
    }
    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Reads a number as `f64`, if it is one.
pub(crate) fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

//! Type guards
//!
//! A guard never records a violation: a value of the wrong type raises a
//! [`RuleError`](crate::foundation::RuleError) and aborts the validation
//! call. Absent and null values pass.

use serde_json::Value;

use crate::foundation::RuleError;

fn guard(
    rule: &'static str,
    expected: &'static str,
    value: Option<&Value>,
    is_expected: fn(&Value) -> bool,
) -> Result<bool, RuleError> {
    match value {
        None | Some(Value::Null) => Ok(true),
        Some(v) if is_expected(v) => Ok(true),
        Some(other) => Err(RuleError::type_mismatch(rule, expected, other)),
    }
}

crate::leaf_rule! {
    /// Raises unless the value is a number.
    pub IsNumber {} => "is_number";
    check(self, value, _root) { guard("is_number", "number", value, Value::is_number) }
    message(self) { "Must be a number." }
    fn is_number();
}

crate::leaf_rule! {
    /// Raises unless the value is a string.
    pub IsString {} => "is_string";
    check(self, value, _root) { guard("is_string", "string", value, Value::is_string) }
    message(self) { "Must be a string." }
    fn is_string();
}

crate::leaf_rule! {
    /// Raises unless the value is an array.
    pub IsArray {} => "is_array";
    check(self, value, _root) { guard("is_array", "array", value, Value::is_array) }
    message(self) { "Must be an array." }
    fn is_array();
}

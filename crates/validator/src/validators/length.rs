//! Length validators
//!
//! String length is measured in Unicode scalar values (chars). Array
//! length rules treat an absent or null array as empty, so they are the
//! rules to use when an array must exist.

use serde_json::Value;

use crate::foundation::RuleError;

// ============================================================================
// STRING LENGTH
// ============================================================================

/// Returns the char count of a present, non-empty string.
///
/// Absent, null and empty values yield `None`: they are left to
/// [`required`](crate::validators::required).
fn string_len(rule: &'static str, value: Option<&Value>) -> Result<Option<usize>, RuleError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.chars().count())),
        Some(other) => Err(RuleError::type_mismatch(rule, "string", other)),
    }
}

crate::leaf_rule! {
    /// Requires a string of at least `min` characters.
    pub MinLength { min: usize } => "min_length";
    check(self, value, _root) {
        Ok(string_len("min_length", value)?.is_none_or(|len| len >= self.min))
    }
    message(self) { format!("Must be at least {} characters long.", self.min) }
    fn min_length(min: usize);
}

crate::leaf_rule! {
    /// Requires a string of at most `max` characters.
    pub MaxLength { max: usize } => "max_length";
    check(self, value, _root) {
        Ok(string_len("max_length", value)?.is_none_or(|len| len <= self.max))
    }
    message(self) { format!("Must be at most {} characters long.", self.max) }
    fn max_length(max: usize);
}

// ============================================================================
// ARRAY LENGTH
// ============================================================================

fn array_len(rule: &'static str, value: Option<&Value>) -> Result<usize, RuleError> {
    match value {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Array(items)) => Ok(items.len()),
        Some(other) => Err(RuleError::type_mismatch(rule, "array", other)),
    }
}

crate::leaf_rule! {
    /// Requires an array of at least `min` items. Absent counts as empty.
    pub ArrayMinLen { min: usize } => "array_min_len";
    check(self, value, _root) {
        Ok(array_len("array_min_len", value)? >= self.min)
    }
    message(self) {
        match self.min {
            1 => "Must contain at least 1 item.".to_owned(),
            n => format!("Must contain at least {n} items."),
        }
    }
    fn array_min_len(min: usize);
}

crate::leaf_rule! {
    /// Requires an array of at most `max` items.
    pub ArrayMaxLen { max: usize } => "array_max_len";
    check(self, value, _root) {
        Ok(array_len("array_max_len", value)? <= self.max)
    }
    message(self) {
        match self.max {
            1 => "Must contain at most 1 item.".to_owned(),
            n => format!("Must contain at most {n} items."),
        }
    }
    fn array_max_len(max: usize);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{Rule, RuleOutcome};
    use rstest::rstest;
    use serde_json::json;

    fn passes(rule: &impl Rule, value: Option<Value>) -> bool {
        matches!(
            rule.check(value.as_ref(), &json!({})).unwrap(),
            RuleOutcome::Pass
        )
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some(json!(null)), true)]
    #[case(Some(json!("")), true)]
    #[case(Some(json!("ab")), false)]
    #[case(Some(json!("abc")), true)]
    #[case(Some(json!("héé")), true)]
    fn test_min_length(#[case] value: Option<Value>, #[case] expected: bool) {
        assert_eq!(passes(&min_length(3), value), expected);
    }

    #[rstest]
    #[case(Some(json!("abc")), true)]
    #[case(Some(json!("abcd")), false)]
    #[case(None, true)]
    fn test_max_length(#[case] value: Option<Value>, #[case] expected: bool) {
        assert_eq!(passes(&max_length(3), value), expected);
    }

    #[test]
    fn test_string_length_rejects_non_strings() {
        let err = min_length(1).check(Some(&json!(42)), &json!({})).unwrap_err();
        assert_eq!(err.rule, "min_length");
        assert_eq!(err.message, "value is not a string");
    }

    #[rstest]
    #[case(None, false)]
    #[case(Some(json!(null)), false)]
    #[case(Some(json!([])), false)]
    #[case(Some(json!([1])), true)]
    fn test_array_min_len(#[case] value: Option<Value>, #[case] expected: bool) {
        assert_eq!(passes(&array_min_len(1), value), expected);
    }

    #[test]
    fn test_array_max_len() {
        assert!(passes(&array_max_len(2), Some(json!([1, 2]))));
        assert!(!passes(&array_max_len(2), Some(json!([1, 2, 3]))));
        assert!(passes(&array_max_len(0), None));
    }

    #[test]
    fn test_array_len_rejects_non_arrays() {
        let err = array_min_len(1).check(Some(&json!("x")), &json!({})).unwrap_err();
        assert_eq!(err.message, "value is not an array");
    }

    #[test]
    fn test_violation_message() {
        let outcome = array_min_len(1).check(Some(&json!([])), &json!({})).unwrap();
        let RuleOutcome::Violation(violation) = outcome else {
            panic!("expected a violation");
        };
        assert_eq!(violation.error_message, "Must contain at least 1 item.");
        assert_eq!(violation.attempted_value, Some(json!([])));

        let custom = min_length(5).with_message("Too short");
        let RuleOutcome::Violation(violation) = custom.check(Some(&json!("ab")), &json!({})).unwrap()
        else {
            panic!("expected a violation");
        };
        assert_eq!(violation.error_message, "Too short");
    }
}

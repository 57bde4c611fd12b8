//! Error types for broken validation setups
//!
//! Invalid *data* never shows up here: it is reported as
//! [`RuleViolation`](crate::foundation::RuleViolation)s inside an
//! [`ErrorNode`](crate::report::ErrorNode). The types in this module cover
//! the other channel, where the validation definition itself is wrong
//! (missing rule tree, a leaf rule raising a type-guard failure, a factory
//! producing another factory, ...). Those are returned as `Err` and never
//! recovered internally.

use std::borrow::Cow;

use serde_json::Value;

use crate::json::type_name;

// ============================================================================
// RULE ERROR
// ============================================================================

/// An error raised by a leaf rule.
///
/// Returning `Err(RuleError)` from a rule aborts the whole validation call.
/// Use it for structurally wrong input (a string rule given a number), not
/// for a value that merely fails the constraint.
///
/// # Examples
///
/// ```
/// use ruleshape_validator::foundation::RuleError;
/// use serde_json::json;
///
/// let err = RuleError::type_mismatch("min", "number", &json!("ten"));
/// assert_eq!(err.message, "value is not a number");
/// assert_eq!(err.to_string(), "min: value is not a number (got string)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{rule}: {message}{}", .actual.as_ref().map(|a| format!(" (got {a})")).unwrap_or_default())]
pub struct RuleError {
    /// Name of the rule that raised.
    pub rule: Cow<'static, str>,
    /// Human-readable description of what went wrong.
    pub message: Cow<'static, str>,
    /// JSON type of the offending value, when the error is a type mismatch.
    pub actual: Option<Cow<'static, str>>,
}

impl RuleError {
    /// Creates a new rule error.
    pub fn new(rule: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            rule: rule.into(),
            message: message.into(),
            actual: None,
        }
    }

    /// Creates a type-guard error: `value is not a <expected>`.
    pub fn type_mismatch(
        rule: impl Into<Cow<'static, str>>,
        expected: &'static str,
        value: &Value,
    ) -> Self {
        Self {
            rule: rule.into(),
            message: Cow::Owned(format!("value is not a{} {expected}", article(expected))),
            actual: Some(Cow::Borrowed(type_name(value))),
        }
    }
}

fn article(noun: &str) -> &'static str {
    match noun.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "n",
        _ => "",
    }
}

// ============================================================================
// VALIDATOR ERROR
// ============================================================================

/// Fatal errors raised by the validation engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ValidatorError {
    /// No rule tree was supplied to the outermost call.
    #[error("validation rule is null or undefined")]
    MissingRuleTree,

    /// The object handed to a top-level call was null.
    #[error("object is null or undefined during validation")]
    NullObject,

    /// A declarative entry where a leaf rule was expected is not a rule.
    #[error("{entry} is not a valid rule")]
    InvalidRule {
        /// The offending entry, rendered as JSON.
        entry: String,
    },

    /// A declarative entry names a rule the registry does not know.
    #[error("unknown rule `{name}`")]
    UnknownRule {
        /// The requested rule name.
        name: String,
    },

    /// A registered rule rejected its configuration.
    #[error("invalid configuration for rule `{rule}`: {reason}")]
    InvalidRuleConfig {
        /// The rule being configured.
        rule: String,
        /// Why the configuration was rejected.
        reason: String,
    },

    /// A rule factory produced another rule factory.
    #[error("rule factory for `{field}` resolved to another rule factory")]
    NestedFactory {
        /// Field whose factory misbehaved; the array field for element factories.
        field: String,
    },

    /// An async leaf rule did not resolve during synchronous validation.
    #[error("rule `{rule}` did not complete synchronously; use the async entry point")]
    Suspended {
        /// Name of the suspended rule.
        rule: String,
    },

    /// A leaf rule raised.
    #[error(transparent)]
    Rule(#[from] RuleError),
}

impl ValidatorError {
    /// Creates an [`InvalidRuleConfig`](Self::InvalidRuleConfig) error.
    pub fn invalid_config(rule: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRuleConfig {
            rule: rule.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the error was raised by a leaf rule.
    #[must_use]
    pub fn is_rule_error(&self) -> bool {
        matches!(self, Self::Rule(_))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_mismatch_message() {
        let err = RuleError::type_mismatch("min_length", "string", &json!(42));
        assert_eq!(err.message, "value is not a string");
        assert_eq!(err.actual.as_deref(), Some("number"));
    }

    #[test]
    fn test_type_mismatch_article() {
        let err = RuleError::type_mismatch("array_min_len", "array", &json!({}));
        assert_eq!(err.message, "value is not an array");
    }

    #[test]
    fn test_rule_error_display_without_actual() {
        let err = RuleError::new("lookup", "backend unavailable");
        assert_eq!(err.to_string(), "lookup: backend unavailable");
    }

    #[test]
    fn test_validator_error_messages() {
        assert_eq!(
            ValidatorError::MissingRuleTree.to_string(),
            "validation rule is null or undefined"
        );
        assert_eq!(
            ValidatorError::NullObject.to_string(),
            "object is null or undefined during validation"
        );
        assert_eq!(
            ValidatorError::InvalidRule {
                entry: "42".to_string()
            }
            .to_string(),
            "42 is not a valid rule"
        );
    }

    #[test]
    fn test_rule_error_is_transparent() {
        let err: ValidatorError = RuleError::new("min", "value is not a number").into();
        assert!(err.is_rule_error());
        assert_eq!(err.to_string(), "min: value is not a number");
    }
}

//! Final validation results

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::report::ErrorNode;

// ============================================================================
// MESSAGE CONFIG
// ============================================================================

/// Messages reported for passing and failing validations.
///
/// Deserializable so it can live in application configuration; missing
/// keys fall back to the defaults.
///
/// # Examples
///
/// ```
/// use ruleshape_validator::report::MessageConfig;
///
/// let cfg: MessageConfig = serde_json::from_str(r#"{"errorMessage": "Please fix the form."}"#).unwrap();
/// assert_eq!(cfg.ok_message, MessageConfig::DEFAULT_OK);
/// assert_eq!(cfg.error_message, "Please fix the form.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageConfig {
    /// Message used when validation passes.
    pub ok_message: Cow<'static, str>,
    /// Message used when validation fails.
    pub error_message: Cow<'static, str>,
}

impl MessageConfig {
    /// Default message for passing validations.
    pub const DEFAULT_OK: &'static str = "Validation passed.";
    /// Default message for failing validations.
    pub const DEFAULT_ERROR: &'static str = "Validation failed.";

    /// Creates a message pair.
    pub fn new(
        ok_message: impl Into<Cow<'static, str>>,
        error_message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            ok_message: ok_message.into(),
            error_message: error_message.into(),
        }
    }
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_OK, Self::DEFAULT_ERROR)
    }
}

// ============================================================================
// VALIDATION RESULT
// ============================================================================

/// Outcome of validating a whole object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True iff the error tree is empty.
    pub is_valid: bool,
    /// Message picked from the [`MessageConfig`].
    pub message: Cow<'static, str>,
    /// The error tree; `None` when valid, never an empty node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ErrorNode>,
}

impl ValidationResult {
    /// Wraps an error tree.
    pub fn assemble(errors: ErrorNode, messages: &MessageConfig) -> Self {
        match errors.non_empty() {
            None => Self {
                is_valid: true,
                message: messages.ok_message.clone(),
                errors: None,
            },
            Some(errors) => Self {
                is_valid: false,
                message: messages.error_message.clone(),
                errors: Some(errors),
            },
        }
    }
}

// ============================================================================
// FIELD RESULT
// ============================================================================

/// Outcome of validating a single field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldResult {
    /// True iff the field has no violations.
    pub is_valid: bool,
    /// The validated field.
    pub field_name: String,
    /// A node holding only `field_name`; `None` when valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ErrorNode>,
}

impl FieldResult {
    /// A passing result.
    pub fn valid(field_name: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            field_name: field_name.into(),
            errors: None,
        }
    }

    /// Wraps a single-field error node.
    pub fn assemble(field_name: impl Into<String>, errors: ErrorNode) -> Self {
        let errors = errors.non_empty();
        Self {
            is_valid: errors.is_none(),
            field_name: field_name.into(),
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::RuleViolation;
    use crate::report::FieldErrors;
    use serde_json::json;

    fn failing_node() -> ErrorNode {
        let mut node = ErrorNode::new();
        node.record(
            "name",
            FieldErrors::leaves(vec![RuleViolation::new("required", None, "required")]),
        );
        node
    }

    #[test]
    fn test_valid_result_has_no_errors() {
        let result = ValidationResult::assemble(ErrorNode::new(), &MessageConfig::default());
        assert!(result.is_valid);
        assert_eq!(result.message, MessageConfig::DEFAULT_OK);
        assert!(result.errors.is_none());
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"isValid": true, "message": "Validation passed."})
        );
    }

    #[test]
    fn test_invalid_result_uses_error_message() {
        let messages = MessageConfig::new("ok", "fix it");
        let result = ValidationResult::assemble(failing_node(), &messages);
        assert!(!result.is_valid);
        assert_eq!(result.message, "fix it");
        assert_eq!(result.errors.map(|e| e.len()), Some(1));
    }

    #[test]
    fn test_field_result() {
        let ok = FieldResult::assemble("name", ErrorNode::new());
        assert_eq!(ok, FieldResult::valid("name"));

        let failed = FieldResult::assemble("name", failing_node());
        assert!(!failed.is_valid);
        assert!(failed.errors.unwrap().contains("name"));
    }

    #[test]
    fn test_message_config_defaults_when_empty() {
        let cfg: MessageConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, MessageConfig::default());
    }
}

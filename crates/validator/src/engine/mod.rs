//! Validation engine
//!
//! The traversal is written once, as futures:
//!
//! - `object`: walks a [`RuleTree`], one future per field, joined in order
//! - `array`: whole-array rules plus one future per element
//!
//! The synchronous entry points run the same futures in an immediate mode
//! where every leaf must answer on its first poll; the async entry points
//! let leaves suspend and run siblings concurrently.
//!
//! # Examples
//!
//! ```
//! use ruleshape_validator::prelude::*;
//! use serde_json::json;
//!
//! let rules = RuleTree::new().field("name", rules![required()]);
//!
//! let result = validate(&json!({"name": ""}), &rules).unwrap();
//! assert!(!result.is_valid);
//! assert_eq!(result.message, "Validation failed.");
//!
//! let field = validate_field("name", &json!({"name": "Ada"}), &rules).unwrap();
//! assert!(field.is_valid);
//! ```

mod array;
mod object;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::foundation::{Schedule, ValidatorError, ValidatorResult};
use crate::report::{ErrorNode, FieldErrors, FieldResult, MessageConfig, ValidationResult};
use crate::rules::RuleTree;

use object::{property, validate_object, validate_rule};

// ============================================================================
// TRAVERSAL CONTEXT
// ============================================================================

/// Per-call context threaded through every level of a traversal.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Traversal<'a> {
    /// The top-level object, handed to every leaf rule and factory.
    pub root: &'a Value,
    pub schedule: Schedule,
}

impl<'a> Traversal<'a> {
    pub(crate) fn immediate(root: &'a Value) -> Self {
        Self {
            root,
            schedule: Schedule::Immediate,
        }
    }

    pub(crate) fn concurrent(root: &'a Value) -> Self {
        Self {
            root,
            schedule: Schedule::Concurrent,
        }
    }
}

/// Drives an immediate-mode traversal to completion.
///
/// Immediate leaves never suspend, so the future is ready on first poll;
/// a pending future means a leaf escaped that guarantee.
fn run_immediate<T>(traversal: BoxFuture<'_, ValidatorResult<T>>) -> ValidatorResult<T> {
    traversal.now_or_never().unwrap_or_else(|| {
        Err(ValidatorError::Suspended {
            rule: "<traversal>".to_owned(),
        })
    })
}

fn ensure_object(object: &Value) -> ValidatorResult<()> {
    if object.is_null() {
        return Err(ValidatorError::NullObject);
    }
    Ok(())
}

// ============================================================================
// WHOLE-OBJECT VALIDATION
// ============================================================================

/// Validates `object` against `rules` with the default messages.
///
/// Every leaf must be synchronous or resolve immediately; use
/// [`validate_async`] for rules that suspend.
///
/// # Errors
///
/// - [`ValidatorError::NullObject`] if `object` is JSON `null`
/// - [`ValidatorError::Rule`] if a leaf rule raised
/// - [`ValidatorError::Suspended`] if an async leaf did not resolve immediately
pub fn validate(object: &Value, rules: &RuleTree) -> ValidatorResult<ValidationResult> {
    validate_with_messages(object, rules, &MessageConfig::default())
}

/// Validates `object` against `rules`, reporting with `messages`.
///
/// # Errors
///
/// Same as [`validate`].
pub fn validate_with_messages(
    object: &Value,
    rules: &RuleTree,
    messages: &MessageConfig,
) -> ValidatorResult<ValidationResult> {
    ensure_object(object)?;
    tracing::debug!(fields = rules.len(), mode = "sync", "validating object");

    let errors = run_immediate(validate_object(rules, Some(object), Traversal::immediate(object)))?;
    Ok(finish(errors, messages))
}

/// Async counterpart of [`validate`].
///
/// At every object and array level, child validations start together and
/// are joined; the first error is returned as soon as it occurs.
///
/// # Errors
///
/// - [`ValidatorError::NullObject`] if `object` is JSON `null`
/// - [`ValidatorError::Rule`] if a leaf rule raised
pub async fn validate_async(object: &Value, rules: &RuleTree) -> ValidatorResult<ValidationResult> {
    validate_async_with_messages(object, rules, &MessageConfig::default()).await
}

/// Async counterpart of [`validate_with_messages`].
///
/// # Errors
///
/// Same as [`validate_async`].
pub async fn validate_async_with_messages(
    object: &Value,
    rules: &RuleTree,
    messages: &MessageConfig,
) -> ValidatorResult<ValidationResult> {
    ensure_object(object)?;
    tracing::debug!(fields = rules.len(), mode = "async", "validating object");

    let errors = validate_object(rules, Some(object), Traversal::concurrent(object)).await?;
    Ok(finish(errors, messages))
}

fn finish(errors: ErrorNode, messages: &MessageConfig) -> ValidationResult {
    let result = ValidationResult::assemble(errors, messages);
    tracing::debug!(
        is_valid = result.is_valid,
        violations = result.errors.as_ref().map_or(0, ErrorNode::violation_count),
        "validation finished"
    );
    result
}

// ============================================================================
// FIELD-SCOPED VALIDATION
// ============================================================================

/// Validates a single field of `object`, leaving its siblings untouched.
///
/// The errors, when present, hold only `field_name` and match what
/// [`validate`] reports for that key. A field without a rule is always
/// valid.
///
/// # Errors
///
/// Same as [`validate`].
pub fn validate_field(
    field_name: &str,
    object: &Value,
    rules: &RuleTree,
) -> ValidatorResult<FieldResult> {
    ensure_object(object)?;
    let Some(rule) = rules.get(field_name) else {
        return Ok(FieldResult::valid(field_name));
    };
    tracing::debug!(field = field_name, mode = "sync", "validating field");

    let cx = Traversal::immediate(object);
    let errors = run_immediate(validate_rule(field_name, rule, property(Some(object), field_name), cx))?;
    Ok(field_result(field_name, errors))
}

/// Async counterpart of [`validate_field`].
///
/// # Errors
///
/// Same as [`validate_async`].
pub async fn validate_field_async(
    field_name: &str,
    object: &Value,
    rules: &RuleTree,
) -> ValidatorResult<FieldResult> {
    ensure_object(object)?;
    let Some(rule) = rules.get(field_name) else {
        return Ok(FieldResult::valid(field_name));
    };
    tracing::debug!(field = field_name, mode = "async", "validating field");

    let cx = Traversal::concurrent(object);
    let errors = validate_rule(field_name, rule, property(Some(object), field_name), cx).await?;
    Ok(field_result(field_name, errors))
}

fn field_result(field_name: &str, errors: Option<FieldErrors>) -> FieldResult {
    let mut node = ErrorNode::new();
    node.record(field_name, errors);
    FieldResult::assemble(field_name, node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{RuleOutcome, async_rule_fn};
    use crate::rules::ArrayRule;
    use crate::validators::{array_min_len, required};
    use futures::future;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn user_rules() -> RuleTree {
        RuleTree::new()
            .field("name", crate::rules![required()])
            .field(
                "tags",
                ArrayRule::new().with_array_rules([array_min_len(1).into()]),
            )
    }

    #[test]
    fn test_valid_object() {
        let result = validate(&json!({"name": "Ada", "tags": ["x"]}), &user_rules()).unwrap();
        assert!(result.is_valid);
        assert_eq!(result.errors, None);
    }

    #[test]
    fn test_null_object_is_rejected() {
        assert_eq!(
            validate(&Value::Null, &user_rules()).unwrap_err(),
            ValidatorError::NullObject
        );
        assert_eq!(
            validate_field("name", &Value::Null, &user_rules()).unwrap_err(),
            ValidatorError::NullObject
        );
    }

    #[test]
    fn test_custom_messages() {
        let messages = MessageConfig::new("fine", "nope");
        let result = validate_with_messages(&json!({}), &user_rules(), &messages).unwrap();
        assert_eq!(result.message, "nope");
    }

    #[test]
    fn test_field_without_rule_is_valid() {
        let result = validate_field("unknown", &json!({"unknown": ""}), &user_rules()).unwrap();
        assert_eq!(result, FieldResult::valid("unknown"));
    }

    #[test]
    fn test_field_errors_hold_only_that_field() {
        let object = json!({"name": "", "tags": []});
        let result = validate_field("tags", &object, &user_rules()).unwrap();
        let errors = result.errors.unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains("tags"));
    }

    #[test]
    fn test_sync_mode_rejects_suspending_leaf() {
        let rules = RuleTree::new().field(
            "slow",
            vec![async_rule_fn("slow", |_, _| future::pending::<Result<RuleOutcome, _>>())],
        );
        assert_eq!(
            validate(&json!({}), &rules).unwrap_err(),
            ValidatorError::Suspended {
                rule: "slow".to_owned()
            }
        );
    }

    #[test]
    fn test_sync_mode_accepts_ready_async_leaf() {
        let rules = RuleTree::new().field(
            "quick",
            vec![async_rule_fn("quick", |_, _| future::ready(Ok(RuleOutcome::Pass)))],
        );
        assert!(validate(&json!({}), &rules).unwrap().is_valid);
    }

    #[test]
    fn test_async_matches_sync() {
        let object = json!({"name": "", "tags": []});
        let sync = validate(&object, &user_rules()).unwrap();
        let async_result = validate_async(&object, &user_rules()).now_or_never().unwrap().unwrap();
        assert_eq!(sync, async_result);
    }
}

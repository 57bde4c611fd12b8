//! Stateful validator
//!
//! A [`Validator`] is built once with a fixed rule tree and message pair,
//! then used for any number of validations. It is cheap to clone and
//! shareable across tasks.

use std::sync::Arc;

use serde_json::Value;

use crate::engine;
use crate::foundation::{ValidatorError, ValidatorResult};
use crate::report::{FieldResult, MessageConfig, ValidationResult};
use crate::rules::RuleTree;

/// A rule tree bound to its messages.
///
/// # Examples
///
/// ```
/// use ruleshape_validator::prelude::*;
/// use serde_json::json;
///
/// let validator = Validator::builder()
///     .rules(RuleTree::new().field("email", rules![required(), email()]))
///     .messages(MessageConfig::new("Saved.", "Please fix the highlighted fields."))
///     .build()
///     .unwrap();
///
/// let result = validator.validate(&json!({"email": "nope"})).unwrap();
/// assert_eq!(result.message, "Please fix the highlighted fields.");
///
/// // Per-keystroke check of a single field.
/// let field = validator.validate_field("email", &json!({"email": "a@b.io"})).unwrap();
/// assert!(field.is_valid);
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    rules: Arc<RuleTree>,
    messages: MessageConfig,
}

impl Validator {
    /// Creates a validator with the default messages.
    pub fn new(rules: RuleTree) -> Self {
        Self {
            rules: Arc::new(rules),
            messages: MessageConfig::default(),
        }
    }

    /// Starts building a validator.
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::default()
    }

    /// The rule tree.
    pub fn rules(&self) -> &RuleTree {
        &self.rules
    }

    /// The message pair.
    pub fn messages(&self) -> &MessageConfig {
        &self.messages
    }

    /// See [`engine::validate`].
    pub fn validate(&self, object: &Value) -> ValidatorResult<ValidationResult> {
        engine::validate_with_messages(object, &self.rules, &self.messages)
    }

    /// See [`engine::validate_async`].
    pub async fn validate_async(&self, object: &Value) -> ValidatorResult<ValidationResult> {
        engine::validate_async_with_messages(object, &self.rules, &self.messages).await
    }

    /// See [`engine::validate_field`].
    pub fn validate_field(&self, field_name: &str, object: &Value) -> ValidatorResult<FieldResult> {
        engine::validate_field(field_name, object, &self.rules)
    }

    /// See [`engine::validate_field_async`].
    pub async fn validate_field_async(
        &self,
        field_name: &str,
        object: &Value,
    ) -> ValidatorResult<FieldResult> {
        engine::validate_field_async(field_name, object, &self.rules).await
    }
}

/// Builder for [`Validator`].
#[derive(Debug, Default)]
pub struct ValidatorBuilder {
    rules: Option<RuleTree>,
    messages: Option<MessageConfig>,
}

impl ValidatorBuilder {
    /// Set the rule tree (required).
    pub fn rules(mut self, rules: RuleTree) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Set the message pair (defaults to [`MessageConfig::default`]).
    pub fn messages(mut self, messages: MessageConfig) -> Self {
        self.messages = Some(messages);
        self
    }

    /// Build the validator.
    ///
    /// # Errors
    ///
    /// [`ValidatorError::MissingRuleTree`] if no rule tree was set.
    pub fn build(self) -> Result<Validator, ValidatorError> {
        let rules = self.rules.ok_or(ValidatorError::MissingRuleTree)?;
        Ok(Validator {
            rules: Arc::new(rules),
            messages: self.messages.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::required;
    use futures::FutureExt;
    use serde_json::json;

    fn rules() -> RuleTree {
        RuleTree::new().field("name", crate::rules![required()])
    }

    #[test]
    fn builder_without_rules_fails() {
        assert_eq!(
            Validator::builder().build().unwrap_err(),
            ValidatorError::MissingRuleTree
        );
    }

    #[test]
    fn builder_defaults_messages() {
        let validator = Validator::builder().rules(rules()).build().unwrap();
        assert_eq!(validator.messages(), &MessageConfig::default());
        assert_eq!(validator.rules().len(), 1);
    }

    #[test]
    fn validator_is_reusable() {
        let validator = Validator::new(rules());
        assert!(!validator.validate(&json!({})).unwrap().is_valid);
        assert!(validator.validate(&json!({"name": "x"})).unwrap().is_valid);
        assert!(validator.clone().validate(&json!({"name": "y"})).unwrap().is_valid);
    }

    #[test]
    fn async_methods_delegate() {
        let validator = Validator::new(rules());
        let result = validator
            .validate_field_async("name", &json!({"name": ""}))
            .now_or_never()
            .unwrap()
            .unwrap();
        assert!(!result.is_valid);
        assert_eq!(result.field_name, "name");
    }
}

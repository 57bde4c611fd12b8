//! Cross-field validators
//!
//! These read the root object as well as the field value.

use std::borrow::Cow;

use serde_json::Value;

use crate::foundation::{LeafRule, Rule, RuleError, RuleOutcome, RuleViolation};
use crate::json::lookup;

/// Requires the value to equal another field of the root object.
///
/// The other field is addressed by a dotted path (`"password"`,
/// `"account.email"`). An absent or null value passes; a present value
/// fails when the other field is missing.
///
/// # Examples
///
/// ```
/// use ruleshape_validator::prelude::*;
/// use serde_json::json;
///
/// let rules = RuleTree::new()
///     .field("password", rules![required()])
///     .field("confirm", rules![equals_field("password")]);
///
/// let form = json!({"password": "hunter2", "confirm": "hunter3"});
/// let result = validate(&form, &rules).unwrap();
/// assert!(result.errors.unwrap().contains("confirm"));
/// ```
#[derive(Debug, Clone)]
pub struct EqualsField {
    path: String,
    message: Option<Cow<'static, str>>,
}

impl EqualsField {
    /// Creates the rule.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: None,
        }
    }

    /// Replaces the default violation message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Rule for EqualsField {
    fn name(&self) -> &str {
        "equals_field"
    }

    fn check(&self, value: Option<&Value>, root: &Value) -> Result<RuleOutcome, RuleError> {
        let Some(current) = value.filter(|v| !v.is_null()) else {
            return Ok(RuleOutcome::Pass);
        };
        if lookup(root, &self.path) == Some(current) {
            return Ok(RuleOutcome::Pass);
        }
        let message = self
            .message
            .clone()
            .unwrap_or_else(|| Cow::Owned(format!("Must match `{}`.", self.path)));
        Ok(RuleViolation::new("equals_field", value, message).into())
    }
}

impl From<EqualsField> for LeafRule {
    fn from(rule: EqualsField) -> Self {
        Self::new(rule)
    }
}

/// Creates an [`EqualsField`] rule.
#[must_use]
pub fn equals_field(path: impl Into<String>) -> EqualsField {
    EqualsField::new(path)
}

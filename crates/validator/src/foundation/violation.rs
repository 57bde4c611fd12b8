//! Violation records and leaf rule outcomes

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// RULE VIOLATION
// ============================================================================

/// One failed constraint.
///
/// Serializes as `{ "ruleName", "attemptedValue", "errorMessage" }`, with
/// `attemptedValue` omitted when the property was absent.
///
/// # Examples
///
/// ```
/// use ruleshape_validator::foundation::RuleViolation;
/// use serde_json::json;
///
/// let v = RuleViolation::new("required", Some(&json!("")), "This field is required.");
/// assert_eq!(
///     serde_json::to_value(&v).unwrap(),
///     json!({"ruleName": "required", "attemptedValue": "", "errorMessage": "This field is required."})
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleViolation {
    /// Name of the rule that failed.
    pub rule_name: Cow<'static, str>,

    /// The value the rule saw; `None` when the property was absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempted_value: Option<Value>,

    /// Human-readable message.
    pub error_message: Cow<'static, str>,
}

impl RuleViolation {
    /// Creates a violation, copying the attempted value.
    pub fn new(
        rule_name: impl Into<Cow<'static, str>>,
        attempted_value: Option<&Value>,
        error_message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            rule_name: rule_name.into(),
            attempted_value: attempted_value.cloned(),
            error_message: error_message.into(),
        }
    }
}

// ============================================================================
// RULE OUTCOME
// ============================================================================

/// What a leaf rule reports for one value.
///
/// Rules may answer with a full [`RuleViolation`] or with the shorter
/// [`Verdict`](RuleOutcome::Verdict) form; the engine normalizes both.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutcome {
    /// The value satisfies the rule.
    Pass,
    /// The value violates the rule.
    Violation(RuleViolation),
    /// Shorthand: `{ isValid, errorMessage? }`.
    Verdict {
        /// Whether the value is valid.
        is_valid: bool,
        /// Message to report when invalid.
        error_message: Option<Cow<'static, str>>,
    },
}

impl RuleOutcome {
    /// Creates a verdict outcome.
    pub fn verdict(is_valid: bool, error_message: Option<impl Into<Cow<'static, str>>>) -> Self {
        Self::Verdict {
            is_valid,
            error_message: error_message.map(Into::into),
        }
    }

    /// Normalizes the outcome into an optional violation.
    ///
    /// A failing verdict becomes a violation named after `rule_name`, carrying
    /// `value` as the attempted value.
    #[must_use]
    pub fn normalize(self, rule_name: &str, value: Option<&Value>) -> Option<RuleViolation> {
        match self {
            Self::Pass => None,
            Self::Violation(violation) => Some(violation),
            Self::Verdict { is_valid: true, .. } => None,
            Self::Verdict {
                is_valid: false,
                error_message,
            } => {
                let message = error_message
                    .unwrap_or_else(|| Cow::Owned(format!("Value failed the `{rule_name}` rule.")));
                Some(RuleViolation::new(rule_name.to_owned(), value, message))
            }
        }
    }
}

impl From<RuleViolation> for RuleOutcome {
    fn from(violation: RuleViolation) -> Self {
        Self::Violation(violation)
    }
}

impl From<Option<RuleViolation>> for RuleOutcome {
    fn from(violation: Option<RuleViolation>) -> Self {
        violation.map_or(Self::Pass, Self::Violation)
    }
}

// ============================================================================
// TESTS
// ============================================================================

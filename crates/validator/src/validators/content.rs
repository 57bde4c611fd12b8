//! String content validators
//!
//! Format and membership checks. Empty strings pass, like absent values:
//! emptiness is the concern of `required`.

use std::borrow::Cow;
use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::foundation::{LeafRule, Rule, RuleError, RuleOutcome, RuleViolation, ValidatorError};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap()
});

/// Reads a present, non-empty string.
fn text<'v>(rule: &'static str, value: Option<&'v Value>) -> Result<Option<&'v str>, RuleError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(RuleError::type_mismatch(rule, "string", other)),
    }
}

// ============================================================================
// EMAIL
// ============================================================================

crate::leaf_rule! {
    /// Validates email format.
    ///
    /// Uses a simple but effective regex pattern.
    pub Email {} => "email";
    check(self, value, _root) {
        Ok(text("email", value)?.is_none_or(|s| EMAIL_REGEX.is_match(s)))
    }
    message(self) { "Must be a valid email address." }
    fn email();
}

// ============================================================================
// REGEX
// ============================================================================

/// Validates that a string matches a regular expression.
#[derive(Debug, Clone)]
pub struct MatchesRegex {
    pattern: Regex,
    message: Option<Cow<'static, str>>,
}

impl MatchesRegex {
    /// Compiles `pattern`.
    ///
    /// # Errors
    ///
    /// [`ValidatorError::InvalidRuleConfig`] if the pattern does not compile.
    pub fn new(pattern: &str) -> Result<Self, ValidatorError> {
        let pattern = Regex::new(pattern)
            .map_err(|e| ValidatorError::invalid_config("matches_regex", e.to_string()))?;
        Ok(Self {
            pattern,
            message: None,
        })
    }

    /// Replaces the default violation message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Rule for MatchesRegex {
    fn name(&self) -> &str {
        "matches_regex"
    }

    fn check(&self, value: Option<&Value>, _root: &Value) -> Result<RuleOutcome, RuleError> {
        if text("matches_regex", value)?.is_none_or(|s| self.pattern.is_match(s)) {
            return Ok(RuleOutcome::Pass);
        }
        let message = self.message.clone().unwrap_or_else(|| {
            Cow::Owned(format!("Must match the pattern `{}`.", self.pattern.as_str()))
        });
        Ok(RuleViolation::new("matches_regex", value, message).into())
    }
}

impl From<MatchesRegex> for LeafRule {
    fn from(rule: MatchesRegex) -> Self {
        Self::new(rule)
    }
}

/// Creates a [`MatchesRegex`] rule.
///
/// # Errors
///
/// [`ValidatorError::InvalidRuleConfig`] if the pattern does not compile.
pub fn matches_regex(pattern: &str) -> Result<MatchesRegex, ValidatorError> {
    MatchesRegex::new(pattern)
}

// ============================================================================
// ONE OF
// ============================================================================

/// Requires the value to equal one of a fixed set of JSON values.
#[derive(Debug, Clone)]
pub struct OneOf {
    allowed: Vec<Value>,
    message: Option<Cow<'static, str>>,
}

impl OneOf {
    /// Creates the rule from the allowed values.
    #[must_use]
    pub fn new<I, V>(allowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
            message: None,
        }
    }

    /// Replaces the default violation message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn default_message(&self) -> String {
        let mut message = String::from("Must be one of: ");
        for (i, value) in self.allowed.iter().enumerate() {
            if i > 0 {
                message.push_str(", ");
            }
            match value {
                Value::String(s) => message.push_str(s),
                other => {
                    let _ = write!(message, "{other}");
                }
            }
        }
        message.push('.');
        message
    }
}

impl Rule for OneOf {
    fn name(&self) -> &str {
        "one_of"
    }

    fn check(&self, value: Option<&Value>, _root: &Value) -> Result<RuleOutcome, RuleError> {
        match value {
            None | Some(Value::Null) => Ok(RuleOutcome::Pass),
            Some(v) if self.allowed.contains(v) => Ok(RuleOutcome::Pass),
            Some(_) => {
                let message = self
                    .message
                    .clone()
                    .unwrap_or_else(|| Cow::Owned(self.default_message()));
                Ok(RuleViolation::new("one_of", value, message).into())
            }
        }
    }
}

impl From<OneOf> for LeafRule {
    fn from(rule: OneOf) -> Self {
        Self::new(rule)
    }
}

/// Creates a [`OneOf`] rule.
///
/// ```
/// use ruleshape_validator::validators::one_of;
///
/// let status = one_of(["draft", "published"]);
/// ```
#[must_use]
pub fn one_of<I, V>(allowed: I) -> OneOf
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    OneOf::new(allowed)
}

// ============================================================================
// TESTS
// ============================================================================

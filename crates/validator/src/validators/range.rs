//! Numeric range validators

use std::borrow::Cow;

use serde_json::Value;

use crate::foundation::{LeafRule, Rule, RuleError, RuleOutcome, RuleViolation};
use crate::json::as_number;

/// Reads a present number; absent and null yield `None`.
fn number(rule: &'static str, value: Option<&Value>) -> Result<Option<f64>, RuleError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => as_number(v)
            .map(Some)
            .ok_or_else(|| RuleError::type_mismatch(rule, "number", v)),
    }
}

crate::leaf_rule! {
    /// Requires a number of at least `min`.
    pub Min { min: f64 } => "min";
    check(self, value, _root) {
        Ok(number("min", value)?.is_none_or(|n| n >= self.min))
    }
    message(self) { format!("Must be at least {}.", self.min) }
    fn min(min: f64);
}

crate::leaf_rule! {
    /// Requires a number of at most `max`.
    pub Max { max: f64 } => "max";
    check(self, value, _root) {
        Ok(number("max", value)?.is_none_or(|n| n <= self.max))
    }
    message(self) { format!("Must be at most {}.", self.max) }
    fn max(max: f64);
}

crate::leaf_rule! {
    /// Requires a number within `[min, max]`.
    pub InRange { min: f64, max: f64 } => "in_range";
    check(self, value, _root) {
        Ok(number("in_range", value)?.is_none_or(|n| (self.min..=self.max).contains(&n)))
    }
    message(self) { format!("Must be between {} and {}.", self.min, self.max) }
    fn in_range(min: f64, max: f64);
}

// ============================================================================
// SUM BETWEEN
// ============================================================================

/// Requires the sum of an array's numbers to fall within `[min, max]`.
///
/// With [`of_field`](Self::of_field) the sum is taken over one property of
/// each element instead of the elements themselves. Missing or null
/// addends count as zero.
///
/// # Examples
///
/// ```
/// use ruleshape_validator::prelude::*;
/// use serde_json::json;
///
/// // Allocation percentages must add up to 100.
/// let rules = RuleTree::new().field(
///     "allocations",
///     ArrayRule::new().with_array_rules([sum_between(100.0, 100.0).of_field("percent").into()]),
/// );
///
/// let ok = json!({"allocations": [{"percent": 60}, {"percent": 40}]});
/// assert!(validate(&ok, &rules).unwrap().is_valid);
///
/// let short = json!({"allocations": [{"percent": 60}]});
/// assert!(!validate(&short, &rules).unwrap().is_valid);
/// ```
#[derive(Debug, Clone)]
pub struct SumBetween {
    min: f64,
    max: f64,
    field: Option<String>,
    message: Option<Cow<'static, str>>,
}

impl SumBetween {
    /// Creates the rule.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            field: None,
            message: None,
        }
    }

    /// Sums `element[field]` rather than the elements.
    #[must_use = "builder methods must be chained or built"]
    pub fn of_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Replaces the default violation message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn addend<'v>(&self, element: &'v Value) -> Option<&'v Value> {
        match &self.field {
            Some(field) => element.get(field),
            None => Some(element),
        }
    }

    fn sum(&self, items: &[Value]) -> Result<f64, RuleError> {
        items.iter().try_fold(0.0, |total, element| {
            Ok(total + number("sum_between", self.addend(element))?.unwrap_or(0.0))
        })
    }
}

impl Rule for SumBetween {
    fn name(&self) -> &str {
        "sum_between"
    }

    fn check(&self, value: Option<&Value>, _root: &Value) -> Result<RuleOutcome, RuleError> {
        let items = match value {
            None | Some(Value::Null) => return Ok(RuleOutcome::Pass),
            Some(Value::Array(items)) => items,
            Some(other) => return Err(RuleError::type_mismatch("sum_between", "array", other)),
        };
        let total = self.sum(items)?;
        if (self.min..=self.max).contains(&total) {
            return Ok(RuleOutcome::Pass);
        }
        let message = self.message.clone().unwrap_or_else(|| {
            Cow::Owned(format!(
                "Sum must be between {} and {} (got {total}).",
                self.min, self.max
            ))
        });
        Ok(RuleViolation::new("sum_between", value, message).into())
    }
}

impl From<SumBetween> for LeafRule {
    fn from(rule: SumBetween) -> Self {
        Self::new(rule)
    }
}

/// Creates a [`SumBetween`] rule.
#[must_use]
pub fn sum_between(min: f64, max: f64) -> SumBetween {
    SumBetween::new(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn passes(rule: &impl Rule, value: Value) -> bool {
        matches!(rule.check(Some(&value), &json!({})).unwrap(), RuleOutcome::Pass)
    }

    #[rstest]
    #[case(json!(5), true)]
    #[case(json!(4.5), false)]
    #[case(json!(null), true)]
    fn test_min(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(passes(&min(5.0), value), expected);
    }

    #[test]
    fn test_max_and_range() {
        assert!(passes(&max(10.0), json!(10)));
        assert!(!passes(&max(10.0), json!(11)));
        assert!(passes(&in_range(1.0, 3.0), json!(2)));
        assert!(!passes(&in_range(1.0, 3.0), json!(0)));
        assert!(passes(&in_range(1.0, 3.0), json!(null)));
    }

    #[test]
    fn test_number_guard() {
        let err = min(1.0).check(Some(&json!("5")), &json!({})).unwrap_err();
        assert_eq!(err.to_string(), "min: value is not a number (got string)");
    }

    #[rstest]
    #[case(json!([1, 2, 3]), true)]
    #[case(json!([5, 5]), false)]
    #[case(json!([]), false)]
    fn test_sum_between(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(passes(&sum_between(1.0, 6.0), value), expected);
    }

    #[test]
    fn test_sum_of_field() {
        let rule = sum_between(10.0, 10.0).of_field("qty");
        assert!(passes(&rule, json!([{"qty": 4}, {"qty": 6}, {"other": 1}])));
        assert!(!passes(&rule, json!([{"qty": 4}])));
    }

    #[test]
    fn test_sum_rejects_non_numeric_addends() {
        let err = sum_between(0.0, 1.0)
            .check(Some(&json!(["a"])), &json!({}))
            .unwrap_err();
        assert_eq!(err.rule, "sum_between");
    }
}

//! Presence validators

use serde_json::Value;

crate::leaf_rule! {
    /// Requires a value to be present: not absent, not null, not `""`.
    ///
    /// The only built-in rule (besides array length) that fails on a
    /// missing value.
    pub Required {} => "required";
    check(self, value, _root) {
        Ok(!matches!(value, None | Some(Value::Null)) && value.and_then(Value::as_str) != Some(""))
    }
    message(self) { "This field is required." }
    fn required();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{Rule, RuleOutcome, RuleViolation};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(None, false)]
    #[case(Some(json!(null)), false)]
    #[case(Some(json!("")), false)]
    #[case(Some(json!(" ")), true)]
    #[case(Some(json!(0)), true)]
    #[case(Some(json!(false)), true)]
    #[case(Some(json!([])), true)]
    fn test_required(#[case] value: Option<Value>, #[case] expected: bool) {
        let outcome = required().check(value.as_ref(), &json!({})).unwrap();
        assert_eq!(matches!(outcome, RuleOutcome::Pass), expected);
    }

    #[test]
    fn test_required_violation_shape() {
        let outcome = required().check(Some(&json!("")), &json!({})).unwrap();
        assert_eq!(
            outcome,
            RuleOutcome::Violation(RuleViolation::new(
                "required",
                Some(&json!("")),
                "This field is required."
            ))
        );
    }
}

//! Sparse error trees
//!
//! An [`ErrorNode`] mirrors the rule tree that produced it, but only where
//! something failed: a key exists only if its subtree holds at least one
//! violation, and empty lists or objects are never stored. The constructors
//! in this module enforce that by returning `Option`.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::foundation::RuleViolation;

// ============================================================================
// ERROR NODE
// ============================================================================

/// Per-field violations for one object level.
///
/// Serializes as a JSON object keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ErrorNode {
    fields: IndexMap<String, FieldErrors>,
}

impl ErrorNode {
    /// Creates an empty node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records errors for a field. `None` leaves the node untouched.
    pub fn record(&mut self, field: impl Into<String>, errors: Option<FieldErrors>) {
        if let Some(errors) = errors {
            self.fields.insert(field.into(), errors);
        }
    }

    /// Returns the errors recorded for a field.
    pub fn get(&self, field: &str) -> Option<&FieldErrors> {
        self.fields.get(field)
    }

    /// Returns true if a field has errors.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Iterates fields with errors, in rule-declaration order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, FieldErrors> {
        self.fields.iter()
    }

    /// Number of fields with errors.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if nothing failed.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Total number of violations in the subtree.
    pub fn violation_count(&self) -> usize {
        self.fields.values().map(FieldErrors::violation_count).sum()
    }

    /// Collects every violation in the subtree, depth-first, with a dotted
    /// path to the field (`items.0.price`).
    pub fn flatten(&self) -> Vec<(String, &RuleViolation)> {
        let mut out = Vec::new();
        self.flatten_into("", &mut out);
        out
    }

    /// Wraps the node, returning `None` when empty.
    pub(crate) fn non_empty(self) -> Option<Self> {
        (!self.is_empty()).then_some(self)
    }

    fn flatten_into<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a RuleViolation)>) {
        for (field, errors) in &self.fields {
            errors.flatten_into(&join(prefix, field), out);
        }
    }
}

impl<'a> IntoIterator for &'a ErrorNode {
    type Item = (&'a String, &'a FieldErrors);
    type IntoIter = indexmap::map::Iter<'a, String, FieldErrors>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_owned()
    } else {
        format!("{prefix}.{segment}")
    }
}

// ============================================================================
// FIELD ERRORS
// ============================================================================

/// Errors for one field; the variant mirrors the field's rule shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldErrors {
    /// Violations from a leaf list, in rule-declaration order.
    Leaves(Vec<RuleViolation>),
    /// Errors from a nested rule tree.
    Object(ErrorNode),
    /// Errors from an array descriptor.
    Array(ArrayErrors),
}

impl FieldErrors {
    /// Wraps leaf violations, returning `None` when there are none.
    pub fn leaves(violations: Vec<RuleViolation>) -> Option<Self> {
        (!violations.is_empty()).then_some(Self::Leaves(violations))
    }

    /// Wraps a nested node, returning `None` when it is empty.
    pub fn object(node: ErrorNode) -> Option<Self> {
        node.non_empty().map(Self::Object)
    }

    /// Leaf violations, if this is a leaf list.
    pub fn as_leaves(&self) -> Option<&[RuleViolation]> {
        match self {
            Self::Leaves(v) => Some(v),
            _ => None,
        }
    }

    /// Nested node, if this is an object.
    pub fn as_object(&self) -> Option<&ErrorNode> {
        match self {
            Self::Object(node) => Some(node),
            _ => None,
        }
    }

    /// Array errors, if this is an array.
    pub fn as_array(&self) -> Option<&ArrayErrors> {
        match self {
            Self::Array(errors) => Some(errors),
            _ => None,
        }
    }

    /// Total number of violations below this field.
    pub fn violation_count(&self) -> usize {
        match self {
            Self::Leaves(v) => v.len(),
            Self::Object(node) => node.violation_count(),
            Self::Array(errors) => errors.violation_count(),
        }
    }

    fn flatten_into<'a>(&'a self, path: &str, out: &mut Vec<(String, &'a RuleViolation)>) {
        match self {
            Self::Leaves(violations) => {
                out.extend(violations.iter().map(|v| (path.to_owned(), v)));
            }
            Self::Object(node) => node.flatten_into(path, out),
            Self::Array(errors) => {
                for v in errors.array_errors() {
                    out.push((path.to_owned(), v));
                }
                for element in errors.element_errors() {
                    let element_path = join(path, &element.index.to_string());
                    element.errors.flatten_into(&element_path, out);
                }
            }
        }
    }
}

// ============================================================================
// ARRAY ERRORS
// ============================================================================

/// Errors for an array-valued field.
///
/// At least one of the two parts is present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    array_errors: Option<Vec<RuleViolation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    array_element_errors: Option<Vec<IndexedError>>,
}

impl ArrayErrors {
    /// Combines whole-array and per-element errors.
    ///
    /// Empty parts are dropped; returns `None` when both are empty.
    pub fn from_parts(
        array_errors: Vec<RuleViolation>,
        element_errors: Vec<IndexedError>,
    ) -> Option<Self> {
        let array_errors = (!array_errors.is_empty()).then_some(array_errors);
        let array_element_errors = (!element_errors.is_empty()).then_some(element_errors);
        if array_errors.is_none() && array_element_errors.is_none() {
            return None;
        }
        Some(Self {
            array_errors,
            array_element_errors,
        })
    }

    /// Violations of the whole-array rules.
    pub fn array_errors(&self) -> &[RuleViolation] {
        self.array_errors.as_deref().unwrap_or_default()
    }

    /// Per-element errors, in ascending index order.
    pub fn element_errors(&self) -> &[IndexedError] {
        self.array_element_errors.as_deref().unwrap_or_default()
    }

    /// Returns the errors of the element at `index`, if it failed.
    pub fn element(&self, index: usize) -> Option<&IndexedError> {
        self.element_errors().iter().find(|e| e.index == index)
    }

    /// Returns true if the whole-array part is present.
    pub fn has_array_errors(&self) -> bool {
        self.array_errors.is_some()
    }

    /// Returns true if the per-element part is present.
    pub fn has_element_errors(&self) -> bool {
        self.array_element_errors.is_some()
    }

    /// Total number of violations.
    pub fn violation_count(&self) -> usize {
        self.array_errors().len()
            + self
                .element_errors()
                .iter()
                .map(|e| e.errors.violation_count())
                .sum::<usize>()
    }
}

/// Errors for one array element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedError {
    /// Position of the element.
    pub index: usize,
    /// The element's errors.
    pub errors: FieldErrors,
    /// The element as validated.
    pub attempted_value: Value,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn violation(rule: &'static str) -> RuleViolation {
        RuleViolation::new(rule, Some(&json!("")), "bad")
    }

    #[test]
    fn test_empty_parts_are_never_stored() {
        assert!(FieldErrors::leaves(Vec::new()).is_none());
        assert!(FieldErrors::object(ErrorNode::new()).is_none());
        assert!(ArrayErrors::from_parts(Vec::new(), Vec::new()).is_none());

        let mut node = ErrorNode::new();
        node.record("a", None);
        assert!(node.is_empty());
    }

    #[test]
    fn test_array_errors_keep_only_present_parts() {
        let errors = ArrayErrors::from_parts(vec![violation("array_min_len")], Vec::new()).unwrap();
        assert!(errors.has_array_errors());
        assert!(!errors.has_element_errors());
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({"arrayErrors": [{"ruleName": "array_min_len", "attemptedValue": "", "errorMessage": "bad"}]})
        );
    }

    #[test]
    fn test_serialized_shape_mirrors_rules() {
        let mut address = ErrorNode::new();
        address.record("street", FieldErrors::leaves(vec![violation("required")]));

        let element = IndexedError {
            index: 1,
            errors: FieldErrors::leaves(vec![violation("min")]).unwrap(),
            attempted_value: json!(0),
        };

        let mut root = ErrorNode::new();
        root.record("address", FieldErrors::object(address));
        root.record(
            "prices",
            ArrayErrors::from_parts(Vec::new(), vec![element]).map(FieldErrors::Array),
        );

        assert_eq!(
            serde_json::to_value(&root).unwrap(),
            json!({
                "address": {"street": [{"ruleName": "required", "attemptedValue": "", "errorMessage": "bad"}]},
                "prices": {"arrayElementErrors": [{
                    "index": 1,
                    "errors": [{"ruleName": "min", "attemptedValue": "", "errorMessage": "bad"}],
                    "attemptedValue": 0
                }]}
            })
        );
        assert_eq!(root.violation_count(), 2);
    }

    #[test]
    fn test_flatten_builds_paths() {
        let mut item = ErrorNode::new();
        item.record("price", FieldErrors::leaves(vec![violation("min")]));
        let element = IndexedError {
            index: 3,
            errors: FieldErrors::object(item).unwrap(),
            attempted_value: json!({"price": -1}),
        };
        let mut root = ErrorNode::new();
        root.record("name", FieldErrors::leaves(vec![violation("required")]));
        root.record(
            "items",
            ArrayErrors::from_parts(vec![violation("array_max_len")], vec![element])
                .map(FieldErrors::Array),
        );

        let paths: Vec<_> = root
            .flatten()
            .into_iter()
            .map(|(path, v)| format!("{path}:{}", v.rule_name))
            .collect();
        assert_eq!(paths, ["name:required", "items:array_max_len", "items.3.price:min"]);
    }

    #[test]
    fn test_element_lookup() {
        let element = IndexedError {
            index: 2,
            errors: FieldErrors::leaves(vec![violation("min")]).unwrap(),
            attempted_value: json!(1),
        };
        let errors = ArrayErrors::from_parts(Vec::new(), vec![element]).unwrap();
        assert!(errors.element(2).is_some());
        assert!(errors.element(0).is_none());
    }
}

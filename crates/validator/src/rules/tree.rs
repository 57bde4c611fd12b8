//! Rule tree data model

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::foundation::LeafRule;

// ============================================================================
// RULE FACTORY
// ============================================================================

type FactoryFn = dyn Fn(Option<&Value>, &Value) -> FieldRule + Send + Sync;

/// Builds a field rule from the live value and the root object.
///
/// Factories are invoked once per traversal of their node: once per field
/// visit, or once per element when used as an array element rule. The
/// produced rule must not be another factory.
///
/// Factories are also how recursive shapes are expressed: a factory that
/// returns the same tree again recurses on the *data*, which is always
/// finite.
#[derive(Clone)]
pub struct RuleFactory {
    produce: Arc<FactoryFn>,
}

impl RuleFactory {
    /// Wraps a closure.
    pub fn new<F>(produce: F) -> Self
    where
        F: Fn(Option<&Value>, &Value) -> FieldRule + Send + Sync + 'static,
    {
        Self {
            produce: Arc::new(produce),
        }
    }

    /// Invokes the factory.
    pub fn produce(&self, value: Option<&Value>, root: &Value) -> FieldRule {
        (self.produce)(value, root)
    }
}

impl fmt::Debug for RuleFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RuleFactory(<function>)")
    }
}

// ============================================================================
// FIELD RULE
// ============================================================================

/// The rule attached to one property.
#[derive(Debug, Clone, Default)]
pub enum FieldRule {
    /// The field is not validated.
    #[default]
    Ignored,
    /// Leaf rules run against a primitive value, in declaration order.
    Leaves(Vec<LeafRule>),
    /// A nested rule tree for an object-valued field.
    Object(RuleTree),
    /// Whole-array and per-element rules for an array-valued field.
    Array(ArrayRule),
    /// A rule computed lazily from the live value and root.
    Factory(RuleFactory),
}

impl FieldRule {
    /// Creates a leaf list.
    pub fn leaves(rules: impl IntoIterator<Item = LeafRule>) -> Self {
        Self::Leaves(rules.into_iter().collect())
    }

    /// Creates a factory node.
    ///
    /// # Examples
    ///
    /// ```
    /// use ruleshape_validator::prelude::*;
    ///
    /// // Items are only required once the order has been submitted.
    /// let items = FieldRule::factory(|_items, order| {
    ///     if order["submitted"] == true {
    ///         ArrayRule::new().with_array_rules([array_min_len(1).into()]).into()
    ///     } else {
    ///         FieldRule::Ignored
    ///     }
    /// });
    /// assert!(items.is_factory());
    /// ```
    pub fn factory<F>(produce: F) -> Self
    where
        F: Fn(Option<&Value>, &Value) -> FieldRule + Send + Sync + 'static,
    {
        Self::Factory(RuleFactory::new(produce))
    }

    /// Returns true for [`FieldRule::Ignored`].
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }

    /// Returns true for [`FieldRule::Factory`].
    pub fn is_factory(&self) -> bool {
        matches!(self, Self::Factory(_))
    }
}

impl From<RuleTree> for FieldRule {
    fn from(tree: RuleTree) -> Self {
        Self::Object(tree)
    }
}

impl From<ArrayRule> for FieldRule {
    fn from(rule: ArrayRule) -> Self {
        Self::Array(rule)
    }
}

impl From<Vec<LeafRule>> for FieldRule {
    fn from(rules: Vec<LeafRule>) -> Self {
        Self::Leaves(rules)
    }
}

impl From<RuleFactory> for FieldRule {
    fn from(factory: RuleFactory) -> Self {
        Self::Factory(factory)
    }
}

impl From<Option<FieldRule>> for FieldRule {
    fn from(rule: Option<FieldRule>) -> Self {
        rule.unwrap_or_default()
    }
}

// ============================================================================
// ARRAY RULE
// ============================================================================

/// Rule descriptor for array-valued fields.
///
/// `array_rules` run against the array itself; `element_rule` runs against
/// each element, and only when the value is an actual array.
#[derive(Debug, Clone, Default)]
pub struct ArrayRule {
    array_rules: Option<Vec<LeafRule>>,
    element_rule: Option<Box<FieldRule>>,
}

impl ArrayRule {
    /// Creates an empty descriptor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the whole-array rules.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_array_rules(mut self, rules: impl IntoIterator<Item = LeafRule>) -> Self {
        self.array_rules = Some(rules.into_iter().collect());
        self
    }

    /// Sets the per-element rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_element_rule(mut self, rule: impl Into<FieldRule>) -> Self {
        self.element_rule = Some(Box::new(rule.into()));
        self
    }

    /// Whole-array rules, if declared.
    pub fn array_rules(&self) -> Option<&[LeafRule]> {
        self.array_rules.as_deref()
    }

    /// Per-element rule, if declared.
    pub fn element_rule(&self) -> Option<&FieldRule> {
        self.element_rule.as_deref()
    }
}

// ============================================================================
// RULE TREE
// ============================================================================

/// Field-name-to-rule mapping describing one object shape.
///
/// Field order is preserved and drives enumeration, so rules may target
/// properties absent from the data.
///
/// # Examples
///
/// ```
/// use ruleshape_validator::prelude::*;
///
/// let address = RuleTree::new()
///     .field("street", rules![required()])
///     .field("zip", rules![required(), min_length(5)]);
///
/// let user = RuleTree::new()
///     .field("name", rules![required()])
///     .field("address", address);
///
/// assert_eq!(user.len(), 2);
/// assert!(user.get("address").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleTree {
    fields: IndexMap<String, FieldRule>,
}

impl RuleTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a field rule, builder style.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, name: impl Into<String>, rule: impl Into<FieldRule>) -> Self {
        self.fields.insert(name.into(), rule.into());
        self
    }

    /// Inserts a field rule, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, rule: impl Into<FieldRule>) -> Option<FieldRule> {
        self.fields.insert(name.into(), rule.into())
    }

    /// Returns the rule for a field.
    pub fn get(&self, name: &str) -> Option<&FieldRule> {
        self.fields.get(name)
    }

    /// Iterates fields in declaration order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, FieldRule> {
        self.fields.iter()
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the tree has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldRule)> for RuleTree {
    fn from_iter<I: IntoIterator<Item = (K, FieldRule)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RuleTree {
    type Item = (&'a String, &'a FieldRule);
    type IntoIter = indexmap::map::Iter<'a, String, FieldRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{RuleOutcome, rule_fn};
    use serde_json::json;

    fn pass(name: &'static str) -> LeafRule {
        rule_fn(name, |_, _| Ok(RuleOutcome::Pass))
    }

    #[test]
    fn test_field_order_is_preserved() {
        let tree = RuleTree::new()
            .field("zeta", vec![pass("a")])
            .field("alpha", vec![pass("b")])
            .field("mid", FieldRule::Ignored);
        let names: Vec<_> = tree.field_names().collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_insert_replaces() {
        let mut tree = RuleTree::new();
        assert!(tree.insert("a", FieldRule::Ignored).is_none());
        assert!(tree.insert("a", vec![pass("x")]).is_some());
        assert!(matches!(tree.get("a"), Some(FieldRule::Leaves(rules)) if rules.len() == 1));
    }

    #[test]
    fn test_none_is_ignored() {
        let rule: FieldRule = None.into();
        assert!(rule.is_ignored());
    }

    #[test]
    fn test_array_rule_builder() {
        let rule = ArrayRule::new()
            .with_array_rules([pass("len")])
            .with_element_rule(RuleTree::new().field("id", vec![pass("id")]));
        assert_eq!(rule.array_rules().map(<[LeafRule]>::len), Some(1));
        assert!(matches!(rule.element_rule(), Some(FieldRule::Object(_))));
    }

    #[test]
    fn test_factory_produces_rule() {
        let factory = RuleFactory::new(|value, _| {
            if value.is_some() {
                FieldRule::Leaves(Vec::new())
            } else {
                FieldRule::Ignored
            }
        });
        assert!(factory.produce(None, &json!({})).is_ignored());
        assert!(!factory.produce(Some(&json!(1)), &json!({})).is_ignored());
    }

    #[test]
    fn test_from_iterator() {
        let tree: RuleTree = [("a", FieldRule::Ignored), ("b", FieldRule::Ignored)]
            .into_iter()
            .collect();
        assert_eq!(tree.len(), 2);
    }
}

//! Rule node resolution
//!
//! Turns a [`FieldRule`] into exactly one [`RuleNode`] before traversal.
//! Factories are invoked here (once per call) and their product is
//! classified like any other node.

use std::borrow::Cow;

use serde_json::Value;

use crate::foundation::{LeafRule, ValidatorError};
use crate::rules::{ArrayRule, FieldRule, RuleTree};

/// A classified rule node.
#[derive(Debug, Clone, Copy)]
pub enum RuleNode<'r> {
    /// Nothing to evaluate.
    Ignored,
    /// Leaf rules for a primitive value.
    LeafList(&'r [LeafRule]),
    /// A nested rule tree.
    ObjectTree(&'r RuleTree),
    /// An array descriptor.
    ArrayDescriptor(&'r ArrayRule),
}

/// Resolves factories, returning a rule that is no longer a factory.
///
/// Non-factory rules are borrowed as-is. A factory is invoked with
/// `(value, root)`; if it produces another factory the setup is broken and
/// [`ValidatorError::NestedFactory`] is returned.
pub fn resolve<'r>(
    field: &str,
    rule: &'r FieldRule,
    value: Option<&Value>,
    root: &Value,
) -> Result<Cow<'r, FieldRule>, ValidatorError> {
    match rule {
        FieldRule::Factory(factory) => {
            let produced = factory.produce(value, root);
            tracing::trace!(field, produced = kind_name(&produced), "resolved rule factory");
            if produced.is_factory() {
                return Err(ValidatorError::NestedFactory {
                    field: field.to_owned(),
                });
            }
            Ok(Cow::Owned(produced))
        }
        other => Ok(Cow::Borrowed(other)),
    }
}

/// Classifies a resolved rule.
///
/// Fails with [`ValidatorError::NestedFactory`] if handed an unresolved
/// factory.
pub fn classify<'r>(field: &str, rule: &'r FieldRule) -> Result<RuleNode<'r>, ValidatorError> {
    Ok(match rule {
        FieldRule::Ignored => RuleNode::Ignored,
        FieldRule::Leaves(rules) => RuleNode::LeafList(rules),
        FieldRule::Object(tree) => RuleNode::ObjectTree(tree),
        FieldRule::Array(descriptor) => RuleNode::ArrayDescriptor(descriptor),
        FieldRule::Factory(_) => {
            return Err(ValidatorError::NestedFactory {
                field: field.to_owned(),
            });
        }
    })
}

fn kind_name(rule: &FieldRule) -> &'static str {
    match rule {
        FieldRule::Ignored => "ignored",
        FieldRule::Leaves(_) => "leaves",
        FieldRule::Object(_) => "object",
        FieldRule::Array(_) => "array",
        FieldRule::Factory(_) => "factory",
    }
}

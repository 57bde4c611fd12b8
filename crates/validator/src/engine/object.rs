//! Object traversal
//!
//! The rule tree drives enumeration: every declared field is visited, even
//! when the data lacks it, so rules such as `required` see `None`.

use futures::FutureExt;
use futures::TryFutureExt;
use futures::future::{self, BoxFuture, try_join_all};
use serde_json::Value;

use crate::engine::Traversal;
use crate::engine::array::validate_array;
use crate::foundation::{LeafRule, RuleViolation, ValidatorError, ValidatorResult};
use crate::report::{ErrorNode, FieldErrors};
use crate::rules::{FieldRule, RuleNode, RuleTree, classify, resolve};

/// Validates `value` against every field of `tree`.
///
/// All fields start together and are joined; the first setup error wins.
/// The node keeps the tree's field order regardless of completion order.
pub(crate) fn validate_object<'a>(
    tree: &'a RuleTree,
    value: Option<&'a Value>,
    cx: Traversal<'a>,
) -> BoxFuture<'a, ValidatorResult<ErrorNode>> {
    let pending = tree
        .iter()
        .map(move |(field, rule)| validate_rule(field, rule, property(value, field), cx));

    try_join_all(pending)
        .map_ok(move |results| {
            let mut node = ErrorNode::new();
            for ((field, _), errors) in tree.iter().zip(results) {
                node.record(field.clone(), errors);
            }
            node
        })
        .boxed()
}

/// Resolves, classifies and evaluates one rule node against one value.
///
/// Shared by object fields, array elements and single-field validation.
pub(crate) fn validate_rule<'a>(
    field: &'a str,
    rule: &'a FieldRule,
    value: Option<&'a Value>,
    cx: Traversal<'a>,
) -> BoxFuture<'a, ValidatorResult<Option<FieldErrors>>> {
    async move {
        let resolved = resolve(field, rule, value, cx.root)?;
        let errors = match classify(field, &resolved)? {
            RuleNode::Ignored => None,
            RuleNode::LeafList(leaves) => FieldErrors::leaves(run_leaves(leaves, value, cx).await?),
            RuleNode::ObjectTree(tree) => FieldErrors::object(validate_object(tree, value, cx).await?),
            RuleNode::ArrayDescriptor(descriptor) => validate_array(field, descriptor, value, cx)
                .await?
                .map(FieldErrors::Array),
        };
        Ok::<_, ValidatorError>(errors)
    }
    .boxed()
}

/// Runs every leaf rule against `value`.
///
/// No short-circuiting: all leaves run even after a failure. Violations
/// keep declaration order.
pub(crate) fn run_leaves<'a>(
    leaves: &'a [LeafRule],
    value: Option<&'a Value>,
    cx: Traversal<'a>,
) -> BoxFuture<'a, ValidatorResult<Vec<RuleViolation>>> {
    if leaves.is_empty() {
        return future::ok(Vec::new()).boxed();
    }
    try_join_all(
        leaves
            .iter()
            .map(|leaf| leaf.evaluate(value, cx.root, cx.schedule)),
    )
    .map_ok(|outcomes| outcomes.into_iter().flatten().collect())
    .boxed()
}

/// Reads `value?.[field]`.
pub(crate) fn property<'a>(value: Option<&'a Value>, field: &str) -> Option<&'a Value> {
    value.and_then(|v| v.get(field))
}

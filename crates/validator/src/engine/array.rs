//! Array traversal
//!
//! Whole-array rules see the field value as-is (possibly absent or null).
//! Element rules only run over a genuine array; anything else skips them.

use futures::FutureExt;
use futures::TryFutureExt;
use futures::future::{self, BoxFuture, try_join_all};
use serde_json::Value;

use crate::engine::Traversal;
use crate::engine::object::{run_leaves, validate_rule};
use crate::foundation::ValidatorResult;
use crate::report::{ArrayErrors, IndexedError};
use crate::rules::{ArrayRule, FieldRule};

/// Validates an array descriptor against a field value.
///
/// Returns `None` when neither part produced a violation.
pub(crate) fn validate_array<'a>(
    field: &'a str,
    descriptor: &'a ArrayRule,
    value: Option<&'a Value>,
    cx: Traversal<'a>,
) -> BoxFuture<'a, ValidatorResult<Option<ArrayErrors>>> {
    let whole = run_leaves(descriptor.array_rules().unwrap_or_default(), value, cx);
    let elements = validate_elements(
        field,
        descriptor.element_rule(),
        value.and_then(Value::as_array),
        cx,
    );

    future::try_join(whole, elements)
        .map_ok(|(array_errors, element_errors)| ArrayErrors::from_parts(array_errors, element_errors))
        .boxed()
}

/// Validates every element concurrently, keeping failures in index order.
fn validate_elements<'a>(
    field: &'a str,
    rule: Option<&'a FieldRule>,
    items: Option<&'a Vec<Value>>,
    cx: Traversal<'a>,
) -> BoxFuture<'a, ValidatorResult<Vec<IndexedError>>> {
    let (Some(rule), Some(items)) = (rule, items) else {
        return future::ok(Vec::new()).boxed();
    };
    tracing::trace!(field, len = items.len(), "validating array elements");

    let pending = items
        .iter()
        .map(move |item| validate_rule(field, rule, Some(item), cx));

    try_join_all(pending)
        .map_ok(move |results| {
            results
                .into_iter()
                .zip(items)
                .enumerate()
                .filter_map(|(index, (errors, item))| {
                    errors.map(|errors| IndexedError {
                        index,
                        errors,
                        attempted_value: item.clone(),
                    })
                })
                .collect()
        })
        .boxed()
}

//! Leaf rule traits
//!
//! A leaf rule looks at one value (plus the root object for cross-field
//! checks) and reports a [`RuleOutcome`]. Rules come in two flavors:
//!
//! - [`Rule`] answers immediately;
//! - [`AsyncRule`] answers with a future (uniqueness lookups, remote checks).
//!
//! Both are stored behind the type-erased [`LeafRule`] handle that rule
//! trees hold.

use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{self, BoxFuture};
use serde_json::Value;

use crate::foundation::{RuleError, RuleOutcome, RuleViolation, ValidatorError};

// ============================================================================
// RULE TRAITS
// ============================================================================

/// A synchronous leaf rule.
///
/// # Examples
///
/// ```
/// use ruleshape_validator::foundation::{Rule, RuleError, RuleOutcome, RuleViolation};
/// use serde_json::Value;
///
/// struct Even;
///
/// impl Rule for Even {
///     fn name(&self) -> &str {
///         "even"
///     }
///
///     fn check(&self, value: Option<&Value>, _root: &Value) -> Result<RuleOutcome, RuleError> {
///         match value.and_then(Value::as_i64) {
///             Some(n) if n % 2 != 0 => {
///                 Ok(RuleViolation::new("even", value, "Must be even.").into())
///             }
///             _ => Ok(RuleOutcome::Pass),
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Name reported in violations.
    fn name(&self) -> &str;

    /// Checks `value` (absent when `None`) against the rule.
    ///
    /// `root` is the top-level object being validated.
    fn check(&self, value: Option<&Value>, root: &Value) -> Result<RuleOutcome, RuleError>;
}

/// An asynchronous leaf rule.
pub trait AsyncRule: Send + Sync {
    /// Name reported in violations.
    fn name(&self) -> &str;

    /// Checks `value` against the rule, possibly suspending.
    fn check_async<'a>(
        &'a self,
        value: Option<&'a Value>,
        root: &'a Value,
    ) -> BoxFuture<'a, Result<RuleOutcome, RuleError>>;
}

// ============================================================================
// SCHEDULE
// ============================================================================

/// How leaf futures are driven during a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Schedule {
    /// Every leaf must resolve on its first poll.
    Immediate,
    /// Leaves may suspend; siblings run concurrently.
    Concurrent,
}

// ============================================================================
// LEAF RULE HANDLE
// ============================================================================

#[derive(Clone)]
enum LeafKind {
    Sync(Arc<dyn Rule>),
    Async(Arc<dyn AsyncRule>),
}

/// Type-erased, cheaply clonable handle to a leaf rule.
///
/// Every built-in validator converts into a `LeafRule` via `From`.
#[derive(Clone)]
pub struct LeafRule {
    kind: LeafKind,
}

impl LeafRule {
    /// Wraps a synchronous rule.
    pub fn new(rule: impl Rule + 'static) -> Self {
        Self {
            kind: LeafKind::Sync(Arc::new(rule)),
        }
    }

    /// Wraps an asynchronous rule.
    pub fn new_async(rule: impl AsyncRule + 'static) -> Self {
        Self {
            kind: LeafKind::Async(Arc::new(rule)),
        }
    }

    /// Name reported in violations.
    pub fn name(&self) -> &str {
        match &self.kind {
            LeafKind::Sync(rule) => rule.name(),
            LeafKind::Async(rule) => rule.name(),
        }
    }

    /// Returns true if the rule may suspend.
    pub fn is_async(&self) -> bool {
        matches!(self.kind, LeafKind::Async(_))
    }

    /// Runs the rule and normalizes its outcome.
    pub(crate) fn evaluate<'a>(
        &'a self,
        value: Option<&'a Value>,
        root: &'a Value,
        schedule: Schedule,
    ) -> BoxFuture<'a, Result<Option<RuleViolation>, ValidatorError>> {
        match &self.kind {
            LeafKind::Sync(rule) => {
                let result = rule
                    .check(value, root)
                    .map(|outcome| outcome.normalize(rule.name(), value))
                    .map_err(ValidatorError::from);
                future::ready(result).boxed()
            }
            LeafKind::Async(rule) if schedule == Schedule::Immediate => {
                let result = match rule.check_async(value, root).now_or_never() {
                    Some(outcome) => outcome
                        .map(|outcome| outcome.normalize(rule.name(), value))
                        .map_err(ValidatorError::from),
                    None => Err(ValidatorError::Suspended {
                        rule: rule.name().to_owned(),
                    }),
                };
                future::ready(result).boxed()
            }
            LeafKind::Async(rule) => async move {
                let outcome = rule.check_async(value, root).await?;
                Ok::<_, ValidatorError>(outcome.normalize(rule.name(), value))
            }
            .boxed(),
        }
    }
}

impl fmt::Debug for LeafRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeafRule")
            .field("name", &self.name())
            .field("async", &self.is_async())
            .finish()
    }
}

// ============================================================================
// CLOSURE ADAPTERS
// ============================================================================

/// A synchronous rule backed by a closure. See [`rule_fn`].
pub struct FnRule<F> {
    name: Cow<'static, str>,
    check: F,
}

impl<F> Rule for FnRule<F>
where
    F: Fn(Option<&Value>, &Value) -> Result<RuleOutcome, RuleError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, value: Option<&Value>, root: &Value) -> Result<RuleOutcome, RuleError> {
        (self.check)(value, root)
    }
}

/// Creates a synchronous leaf rule from a closure.
///
/// # Examples
///
/// ```
/// use ruleshape_validator::foundation::{RuleOutcome, rule_fn};
///
/// let even = rule_fn("even", |value, _root| {
///     let is_valid = value.and_then(|v| v.as_i64()).is_none_or(|n| n % 2 == 0);
///     Ok(RuleOutcome::verdict(is_valid, Some("Must be even.")))
/// });
/// assert_eq!(even.name(), "even");
/// ```
pub fn rule_fn<F>(name: impl Into<Cow<'static, str>>, check: F) -> LeafRule
where
    F: Fn(Option<&Value>, &Value) -> Result<RuleOutcome, RuleError> + Send + Sync + 'static,
{
    LeafRule::new(FnRule {
        name: name.into(),
        check,
    })
}

/// An asynchronous rule backed by a closure. See [`async_rule_fn`].
pub struct AsyncFnRule<F> {
    name: Cow<'static, str>,
    check: F,
}

impl<F, Fut> AsyncRule for AsyncFnRule<F>
where
    F: Fn(Option<Value>, Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<RuleOutcome, RuleError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn check_async<'a>(
        &'a self,
        value: Option<&'a Value>,
        root: &'a Value,
    ) -> BoxFuture<'a, Result<RuleOutcome, RuleError>> {
        (self.check)(value.cloned(), root.clone()).boxed()
    }
}

/// Creates an asynchronous leaf rule from a closure returning a future.
///
/// The closure receives owned copies of the value and root so the future
/// can be `'static`. Implement [`AsyncRule`] directly to avoid the copies.
pub fn async_rule_fn<F, Fut>(name: impl Into<Cow<'static, str>>, check: F) -> LeafRule
where
    F: Fn(Option<Value>, Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<RuleOutcome, RuleError>> + Send + 'static,
{
    LeafRule::new_async(AsyncFnRule {
        name: name.into(),
        check,
    })
}

// ============================================================================
// TESTS
// ============================================================================

//! Core validation types and traits
//!
//! This module contains the fundamental building blocks every other module
//! is written against:
//!
//! - **Traits**: [`Rule`], [`AsyncRule`] and the type-erased [`LeafRule`]
//! - **Records**: [`RuleViolation`], [`RuleOutcome`]
//! - **Errors**: [`RuleError`], [`ValidatorError`]
//!
//! # Two error channels
//!
//! Data that fails a constraint is *not* an error: a rule reports it as a
//! [`RuleViolation`] and the engine collects it into the error tree. A rule
//! that cannot make sense of its input at all (a string rule given a number)
//! returns `Err(RuleError)`, which aborts the call and reaches the caller as
//! [`ValidatorError::Rule`].
//!
//! ```
//! use ruleshape_validator::foundation::{RuleError, RuleOutcome, RuleViolation, rule_fn};
//! use serde_json::Value;
//!
//! let positive = rule_fn("positive", |value, _root| match value {
//!     None | Some(Value::Null) => Ok(RuleOutcome::Pass),
//!     Some(Value::Number(n)) if n.as_f64().is_some_and(|n| n > 0.0) => Ok(RuleOutcome::Pass),
//!     Some(Value::Number(_)) => Ok(RuleViolation::new("positive", value, "Must be positive.").into()),
//!     Some(other) => Err(RuleError::type_mismatch("positive", "number", other)),
//! });
//! assert!(!positive.is_async());
//! ```

pub mod error;
pub mod traits;
pub mod violation;

pub use error::{RuleError, ValidatorError};
pub(crate) use traits::Schedule;
pub use traits::{AsyncFnRule, AsyncRule, FnRule, LeafRule, Rule, async_rule_fn, rule_fn};
pub use violation::{RuleOutcome, RuleViolation};

/// Result of an engine call.
pub type ValidatorResult<T> = Result<T, ValidatorError>;

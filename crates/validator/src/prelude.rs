//! Prelude module for convenient imports.
//!
//! Provides a single `use ruleshape_validator::prelude::*;` import that
//! brings in the rule model, the entry points, and every built-in rule.
//!
//! # Examples
//!
//! ```
//! use ruleshape_validator::prelude::*;
//! use serde_json::json;
//!
//! let rules = rule_tree! {
//!     "name" => rules![required(), min_length(2)],
//!     "tags" => ArrayRule::new().with_array_rules([array_min_len(1).into()]),
//! };
//! assert!(validate(&json!({"name": "Al", "tags": ["a"]}), &rules).unwrap().is_valid);
//! ```

// ============================================================================
// FOUNDATION: Leaf rule contract and errors
// ============================================================================

pub use crate::foundation::{
    AsyncRule, LeafRule, Rule, RuleError, RuleOutcome, RuleViolation, ValidatorError,
    ValidatorResult, async_rule_fn, rule_fn,
};

// ============================================================================
// RULES AND REPORTS
// ============================================================================

pub use crate::report::{
    ArrayErrors, ErrorNode, FieldErrors, FieldResult, IndexedError, MessageConfig,
    ValidationResult,
};
pub use crate::rules::{ArrayRule, FieldRule, RuleFactory, RuleTree};

// ============================================================================
// ENTRY POINTS
// ============================================================================

pub use crate::engine::{
    validate, validate_async, validate_async_with_messages, validate_field, validate_field_async,
    validate_with_messages,
};
pub use crate::schema::{RuleParams, RuleRegistry};
pub use crate::validator::{Validator, ValidatorBuilder};

// ============================================================================
// VALIDATORS: All built-in rules
// ============================================================================

#[allow(clippy::wildcard_imports)]
pub use crate::validators::*;

// ============================================================================
// MACROS
// ============================================================================

pub use crate::{leaf_rule, rule_tree, rules};

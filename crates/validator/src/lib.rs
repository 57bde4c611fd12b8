//! # ruleshape-validator
//!
//! Declarative, tree-shaped validation of JSON objects.
//!
//! A [`RuleTree`](rules::RuleTree) mirrors the shape of the data it
//! validates: leaf rule lists for primitive fields, nested trees for
//! objects, array descriptors for lists, and factories for rules that
//! depend on the live data. Validation produces a sparse
//! [`ErrorNode`](report::ErrorNode) with the same shape, holding only the
//! fields that failed.
//!
//! ## Quick Start
//!
//! ```rust
//! use ruleshape_validator::prelude::*;
//! use serde_json::json;
//!
//! let rules = RuleTree::new()
//!     .field("name", rules![required()])
//!     .field("address", RuleTree::new().field("street", rules![required()]))
//!     .field(
//!         "items",
//!         ArrayRule::new()
//!             .with_array_rules([array_min_len(1).into()])
//!             .with_element_rule(RuleTree::new().field("price", rules![min(0.0)])),
//!     );
//!
//! let order = json!({"name": "", "items": [{"price": 3}, {"price": -1}]});
//! let result = validate(&order, &rules).unwrap();
//!
//! assert!(!result.is_valid);
//! let errors = result.errors.unwrap();
//! assert!(errors.contains("name"));
//! assert!(errors.contains("address"));
//! assert_eq!(errors.get("items").unwrap().as_array().unwrap().element_errors()[0].index, 1);
//! ```
//!
//! ## Two error channels
//!
//! Invalid data is reported as violations inside the result. A broken
//! setup (a rule given the wrong type, a null object, a malformed schema)
//! is returned as [`ValidatorError`](foundation::ValidatorError).
//!
//! ## Sync and async
//!
//! [`validate`](engine::validate) and [`validate_async`](engine::validate_async)
//! run the same traversal. The async form lets leaf rules suspend and
//! runs sibling fields and array elements concurrently.
//!
//! ## Built-in Rules
//!
//! - **Presence**: [`required`](validators::required)
//! - **Length**: [`min_length`](validators::min_length), [`max_length`](validators::max_length),
//!   [`array_min_len`](validators::array_min_len), [`array_max_len`](validators::array_max_len)
//! - **Numeric**: [`min`](validators::min), [`max`](validators::max),
//!   [`in_range`](validators::in_range), [`sum_between`](validators::sum_between)
//! - **Content**: [`email`](validators::email), [`matches_regex`](validators::matches_regex),
//!   [`one_of`](validators::one_of), [`equals_field`](validators::equals_field)
//! - **Type guards**: [`is_number`](validators::is_number), [`is_string`](validators::is_string),
//!   [`is_array`](validators::is_array)

pub mod engine;
pub mod foundation;
pub mod json;
mod macros;
pub mod prelude;
pub mod report;
pub mod rules;
pub mod schema;
pub mod validator;
pub mod validators;

pub use engine::{validate, validate_async, validate_field, validate_field_async};
pub use validator::Validator;

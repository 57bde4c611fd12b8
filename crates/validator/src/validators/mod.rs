//! Built-in validators
//!
//! Ready-to-use leaf rules. Every rule:
//!
//! - takes its configuration in its factory function (`min_length(3)`)
//! - accepts a custom message through `.with_message(..)`
//! - raises a [`RuleError`](crate::foundation::RuleError) on a value of the
//!   wrong JSON type, rather than recording a violation
//!
//! Absent and null values pass every rule except [`required`] and the
//! array length rules.
//!
//! # Categories
//!
//! - **Presence**: [`required`]
//! - **Length**: [`min_length`], [`max_length`], [`array_min_len`], [`array_max_len`]
//! - **Numeric**: [`min`], [`max`], [`in_range`], [`sum_between`]
//! - **Content**: [`email`], [`matches_regex`], [`one_of`]
//! - **Cross-field**: [`equals_field`]
//! - **Type guards**: [`is_number`], [`is_string`], [`is_array`]
//!
//! # Examples
//!
//! ```
//! use ruleshape_validator::prelude::*;
//!
//! let username = rules![required(), min_length(3), max_length(20)];
//! let age = rules![is_number(), in_range(18.0, 130.0).with_message("Adults only.")];
//! let tags = ArrayRule::new()
//!     .with_array_rules([array_max_len(10).into()])
//!     .with_element_rule(rules![is_string()]);
//! ```

pub mod content;
pub mod cross_field;
pub mod length;
pub mod presence;
pub mod range;
pub mod types;

pub use content::{Email, MatchesRegex, OneOf, email, matches_regex, one_of};
pub use cross_field::{EqualsField, equals_field};
pub use length::{
    ArrayMaxLen, ArrayMinLen, MaxLength, MinLength, array_max_len, array_min_len, max_length,
    min_length,
};
pub use presence::{Required, required};
pub use range::{InRange, Max, Min, SumBetween, in_range, max, min, sum_between};
pub use types::{IsArray, IsNumber, IsString, is_array, is_number, is_string};

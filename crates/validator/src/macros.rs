//! Macros for declaring rules with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`leaf_rule!`]: Create a complete leaf rule (struct + `Rule` impl + factory fn)
//! - [`rules!`]: Build a leaf list from rule values
//! - [`rule_tree!`]: Build a [`RuleTree`](crate::rules::RuleTree) from `"field" => rule` pairs
//!
//! # Examples
//!
//! ```
//! use ruleshape_validator::prelude::*;
//! use serde_json::json;
//!
//! let rules = rule_tree! {
//!     "name" => rules![required(), max_length(40)],
//!     "age" => rules![min(0.0)],
//! };
//!
//! let result = validate(&json!({"name": "Ada", "age": -1}), &rules).unwrap();
//! assert!(!result.is_valid);
//! ```

// ============================================================================
// LEAF RULE MACRO
// ============================================================================

/// Creates a complete leaf rule: struct definition, `Rule` implementation,
/// `From<_> for LeafRule`, constructor, and factory function.
///
/// Every generated rule carries an optional custom message, set with
/// `.with_message(..)`; the `message` block supplies the default.
///
/// The `check` block returns `Result<bool, RuleError>`: `Ok(true)` passes,
/// `Ok(false)` records a violation, `Err` aborts the validation call.
///
/// ```
/// use ruleshape_validator::foundation::{Rule, RuleError};
/// use ruleshape_validator::leaf_rule;
/// use serde_json::Value;
///
/// leaf_rule! {
///     /// Requires an even integer.
///     pub Even {} => "even";
///     check(self, value, _root) {
///         match value {
///             None | Some(Value::Null) => Ok(true),
///             Some(Value::Number(n)) => Ok(n.as_i64().is_some_and(|n| n % 2 == 0)),
///             Some(other) => Err(RuleError::type_mismatch("even", "number", other)),
///         }
///     }
///     message(self) { "Must be even." }
///     fn even();
/// }
///
/// assert_eq!(even().with_message("odd!").name(), "even");
/// ```
#[macro_export]
macro_rules! leaf_rule {
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),* $(,)? } => $rule_name:literal;
        check($self_:ident, $value:ident, $root:ident) $check:block
        message($mself:ident) $message:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $($field: $fty,)*
            message: ::core::option::Option<::std::borrow::Cow<'static, str>>,
        }

        impl $name {
            /// Creates the rule with its default message.
            #[must_use]
            $vis fn new($($field: $fty),*) -> Self {
                Self {
                    $($field,)*
                    message: ::core::option::Option::None,
                }
            }

            /// Replaces the default violation message.
            #[must_use = "builder methods must be chained or built"]
            $vis fn with_message(
                mut self,
                message: impl ::core::convert::Into<::std::borrow::Cow<'static, str>>,
            ) -> Self {
                self.message = ::core::option::Option::Some(message.into());
                self
            }

            #[allow(unused_variables)]
            fn passes(
                &$self_,
                $value: ::core::option::Option<&::serde_json::Value>,
                $root: &::serde_json::Value,
            ) -> ::core::result::Result<bool, $crate::foundation::RuleError> $check

            fn default_message(&$mself) -> ::std::borrow::Cow<'static, str> {
                ::std::borrow::Cow::from($message)
            }
        }

        impl $crate::foundation::Rule for $name {
            fn name(&self) -> &str {
                $rule_name
            }

            fn check(
                &self,
                value: ::core::option::Option<&::serde_json::Value>,
                root: &::serde_json::Value,
            ) -> ::core::result::Result<$crate::foundation::RuleOutcome, $crate::foundation::RuleError> {
                if self.passes(value, root)? {
                    return ::core::result::Result::Ok($crate::foundation::RuleOutcome::Pass);
                }
                let message = self.message.clone().unwrap_or_else(|| self.default_message());
                ::core::result::Result::Ok(
                    $crate::foundation::RuleViolation::new($rule_name, value, message).into(),
                )
            }
        }

        impl ::core::convert::From<$name> for $crate::foundation::LeafRule {
            fn from(rule: $name) -> Self {
                Self::new(rule)
            }
        }

        #[must_use]
        $vis fn $factory($($farg: $faty),*) -> $name {
            $name::new($($farg),*)
        }
    };
}

// ============================================================================
// RULE LIST MACROS
// ============================================================================

/// Builds a [`FieldRule::Leaves`](crate::rules::FieldRule::Leaves) list.
///
/// Each entry is anything convertible into a
/// [`LeafRule`](crate::foundation::LeafRule).
///
/// ```
/// use ruleshape_validator::prelude::*;
///
/// let rule = rules![required(), min_length(3)];
/// assert!(matches!(rule, FieldRule::Leaves(ref leaves) if leaves.len() == 2));
/// ```
#[macro_export]
macro_rules! rules {
    ($($rule:expr),* $(,)?) => {
        $crate::rules::FieldRule::Leaves(::std::vec![
            $(<$crate::foundation::LeafRule as ::core::convert::From<_>>::from($rule)),*
        ])
    };
}

/// Builds a [`RuleTree`](crate::rules::RuleTree) from `"field" => rule` pairs,
/// keeping their order.
///
/// ```
/// use ruleshape_validator::prelude::*;
///
/// let tree = rule_tree! {
///     "street" => rules![required()],
///     "zip" => FieldRule::Ignored,
/// };
/// assert_eq!(tree.field_names().collect::<Vec<_>>(), ["street", "zip"]);
/// ```
#[macro_export]
macro_rules! rule_tree {
    ($($field:expr => $rule:expr),* $(,)?) => {
        $crate::rules::RuleTree::new()
            $(.field($field, $rule))*
    };
}

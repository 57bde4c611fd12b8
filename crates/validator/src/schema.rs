//! Declarative rule trees
//!
//! Rule trees can be described as JSON documents and compiled against a
//! [`RuleRegistry`] of named rule constructors. The document mirrors the
//! rule shapes:
//!
//! | JSON                                           | Rule                         |
//! |------------------------------------------------|------------------------------|
//! | `null` / `false`                               | [`FieldRule::Ignored`]       |
//! | `["required", {"rule": "min_length", "min": 3}]` | [`FieldRule::Leaves`]      |
//! | `{"arrayRules": [..], "arrayElementRule": ..}` | [`FieldRule::Array`]         |
//! | any other object                               | [`FieldRule::Object`]        |
//!
//! A leaf entry is either a rule name or an object naming the rule under
//! `"rule"`, with its parameters alongside and an optional `"message"`.
//! Factories cannot be expressed in JSON; attach them in code after
//! compiling.
//!
//! # Examples
//!
//! ```
//! use ruleshape_validator::prelude::*;
//! use serde_json::json;
//!
//! let document = json!({
//!     "name": ["required", {"rule": "max_length", "max": 40}],
//!     "address": {"zip": [{"rule": "matches_regex", "pattern": "^\\d{5}$", "message": "Five digits."}]},
//!     "tags": {"arrayRules": [{"rule": "array_min_len", "min": 1}], "arrayElementRule": ["is_string"]}
//! });
//!
//! let rules = RuleRegistry::with_builtins().compile(&document).unwrap();
//! let result = validate(&json!({"name": "Ada", "address": {"zip": "123"}, "tags": []}), &rules).unwrap();
//! assert_eq!(result.errors.unwrap().len(), 2);
//! ```

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::foundation::{LeafRule, ValidatorError, ValidatorResult};
use crate::rules::{ArrayRule, FieldRule, RuleTree};
use crate::validators;

const ARRAY_RULES: &str = "arrayRules";
const ARRAY_ELEMENT_RULE: &str = "arrayElementRule";

// ============================================================================
// RULE PARAMS
// ============================================================================

/// Parameters of one leaf entry, handed to its constructor.
#[derive(Debug, Clone, Copy)]
pub struct RuleParams<'a> {
    rule: &'a str,
    params: Option<&'a Map<String, Value>>,
}

impl<'a> RuleParams<'a> {
    /// Name of the rule being built.
    pub fn rule(&self) -> &'a str {
        self.rule
    }

    /// Raw parameter lookup.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.params.and_then(|p| p.get(key))
    }

    /// Custom violation message, if the entry set one.
    pub fn message(&self) -> ValidatorResult<Option<String>> {
        match self.get("message") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.invalid("`message` must be a string")),
        }
    }

    /// Required string parameter.
    pub fn str(&self, key: &str) -> ValidatorResult<&'a str> {
        self.get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| self.invalid(format!("missing string parameter `{key}`")))
    }

    /// Optional string parameter.
    pub fn opt_str(&self, key: &str) -> ValidatorResult<Option<&'a str>> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(_) => self.str(key).map(Some),
        }
    }

    /// Required number parameter.
    pub fn f64(&self, key: &str) -> ValidatorResult<f64> {
        self.get(key)
            .and_then(Value::as_f64)
            .ok_or_else(|| self.invalid(format!("missing numeric parameter `{key}`")))
    }

    /// Required non-negative integer parameter.
    pub fn usize(&self, key: &str) -> ValidatorResult<usize> {
        self.get(key)
            .and_then(Value::as_u64)
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| self.invalid(format!("missing non-negative integer parameter `{key}`")))
    }

    /// Required array parameter.
    pub fn array(&self, key: &str) -> ValidatorResult<&'a [Value]> {
        self.get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .ok_or_else(|| self.invalid(format!("missing array parameter `{key}`")))
    }

    /// An [`InvalidRuleConfig`](ValidatorError::InvalidRuleConfig) error for this rule.
    pub fn invalid(&self, reason: impl Into<String>) -> ValidatorError {
        ValidatorError::invalid_config(self.rule, reason)
    }
}

// ============================================================================
// RULE REGISTRY
// ============================================================================

type Constructor = dyn Fn(&RuleParams<'_>) -> ValidatorResult<LeafRule> + Send + Sync;

/// Named leaf rule constructors.
///
/// # Examples
///
/// ```
/// use ruleshape_validator::prelude::*;
/// use serde_json::{Value, json};
///
/// let mut registry = RuleRegistry::with_builtins();
/// registry.register("slug", |_params| {
///     Ok(rule_fn("slug", |value, _| {
///         let ok = value
///             .and_then(Value::as_str)
///             .is_none_or(|s| s.chars().all(|c| c.is_ascii_lowercase() || c == '-'));
///         Ok(RuleOutcome::verdict(ok, Some("Lowercase letters and dashes only.")))
///     }))
/// });
///
/// let rules = registry.compile(&json!({"path": ["required", "slug"]})).unwrap();
/// assert!(!validate(&json!({"path": "Hello World"}), &rules).unwrap().is_valid);
/// ```
#[derive(Clone, Default)]
pub struct RuleRegistry {
    constructors: IndexMap<String, Arc<Constructor>>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in rule under its rule name.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("required", |p| {
            leaf(validators::required(), p, |r, m| r.with_message(m))
        });
        registry.register("min_length", |p| {
            leaf(validators::min_length(p.usize("min")?), p, |r, m| r.with_message(m))
        });
        registry.register("max_length", |p| {
            leaf(validators::max_length(p.usize("max")?), p, |r, m| r.with_message(m))
        });
        registry.register("min", |p| {
            leaf(validators::min(p.f64("min")?), p, |r, m| r.with_message(m))
        });
        registry.register("max", |p| {
            leaf(validators::max(p.f64("max")?), p, |r, m| r.with_message(m))
        });
        registry.register("in_range", |p| {
            let (min, max) = (p.f64("min")?, p.f64("max")?);
            if min > max {
                return Err(p.invalid(format!("min {min} exceeds max {max}")));
            }
            leaf(validators::in_range(min, max), p, |r, m| r.with_message(m))
        });
        registry.register("array_min_len", |p| {
            leaf(validators::array_min_len(p.usize("min")?), p, |r, m| r.with_message(m))
        });
        registry.register("array_max_len", |p| {
            leaf(validators::array_max_len(p.usize("max")?), p, |r, m| r.with_message(m))
        });
        registry.register("email", |p| {
            leaf(validators::email(), p, |r, m| r.with_message(m))
        });
        registry.register("matches_regex", |p| {
            leaf(validators::matches_regex(p.str("pattern")?)?, p, |r, m| r.with_message(m))
        });
        registry.register("one_of", |p| {
            let values = p.array("values")?.iter().cloned();
            leaf(validators::one_of(values), p, |r, m| r.with_message(m))
        });
        registry.register("equals_field", |p| {
            leaf(validators::equals_field(p.str("field")?), p, |r, m| r.with_message(m))
        });
        registry.register("sum_between", |p| {
            let mut rule = validators::sum_between(p.f64("min")?, p.f64("max")?);
            if let Some(field) = p.opt_str("field")? {
                rule = rule.of_field(field);
            }
            leaf(rule, p, |r, m| r.with_message(m))
        });
        registry.register("is_number", |p| {
            leaf(validators::is_number(), p, |r, m| r.with_message(m))
        });
        registry.register("is_string", |p| {
            leaf(validators::is_string(), p, |r, m| r.with_message(m))
        });
        registry.register("is_array", |p| {
            leaf(validators::is_array(), p, |r, m| r.with_message(m))
        });
        registry
    }

    /// Registers (or replaces) a constructor.
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn(&RuleParams<'_>) -> ValidatorResult<LeafRule> + Send + Sync + 'static,
    {
        self.constructors.insert(name.into(), Arc::new(constructor));
        self
    }

    /// Returns true if a rule with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered rule names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    /// Compiles a rule tree document.
    ///
    /// # Errors
    ///
    /// - [`ValidatorError::MissingRuleTree`] if the document is `null`
    /// - [`ValidatorError::InvalidRule`] for a malformed document or entry
    /// - [`ValidatorError::UnknownRule`] for an unregistered rule name
    /// - [`ValidatorError::InvalidRuleConfig`] for bad rule parameters
    pub fn compile(&self, document: &Value) -> ValidatorResult<RuleTree> {
        let tree = match document {
            Value::Null => return Err(ValidatorError::MissingRuleTree),
            Value::Object(fields) => self.compile_tree(fields)?,
            other => return Err(invalid_rule(other)),
        };
        tracing::debug!(fields = tree.len(), "compiled rule tree");
        Ok(tree)
    }

    /// Compiles one leaf entry: a rule name or a `{"rule": name, ..}` object.
    ///
    /// # Errors
    ///
    /// Same as [`compile`](Self::compile), minus `MissingRuleTree`.
    pub fn build_leaf(&self, entry: &Value) -> ValidatorResult<LeafRule> {
        let params = match entry {
            Value::String(name) => RuleParams {
                rule: name,
                params: None,
            },
            Value::Object(map) => match map.get("rule").and_then(Value::as_str) {
                Some(name) => RuleParams {
                    rule: name,
                    params: Some(map),
                },
                None => return Err(invalid_rule(entry)),
            },
            other => return Err(invalid_rule(other)),
        };
        let constructor = self
            .constructors
            .get(params.rule)
            .ok_or_else(|| ValidatorError::UnknownRule {
                name: params.rule.to_owned(),
            })?;
        constructor(&params)
    }

    fn compile_tree(&self, fields: &Map<String, Value>) -> ValidatorResult<RuleTree> {
        fields
            .iter()
            .map(|(name, rule)| Ok((name.as_str(), self.compile_field(rule)?)))
            .collect()
    }

    fn compile_field(&self, rule: &Value) -> ValidatorResult<FieldRule> {
        match rule {
            Value::Null | Value::Bool(false) => Ok(FieldRule::Ignored),
            Value::Array(entries) => Ok(FieldRule::Leaves(self.compile_leaves(entries)?)),
            Value::Object(map) if map.contains_key(ARRAY_RULES) || map.contains_key(ARRAY_ELEMENT_RULE) => {
                self.compile_array(map).map(FieldRule::Array)
            }
            Value::Object(map) => self.compile_tree(map).map(FieldRule::Object),
            other => Err(invalid_rule(other)),
        }
    }

    fn compile_leaves(&self, entries: &[Value]) -> ValidatorResult<Vec<LeafRule>> {
        entries.iter().map(|entry| self.build_leaf(entry)).collect()
    }

    fn compile_array(&self, map: &Map<String, Value>) -> ValidatorResult<ArrayRule> {
        let mut descriptor = ArrayRule::new();
        match map.get(ARRAY_RULES) {
            None | Some(Value::Null) => {}
            Some(Value::Array(entries)) => {
                descriptor = descriptor.with_array_rules(self.compile_leaves(entries)?);
            }
            Some(other) => return Err(invalid_rule(other)),
        }
        if let Some(element) = map.get(ARRAY_ELEMENT_RULE) {
            descriptor = descriptor.with_element_rule(self.compile_field(element)?);
        }
        Ok(descriptor)
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Applies the entry's custom message and erases the rule type.
fn leaf<R>(
    rule: R,
    params: &RuleParams<'_>,
    with_message: impl FnOnce(R, String) -> R,
) -> ValidatorResult<LeafRule>
where
    LeafRule: From<R>,
{
    let rule = match params.message()? {
        Some(message) => with_message(rule, message),
        None => rule,
    };
    Ok(rule.into())
}

fn invalid_rule(entry: &Value) -> ValidatorError {
    ValidatorError::InvalidRule {
        entry: entry.to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! Rule trees
//!
//! A [`RuleTree`] maps field names to [`FieldRule`]s. Each field rule is one
//! of four shapes (plus "ignored"):
//!
//! | shape | used for |
//! |-------|----------|
//! | [`FieldRule::Leaves`] | primitive fields |
//! | [`FieldRule::Object`] | nested objects |
//! | [`FieldRule::Array`]  | arrays, via an [`ArrayRule`] descriptor |
//! | [`FieldRule::Factory`] | rules computed from the live value and root |
//!
//! The [`resolve`] module turns a node into exactly one [`RuleNode`] before
//! traversal touches it.

pub mod resolve;
pub mod tree;

pub use resolve::{RuleNode, classify, resolve};
pub use tree::{ArrayRule, FieldRule, RuleFactory, RuleTree};

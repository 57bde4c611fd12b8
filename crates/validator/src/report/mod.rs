//! Error trees and validation results
//!
//! - [`ErrorNode`] and friends: the sparse structure mirroring a rule tree
//! - [`ValidationResult`], [`FieldResult`]: what the public entry points return
//! - [`MessageConfig`]: the ok/error message pair

pub mod node;
pub mod result;

pub use node::{ArrayErrors, ErrorNode, FieldErrors, IndexedError};
pub use result::{FieldResult, MessageConfig, ValidationResult};

//! Built-in validation rules.
//!
//! This module contains the single-field rules and the composites built
//! from them.

mod composite;
mod field_rules;

pub use composite::*;
pub use field_rules::*;

//! Core rule trait.

use crate::error::RuleError;
use std::fmt::Debug;

/// A single validation rule applied to a field value.
///
/// Rules bind the parameters of one predicate from [`crate::validators`]
/// (a minimum length, a regex, a label) so they can be stored in a
/// [`crate::RuleSet`] and evaluated against whatever value the field holds
/// when the form is checked.
///
/// ## Example
///
/// ```rust
/// use formguard_validate::{RuleError, ValidationRule};
///
/// #[derive(Debug)]
/// struct NoSpaces;
///
/// impl ValidationRule for NoSpaces {
///     fn validate(&self, value: &str) -> Result<(), RuleError> {
///         if value.contains(' ') {
///             Err(RuleError::new("no_spaces", "Spaces are not allowed"))
///         } else {
///             Ok(())
///         }
///     }
///
///     fn rule_name(&self) -> &'static str {
///         "no_spaces"
///     }
/// }
///
/// assert!(NoSpaces.validate("a b").is_err());
/// ```
pub trait ValidationRule: Debug + Send + Sync {
    /// Validate the value against this rule.
    fn validate(&self, value: &str) -> Result<(), RuleError>;

    /// Get the rule name/code for error reporting.
    fn rule_name(&self) -> &'static str;

    /// Another field whose value this rule needs, if any.
    ///
    /// The engine reads that field through the same accessor and hands it
    /// to [`ValidationRule::validate_against`].
    fn compared_field(&self) -> Option<&str> {
        None
    }

    /// Validate with the value of [`ValidationRule::compared_field`].
    ///
    /// `other` is `None` when the compared field could not be read.
    fn validate_against(&self, value: &str, other: Option<&str>) -> Result<(), RuleError> {
        let _ = other;
        self.validate(value)
    }
}

impl<R: ValidationRule + ?Sized> ValidationRule for Box<R> {
    fn validate(&self, value: &str) -> Result<(), RuleError> {
        (**self).validate(value)
    }

    fn rule_name(&self) -> &'static str {
        (**self).rule_name()
    }

    fn compared_field(&self) -> Option<&str> {
        (**self).compared_field()
    }

    fn validate_against(&self, value: &str, other: Option<&str>) -> Result<(), RuleError> {
        (**self).validate_against(value, other)
    }
}

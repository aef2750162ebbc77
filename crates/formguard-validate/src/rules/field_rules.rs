//! Rules for a single field value.
//!
//! Each rule stores the parameters of one predicate from
//! [`crate::validators`] and delegates to it.

use crate::error::RuleError;
use crate::traits::ValidationRule;
use crate::validators::{self, DEFAULT_LABEL, DEFAULT_MATCH_LABEL, DEFAULT_PATTERN_MESSAGE};
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Required (non-blank) validation rule.
#[derive(Debug, Clone, PartialEq)]
pub struct RequiredRule {
    /// Field label used in the message
    pub label: String,
}

impl Default for RequiredRule {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
        }
    }
}

impl RequiredRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label used in the message.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl ValidationRule for RequiredRule {
    fn validate(&self, value: &str) -> Result<(), RuleError> {
        validators::required(value, &self.label)
    }

    fn rule_name(&self) -> &'static str {
        "required"
    }
}

/// String length validation rule.
///
/// Checks the minimum first, then the maximum. A minimum is not enforced on
/// empty values; pair with [`RequiredRule`] for that.
#[derive(Debug, Clone, PartialEq)]
pub struct LengthRule {
    /// Minimum length (inclusive)
    pub min: Option<usize>,
    /// Maximum length (inclusive)
    pub max: Option<usize>,
    /// Field label used in messages
    pub label: String,
}

impl LengthRule {
    /// Create a length rule with min and max bounds.
    pub fn new(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            label: DEFAULT_LABEL.to_string(),
        }
    }

    /// Create a length rule with only a minimum.
    pub fn min(min: usize) -> Self {
        Self {
            min: Some(min),
            max: None,
            label: DEFAULT_LABEL.to_string(),
        }
    }

    /// Create a length rule with only a maximum.
    pub fn max(max: usize) -> Self {
        Self {
            min: None,
            max: Some(max),
            label: DEFAULT_LABEL.to_string(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl ValidationRule for LengthRule {
    fn validate(&self, value: &str) -> Result<(), RuleError> {
        if let Some(min) = self.min {
            validators::min_length(value, min, &self.label)?;
        }
        if let Some(max) = self.max {
            validators::max_length(value, max, &self.label)?;
        }
        Ok(())
    }

    fn rule_name(&self) -> &'static str {
        match (self.min, self.max) {
            (Some(_), None) => "min_length",
            (None, Some(_)) => "max_length",
            _ => "length",
        }
    }
}

/// Email format validation rule.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EmailRule;

impl ValidationRule for EmailRule {
    fn validate(&self, value: &str) -> Result<(), RuleError> {
        validators::email(value)
    }

    fn rule_name(&self) -> &'static str {
        "email"
    }
}

/// Numeric value validation rule.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberRule {
    pub label: String,
}

impl Default for NumberRule {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
        }
    }
}

impl NumberRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl ValidationRule for NumberRule {
    fn validate(&self, value: &str) -> Result<(), RuleError> {
        validators::number(value, &self.label)
    }

    fn rule_name(&self) -> &'static str {
        "number"
    }
}

/// Numeric range validation rule over the parsed field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeRule {
    /// Minimum value (inclusive)
    pub min: f64,
    /// Maximum value (inclusive)
    pub max: f64,
}

impl RangeRule {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl ValidationRule for RangeRule {
    fn validate(&self, value: &str) -> Result<(), RuleError> {
        validators::range(value, self.min, self.max)
    }

    fn rule_name(&self) -> &'static str {
        "range"
    }
}

/// Regex pattern validation rule.
#[derive(Debug, Clone)]
pub struct PatternRule {
    regex: Regex,
    /// Message reported when the pattern does not match
    pub message: String,
}

impl PatternRule {
    /// Create a pattern rule from a compiled regex.
    pub fn new(regex: Regex, message: impl Into<String>) -> Self {
        Self {
            regex,
            message: message.into(),
        }
    }

    /// Compile `pattern` and build a rule with the default message.
    pub fn parse(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::new(Regex::new(pattern)?, DEFAULT_PATTERN_MESSAGE))
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl PartialEq for PatternRule {
    fn eq(&self, other: &Self) -> bool {
        self.regex.as_str() == other.regex.as_str() && self.message == other.message
    }
}

impl ValidationRule for PatternRule {
    fn validate(&self, value: &str) -> Result<(), RuleError> {
        validators::pattern(value, &self.regex, &self.message)
    }

    fn rule_name(&self) -> &'static str {
        "pattern"
    }
}

/// What a [`MatchRule`] compares the field value with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchTarget {
    /// A fixed value
    Value(String),
    /// The current value of another field
    Field(String),
}

/// Equality validation rule, e.g. password confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRule {
    pub target: MatchTarget,
    pub label: String,
}

impl MatchRule {
    /// Compare against a fixed value.
    pub fn value(expected: impl Into<String>) -> Self {
        Self {
            target: MatchTarget::Value(expected.into()),
            label: DEFAULT_MATCH_LABEL.to_string(),
        }
    }

    /// Compare against the value of another field.
    ///
    /// The other value is only known to a [`crate::FormValidator`] or to a
    /// direct [`ValidationRule::validate_against`] call. Plain
    /// [`ValidationRule::validate`] compares against the empty string.
    pub fn field(other: impl Into<String>) -> Self {
        Self {
            target: MatchTarget::Field(other.into()),
            label: DEFAULT_MATCH_LABEL.to_string(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl ValidationRule for MatchRule {
    fn validate(&self, value: &str) -> Result<(), RuleError> {
        self.validate_against(value, None)
    }

    fn rule_name(&self) -> &'static str {
        "matches"
    }

    fn compared_field(&self) -> Option<&str> {
        match &self.target {
            MatchTarget::Field(name) => Some(name),
            MatchTarget::Value(_) => None,
        }
    }

    fn validate_against(&self, value: &str, other: Option<&str>) -> Result<(), RuleError> {
        match &self.target {
            MatchTarget::Value(expected) => validators::matches(value, expected, &self.label),
            // An unreadable field compares as empty.
            MatchTarget::Field(name) => validators::matches(value, other.unwrap_or(""), &self.label)
                .map_err(|e| e.param("field", name)),
        }
    }
}

/// URL validation rule.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UrlRule;

impl ValidationRule for UrlRule {
    fn validate(&self, value: &str) -> Result<(), RuleError> {
        validators::url(value)
    }

    fn rule_name(&self) -> &'static str {
        "url"
    }
}

/// Phone number validation rule.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhoneRule;

impl ValidationRule for PhoneRule {
    fn validate(&self, value: &str) -> Result<(), RuleError> {
        validators::phone(value)
    }

    fn rule_name(&self) -> &'static str {
        "phone"
    }
}

type Predicate = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Rule backed by a caller-supplied predicate.
///
/// The predicate returns `None` when the value is valid and a message
/// otherwise.
#[derive(Clone)]
pub struct CustomRule {
    predicate: Predicate,
}

impl CustomRule {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
        }
    }
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRule").finish_non_exhaustive()
    }
}

impl ValidationRule for CustomRule {
    fn validate(&self, value: &str) -> Result<(), RuleError> {
        validators::custom(value, |v| (self.predicate)(v))
    }

    fn rule_name(&self) -> &'static str {
        "custom"
    }
}

//! Composite rules that run a whole sub-chain and report every failure.

use crate::error::RuleError;
use crate::rules::field_rules::{LengthRule, PatternRule, RequiredRule};
use crate::traits::ValidationRule;
use crate::validators::username_regex;

/// Separator between the messages of a failing composite.
pub const MESSAGE_SEPARATOR: &str = "; ";

/// Minimum length enforced by [`username_rule`] and [`password_rule`].
pub const CREDENTIAL_MIN_LENGTH: usize = 3;

const USERNAME_PATTERN_MESSAGE: &str =
    "Username may only contain letters, numbers, hyphens and underscores";

/// Runs every sub-rule and joins all failure messages into one error.
///
/// Unlike a field's rule chain, which keeps each failure as a separate
/// entry, a composite collapses its failures into a single message joined
/// with `"; "` in sub-rule order.
#[derive(Debug)]
pub struct CompositeRule {
    code: &'static str,
    rules: Vec<Box<dyn ValidationRule>>,
}

impl CompositeRule {
    /// Create an empty composite reporting under `code`.
    pub fn new(code: &'static str) -> Self {
        Self {
            code,
            rules: Vec::new(),
        }
    }

    /// Append a sub-rule.
    ///
    /// Sub-rules that compare against another field receive that field's
    /// value through [`ValidationRule::validate_against`].
    ///
    /// # Panics
    ///
    /// Panics if `rule` compares against a different field than an earlier
    /// sub-rule. A composite reads at most one other field.
    pub fn rule(mut self, rule: impl ValidationRule + 'static) -> Self {
        if let (Some(existing), Some(added)) = (self.compared_field(), rule.compared_field()) {
            assert_eq!(
                existing, added,
                "composite '{}' already compares against '{existing}'",
                self.code
            );
        }
        self.rules.push(Box::new(rule));
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl ValidationRule for CompositeRule {
    fn validate(&self, value: &str) -> Result<(), RuleError> {
        self.validate_against(value, None)
    }

    fn rule_name(&self) -> &'static str {
        self.code
    }

    fn compared_field(&self) -> Option<&str> {
        self.rules.iter().find_map(|rule| rule.compared_field())
    }

    fn validate_against(&self, value: &str, other: Option<&str>) -> Result<(), RuleError> {
        let failures: Vec<RuleError> = self
            .rules
            .iter()
            .filter_map(|rule| {
                let result = match rule.compared_field() {
                    Some(_) => rule.validate_against(value, other),
                    None => rule.validate(value),
                };
                result.err()
            })
            .collect();

        if failures.is_empty() {
            return Ok(());
        }

        let message = failures
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join(MESSAGE_SEPARATOR);
        let codes: Vec<&str> = failures.iter().map(|e| e.code.as_str()).collect();

        Err(RuleError::new(self.code, message).param("failed", codes))
    }
}

/// Username check: required, at least three characters, and only letters,
/// digits, hyphens or underscores.
pub fn username_rule() -> CompositeRule {
    CompositeRule::new("username")
        .rule(RequiredRule::new().with_label("Username"))
        .rule(LengthRule::min(CREDENTIAL_MIN_LENGTH).with_label("Username"))
        .rule(PatternRule::new(
            username_regex().clone(),
            USERNAME_PATTERN_MESSAGE,
        ))
}

/// Password check: required and at least three characters.
pub fn password_rule() -> CompositeRule {
    CompositeRule::new("password")
        .rule(RequiredRule::new().with_label("Password"))
        .rule(LengthRule::min(CREDENTIAL_MIN_LENGTH).with_label("Password"))
}

//! The form validation engine.

use crate::error::{FormErrors, RuleError};
use crate::host::{AsyncFieldAccessor, ErrorPresenter, FieldAccessor, NoopPresenter};
use crate::registry::{RuleRegistry, RuleSet};
use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;

/// Result of checking a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOutcome {
    /// Every rule passed, or the field has no rules.
    Valid,
    /// At least one rule failed; the errors are in [`FormValidator::errors`].
    Invalid,
    /// The accessor could not resolve the field. Nothing is recorded in the
    /// error state; see [`FormValidator::missing_fields`].
    Missing,
}

impl FieldOutcome {
    pub fn is_valid(self) -> bool {
        matches!(self, FieldOutcome::Valid)
    }

    pub fn is_missing(self) -> bool {
        matches!(self, FieldOutcome::Missing)
    }
}

/// Binds rule chains to named fields and validates a form.
///
/// The validator owns its rule registry and error state. Field values come
/// from `F` and presentation requests go to `P`; each check shows the first
/// failing message of a field, or clears the field when it passes.
///
/// ## Example
///
/// ```rust
/// use formguard_validate::prelude::*;
///
/// let values = FormValues::new().with("user", "ab").with("email", "a@b.com");
/// let mut form = FormValidator::new(values, RecordingPresenter::new());
///
/// form.add_rule("user", RuleSet::new().rule(username_rule()));
/// form.add_rule("email", RuleSet::new().rule(RequiredRule::new()).rule(EmailRule));
///
/// assert!(!form.validate());
/// assert_eq!(
///     form.presenter().message("user"),
///     Some("Username must be at least 3 characters")
/// );
/// assert!(form.errors().get("email").is_none());
/// ```
#[derive(Debug)]
pub struct FormValidator<F, P = NoopPresenter> {
    fields: F,
    presenter: P,
    rules: RuleRegistry,
    errors: FormErrors,
    missing: IndexSet<String>,
}

impl<F, P> FormValidator<F, P> {
    /// Create a validator with no rules.
    pub fn new(fields: F, presenter: P) -> Self {
        Self::with_rules(fields, presenter, RuleRegistry::new())
    }

    /// Create a validator from a prepared registry.
    pub fn with_rules(fields: F, presenter: P, rules: RuleRegistry) -> Self {
        Self {
            fields,
            presenter,
            rules,
            errors: FormErrors::new(),
            missing: IndexSet::new(),
        }
    }

    /// Register the rule chain for a field, replacing any previous one.
    pub fn add_rule(&mut self, field: impl Into<String>, rules: impl Into<RuleSet>) {
        let field = field.into();
        let rules = rules.into();
        tracing::debug!(field = %field, rules = rules.len(), "registered field rules");
        self.rules.insert(field, rules);
    }

    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    /// Current error state: failing fields and all of their errors.
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Current error state as field name to ordered messages.
    pub fn error_messages(&self) -> IndexMap<String, Vec<String>> {
        self.errors.to_message_map()
    }

    /// Fields the accessor could not resolve during the latest checks.
    pub fn missing_fields(&self) -> impl Iterator<Item = &str> {
        self.missing.iter().map(String::as_str)
    }

    pub fn fields(&self) -> &F {
        &self.fields
    }

    /// Mutable access to the field values, e.g. to simulate user input.
    pub fn fields_mut(&mut self) -> &mut F {
        &mut self.fields
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_parts(self) -> (F, P, RuleRegistry) {
        (self.fields, self.presenter, self.rules)
    }

    fn registered_fields(&self) -> Vec<String> {
        self.rules.field_names().map(str::to_owned).collect()
    }
}

impl<F, P: ErrorPresenter> FormValidator<F, P> {
    /// Clear every registered field and empty the error state.
    ///
    /// Rules stay registered; the next [`FormValidator::validate`] applies
    /// them again.
    pub fn clear_errors(&mut self) {
        for field in self.rules.field_names() {
            self.presenter.clear(field);
        }
        self.errors.clear();
        self.missing.clear();
    }

    fn begin_form_pass(&mut self) {
        self.errors.clear();
        self.missing.clear();
    }

    fn record_missing(&mut self, field: &str) -> FieldOutcome {
        tracing::warn!(field = %field, "field not found; treating it as invalid");
        self.errors.remove(field);
        self.missing.insert(field.to_string());
        FieldOutcome::Missing
    }

    fn record(&mut self, field: &str, failures: Vec<RuleError>) -> FieldOutcome {
        self.missing.shift_remove(field);

        match failures.first() {
            Some(first) => {
                self.presenter.show(field, &first.message);
                tracing::debug!(field = %field, errors = failures.len(), "field failed validation");
                self.errors.set(field, failures);
                FieldOutcome::Invalid
            }
            None => {
                self.errors.remove(field);
                self.presenter.clear(field);
                tracing::debug!(field = %field, "field passed validation");
                FieldOutcome::Valid
            }
        }
    }
}

impl<F: FieldAccessor, P: ErrorPresenter> FormValidator<F, P> {
    /// Check one field and report the distinct outcome.
    pub fn check_field(&mut self, field: &str) -> FieldOutcome {
        let Some(value) = self.fields.read(field) else {
            return self.record_missing(field);
        };
        let Some(rules) = self.rules.get(field) else {
            return FieldOutcome::Valid;
        };

        let fields = &self.fields;
        let failures = run_rules(rules, &value, |other| fields.read(other));
        self.record(field, failures)
    }

    /// Check one field; `true` only when the field resolved and every rule
    /// passed.
    pub fn validate_field(&mut self, field: &str) -> bool {
        self.check_field(field).is_valid()
    }

    /// Check every registered field, in registration order.
    ///
    /// Every field is evaluated and presented even after a failure.
    pub fn validate(&mut self) -> bool {
        self.begin_form_pass();

        let mut valid = true;
        for field in self.registered_fields() {
            valid &= self.check_field(&field).is_valid();
        }
        tracing::debug!(valid, failing = self.errors.field_names().len(), "form validated");
        valid
    }
}

impl<F: AsyncFieldAccessor, P: ErrorPresenter> FormValidator<F, P> {
    /// Async counterpart of [`FormValidator::check_field`].
    ///
    /// The field value, and any field its rules compare against, are
    /// awaited before the rules run.
    pub async fn check_field_async(&mut self, field: &str) -> FieldOutcome {
        let Some(value) = self.fields.read_async(field).await else {
            return self.record_missing(field);
        };
        let Some(rules) = self.rules.get(field) else {
            return FieldOutcome::Valid;
        };

        let mut related: HashMap<String, Option<String>> = HashMap::new();
        for other in rules.iter().filter_map(|rule| rule.compared_field()) {
            if !related.contains_key(other) {
                let other_value = self.fields.read_async(other).await;
                related.insert(other.to_string(), other_value);
            }
        }

        let failures = run_rules(rules, &value, |other| related.get(other).cloned().flatten());
        self.record(field, failures)
    }

    pub async fn validate_field_async(&mut self, field: &str) -> bool {
        self.check_field_async(field).await.is_valid()
    }

    /// Async counterpart of [`FormValidator::validate`]. Fields are awaited
    /// one after another, in registration order.
    pub async fn validate_async(&mut self) -> bool {
        self.begin_form_pass();

        let mut valid = true;
        for field in self.registered_fields() {
            valid &= self.check_field_async(&field).await.is_valid();
        }
        valid
    }
}

fn run_rules<L>(rules: &RuleSet, value: &str, lookup: L) -> Vec<RuleError>
where
    L: Fn(&str) -> Option<String>,
{
    rules
        .iter()
        .filter_map(|rule| {
            let result = match rule.compared_field() {
                Some(other) => rule.validate_against(value, lookup(other).as_deref()),
                None => rule.validate(value),
            };
            if let Err(e) = &result {
                tracing::trace!(rule = rule.rule_name(), code = %e.code, "rule failed");
            }
            result.err()
        })
        .collect()
}

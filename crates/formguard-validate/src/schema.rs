//! Declarative form schemas.
//!
//! A schema lists each field with its rule chain as data, so forms can be
//! configured from TOML or JSON instead of code:
//!
//! ```toml
//! name = "signup"
//!
//! [fields]
//! user = [{ type = "username" }]
//! email = [{ type = "required", label = "Email" }, { type = "email" }]
//! age = [{ type = "number", label = "Age" }, { type = "range", min = 18, max = 65 }]
//! ```

use crate::engine::FormValidator;
use crate::error::SchemaError;
use crate::registry::{RuleRegistry, RuleSet};
use crate::rules::{
    password_rule, username_rule, EmailRule, LengthRule, MatchRule, NumberRule, PatternRule,
    PhoneRule, RangeRule, RequiredRule, UrlRule,
};
use crate::traits::ValidationRule;
use crate::validators::DEFAULT_PATTERN_MESSAGE;
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Serializable description of one rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleSpec {
    /// Non-blank value
    Required {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    /// Minimum character count
    MinLength {
        min: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    /// Maximum character count
    MaxLength {
        max: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    /// Email address shape
    Email,
    /// Numeric value
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    /// Numeric range (inclusive)
    Range { min: f64, max: f64 },
    /// Regex pattern
    Pattern {
        pattern: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// Equal to another field's value, or to a fixed value
    Matches {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        field: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    /// Absolute URL
    Url,
    /// Loose phone number
    Phone,
    /// Username composite
    Username,
    /// Password composite
    Password,
}

impl RuleSpec {
    /// Build the rule described here. `field` is only used for error
    /// reporting.
    pub fn build(&self, field: &str) -> Result<Box<dyn ValidationRule>, SchemaError> {
        let rule: Box<dyn ValidationRule> = match self {
            RuleSpec::Required { label } => {
                Box::new(with_label(RequiredRule::new(), label, |r, l| r.with_label(l)))
            }
            RuleSpec::MinLength { min, label } => {
                Box::new(with_label(LengthRule::min(*min), label, |r, l| r.with_label(l)))
            }
            RuleSpec::MaxLength { max, label } => {
                Box::new(with_label(LengthRule::max(*max), label, |r, l| r.with_label(l)))
            }
            RuleSpec::Email => Box::new(EmailRule),
            RuleSpec::Number { label } => {
                Box::new(with_label(NumberRule::new(), label, |r, l| r.with_label(l)))
            }
            RuleSpec::Range { min, max } => Box::new(RangeRule::new(*min, *max)),
            RuleSpec::Pattern { pattern, message } => {
                let regex = Regex::new(pattern).map_err(|source| SchemaError::InvalidPattern {
                    field: field.to_string(),
                    source,
                })?;
                let rule = PatternRule::new(regex, DEFAULT_PATTERN_MESSAGE);
                Box::new(with_label(rule, message, |r, m| r.with_message(m)))
            }
            RuleSpec::Matches {
                field: other,
                value,
                label,
            } => {
                let rule = match (other, value) {
                    (Some(other), None) => MatchRule::field(other),
                    (None, Some(value)) => MatchRule::value(value),
                    _ => {
                        return Err(SchemaError::InvalidRule {
                            field: field.to_string(),
                            reason: "matches needs exactly one of `field` or `value`".to_string(),
                        })
                    }
                };
                Box::new(with_label(rule, label, |r, l| r.with_label(l)))
            }
            RuleSpec::Url => Box::new(UrlRule),
            RuleSpec::Phone => Box::new(PhoneRule),
            RuleSpec::Username => Box::new(username_rule()),
            RuleSpec::Password => Box::new(password_rule()),
        };
        Ok(rule)
    }
}

fn with_label<R>(rule: R, label: &Option<String>, apply: impl FnOnce(R, String) -> R) -> R {
    match label {
        Some(label) => apply(rule, label.clone()),
        None => rule,
    }
}

impl fmt::Display for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSpec::Required { .. } => write!(f, "required"),
            RuleSpec::MinLength { min, .. } => write!(f, "min_length({min})"),
            RuleSpec::MaxLength { max, .. } => write!(f, "max_length({max})"),
            RuleSpec::Email => write!(f, "email"),
            RuleSpec::Number { .. } => write!(f, "number"),
            RuleSpec::Range { min, max } => write!(f, "range({min}, {max})"),
            RuleSpec::Pattern { pattern, .. } => write!(f, "pattern(/{pattern}/)"),
            RuleSpec::Matches {
                field: Some(field), ..
            } => write!(f, "matches({field})"),
            RuleSpec::Matches { value, .. } => {
                write!(f, "matches({:?})", value.as_deref().unwrap_or_default())
            }
            RuleSpec::Url => write!(f, "url"),
            RuleSpec::Phone => write!(f, "phone"),
            RuleSpec::Username => write!(f, "username"),
            RuleSpec::Password => write!(f, "password"),
        }
    }
}

/// A form definition: field names mapped to rule chains, in order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FormSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: IndexMap<String, Vec<RuleSpec>>,
}

impl FormSchema {
    pub fn from_json_str(s: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, SchemaError> {
        Ok(toml::from_str(s)?)
    }

    /// Load a schema file, choosing the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> Result<Self, SchemaError> = match format.as_deref() {
            Some("json") => Self::from_json_str,
            Some("toml") => Self::from_toml_str,
            _ => return Err(SchemaError::UnsupportedFormat(path.to_path_buf())),
        };

        let contents = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let schema = parse(&contents)?;
        tracing::debug!(path = %path.display(), fields = schema.fields.len(), "loaded form schema");
        Ok(schema)
    }

    /// Compile every rule chain into a registry.
    pub fn build_registry(&self) -> Result<RuleRegistry, SchemaError> {
        let mut registry = RuleRegistry::new();
        for (field, specs) in &self.fields {
            let rules = specs
                .iter()
                .map(|spec| spec.build(field))
                .collect::<Result<RuleSet, _>>()?;
            registry.insert(field.clone(), rules);
        }
        Ok(registry)
    }
}

impl<F, P> FormValidator<F, P> {
    /// Create a validator whose rules come from `schema`.
    pub fn from_schema(fields: F, presenter: P, schema: &FormSchema) -> Result<Self, SchemaError> {
        Ok(Self::with_rules(fields, presenter, schema.build_registry()?))
    }
}

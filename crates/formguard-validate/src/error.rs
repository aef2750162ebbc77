//! Error types for rules, form error state and schema loading.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Failure reported by a single validation rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuleError {
    /// The rule code (e.g. "required", "min_length", "email")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional parameters the rule was evaluated with
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub params: HashMap<String, serde_json::Value>,
}

impl RuleError {
    /// Create a new rule error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            params: HashMap::new(),
        }
    }

    /// Add a parameter to the error.
    pub fn param(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.params.insert(key.into(), v);
        }
        self
    }
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for RuleError {}

/// Currently failing fields and their ordered rule errors.
///
/// A field only appears here while it fails; an absent key means the field
/// passed its last check (or has no rules). Iteration follows the order in
/// which fields first failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormErrors {
    #[serde(flatten)]
    fields: IndexMap<String, Vec<RuleError>>,
}

impl FormErrors {
    /// Create an empty error state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the errors recorded for a field.
    ///
    /// An empty list removes the field instead.
    pub fn set(&mut self, field: impl Into<String>, errors: Vec<RuleError>) {
        let field = field.into();
        if errors.is_empty() {
            self.fields.shift_remove(&field);
        } else {
            self.fields.insert(field, errors);
        }
    }

    /// Append a single error for a field.
    pub fn add(&mut self, field: impl Into<String>, error: RuleError) {
        self.fields.entry(field.into()).or_default().push(error);
    }

    /// Drop the entry for a field, returning its errors.
    pub fn remove(&mut self, field: &str) -> Option<Vec<RuleError>> {
        self.fields.shift_remove(field)
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Check if no field is failing.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Total number of rule errors across all fields.
    pub fn len(&self) -> usize {
        self.fields.values().map(Vec::len).sum()
    }

    /// Get errors for a specific field.
    pub fn get(&self, field: &str) -> Option<&[RuleError]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// The message a presenter would display for the field.
    pub fn first_message(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(|errors| errors.first())
            .map(|e| e.message.as_str())
    }

    /// Ordered messages for one field.
    pub fn messages(&self, field: &str) -> Vec<&str> {
        self.fields
            .get(field)
            .map(|errors| errors.iter().map(|e| e.message.as_str()).collect())
            .unwrap_or_default()
    }

    /// Names of all failing fields.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RuleError])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Field name to ordered message strings.
    pub fn to_message_map(&self) -> IndexMap<String, Vec<String>> {
        self.fields
            .iter()
            .map(|(field, errors)| {
                (
                    field.clone(),
                    errors.iter().map(|e| e.message.clone()).collect(),
                )
            })
            .collect()
    }

    /// Convert to Result - Ok if no errors, Err otherwise.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Validation failed: {} error(s) in {} field(s)",
            self.len(),
            self.fields.len()
        )
    }
}

impl std::error::Error for FormErrors {}

/// Errors raised while loading or compiling a form schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("failed to read schema {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON schema: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML schema: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported schema format for {0} (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),

    #[error("invalid pattern for field '{field}': {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid rule for field '{field}': {reason}")]
    InvalidRule { field: String, reason: String },
}

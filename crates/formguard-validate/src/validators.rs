//! Pure validation predicates.
//!
//! Every function here is stateless and deterministic: it inspects a value
//! (plus parameters) and returns `Ok(())` or a [`RuleError`] describing the
//! violated constraint. Most predicates treat an empty value as valid so
//! that optional fields only need `required` when they must be filled in.

use crate::error::RuleError;
use regex::Regex;
use std::sync::OnceLock;

/// Label used in messages when the caller does not name the field.
pub const DEFAULT_LABEL: &str = "Field";

/// Label used by [`matches`] when the caller does not name the fields.
pub const DEFAULT_MATCH_LABEL: &str = "Fields";

/// Message returned by [`pattern`] when none is supplied.
pub const DEFAULT_PATTERN_MESSAGE: &str = "Invalid format";

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

fn phone_regex() -> &'static Regex {
    PHONE_REGEX.get_or_init(|| Regex::new(r"^[\d\s\-\+\(\)]{7,}$").unwrap())
}

/// Letters, digits, hyphens and underscores.
pub fn username_regex() -> &'static Regex {
    USERNAME_REGEX.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap())
}

/// The value must contain something other than whitespace.
pub fn required(value: &str, label: &str) -> Result<(), RuleError> {
    if value.trim().is_empty() {
        return Err(RuleError::new("required", format!("{label} is required")));
    }
    Ok(())
}

/// The value must have at least `min` characters. Empty values pass.
pub fn min_length(value: &str, min: usize, label: &str) -> Result<(), RuleError> {
    let len = value.chars().count();
    if len > 0 && len < min {
        return Err(RuleError::new(
            "min_length",
            format!("{label} must be at least {min} characters"),
        )
        .param("min", min)
        .param("actual", len));
    }
    Ok(())
}

/// The value must have at most `max` characters.
pub fn max_length(value: &str, max: usize, label: &str) -> Result<(), RuleError> {
    let len = value.chars().count();
    if len > max {
        return Err(RuleError::new(
            "max_length",
            format!("{label} must not exceed {max} characters"),
        )
        .param("max", max)
        .param("actual", len));
    }
    Ok(())
}

/// The value must look like `local@domain.tld`. Empty values pass.
pub fn email(value: &str) -> Result<(), RuleError> {
    if !value.is_empty() && !email_regex().is_match(value) {
        return Err(RuleError::new("email", "Invalid email format"));
    }
    Ok(())
}

/// Parse a form value as a number.
///
/// Surrounding whitespace is ignored and a blank value reads as zero.
/// Accepts decimal and exponent notation, unsigned `0x`/`0o`/`0b` integer
/// literals and the exact spellings `Infinity`, `+Infinity` and
/// `-Infinity`. Other words such as `inf` or `NaN` are not numbers.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    match trimmed {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    if let Some(n) = parse_radix_literal(trimmed) {
        return Some(n);
    }

    // f64's parser also takes inf, infinity and nan in any case.
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E'))
    {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

fn parse_radix_literal(value: &str) -> Option<f64> {
    let prefix = value.get(..2)?;
    let radix = match prefix {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &value[2..];
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|digit| acc * f64::from(radix) + f64::from(digit))
    })
}

/// The value must parse as a number. Empty values pass.
pub fn number(value: &str, label: &str) -> Result<(), RuleError> {
    if !value.is_empty() && parse_number(value).is_none() {
        return Err(RuleError::new("number", format!("{label} must be a number")));
    }
    Ok(())
}

/// The value must be a number within `min..=max`. Empty and blank values
/// pass.
///
/// A value that is not a number is out of range.
pub fn range(value: &str, min: f64, max: f64) -> Result<(), RuleError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    match parse_number(value) {
        Some(n) if n >= min && n <= max => Ok(()),
        _ => Err(RuleError::new("range", format!("Must be between {min} and {max}"))
            .param("min", min)
            .param("max", max)),
    }
}

/// The value must match `regex`; otherwise `message` is reported.
/// Empty values pass.
pub fn pattern(value: &str, regex: &Regex, message: &str) -> Result<(), RuleError> {
    if !value.is_empty() && !regex.is_match(value) {
        return Err(RuleError::new("pattern", message).param("pattern", regex.as_str()));
    }
    Ok(())
}

/// Both values must be identical.
pub fn matches(value: &str, other: &str, label: &str) -> Result<(), RuleError> {
    if value != other {
        return Err(RuleError::new("matches", format!("{label} do not match")));
    }
    Ok(())
}

/// The value must parse as an absolute URL. Empty values pass.
pub fn url(value: &str) -> Result<(), RuleError> {
    if value.is_empty() {
        return Ok(());
    }
    url::Url::parse(value)
        .map(|_| ())
        .map_err(|e| RuleError::new("url", "Invalid URL").param("reason", e.to_string()))
}

/// The value must be at least seven digits, spaces, `-`, `+` or
/// parentheses. Empty values pass.
pub fn phone(value: &str) -> Result<(), RuleError> {
    if !value.is_empty() && !phone_regex().is_match(value) {
        return Err(RuleError::new("phone", "Invalid phone number"));
    }
    Ok(())
}

/// Delegate to a caller-supplied predicate that returns a message on failure.
pub fn custom<F>(value: &str, predicate: F) -> Result<(), RuleError>
where
    F: FnOnce(&str) -> Option<String>,
{
    match predicate(value) {
        Some(message) => Err(RuleError::new("custom", message)),
        None => Ok(()),
    }
}

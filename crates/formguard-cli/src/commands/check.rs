//! Check command - validate a values file against a schema

use super::load_schema;
use anyhow::{bail, Context, Result};
use clap::Args;
use console::{style, Emoji};
use formguard_validate::{ErrorPresenter, FormErrors, FormValidator, FormValues, NoopPresenter};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Arguments for the `check` command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Schema file (.toml or .json)
    #[arg(short, long)]
    pub schema: PathBuf,

    /// JSON object mapping field names to values
    #[arg(long)]
    pub values: PathBuf,

    /// Only check this field
    #[arg(short, long)]
    pub field: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

static CHECK: Emoji<'_, '_> = Emoji("✅ ", "+ ");
static WARN: Emoji<'_, '_> = Emoji("⚠️ ", "! ");
static ERROR: Emoji<'_, '_> = Emoji("❌ ", "x ");

/// Prints each presentation request as a line on stdout.
#[derive(Debug, Default)]
struct TerminalPresenter;

impl ErrorPresenter for TerminalPresenter {
    fn show(&mut self, field: &str, message: &str) {
        println!("{} {} {}", ERROR, style(field).bold(), style(message).red());
    }

    fn clear(&mut self, field: &str) {
        println!("{} {}", CHECK, style(field).bold());
    }
}

#[derive(Serialize)]
struct CheckReport<'a> {
    valid: bool,
    errors: &'a FormErrors,
    missing: Vec<&'a str>,
}

/// Validate the values file; `Ok(false)` means the form is invalid.
pub async fn check(args: CheckArgs) -> Result<bool> {
    let schema = load_schema(&args.schema)?;
    let values = load_values(&args.values).await?;

    if args.json {
        let mut form = FormValidator::from_schema(values, NoopPresenter, &schema)?;
        let valid = run(&mut form, args.field.as_deref())?;

        let report = CheckReport {
            valid,
            errors: form.errors(),
            missing: form.missing_fields().collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(valid);
    }

    let title = schema.name.as_deref().unwrap_or("form");
    println!("{}", style(format!("Checking {title}...")).bold());
    println!();

    let mut form = FormValidator::from_schema(values, TerminalPresenter, &schema)?;
    let valid = run(&mut form, args.field.as_deref())?;

    for (field, errors) in form.errors().iter() {
        for error in errors.iter().skip(1) {
            println!("   {} {}", style(field).dim(), style(&error.message).dim());
        }
    }
    for field in form.missing_fields() {
        println!(
            "{} {} {}",
            WARN,
            style(field).bold(),
            style("not present in values").yellow()
        );
    }

    println!();
    if valid {
        println!("{}", style("All fields are valid").green());
    } else {
        let failing = form.errors().field_names().len() + form.missing_fields().count();
        println!(
            "{}",
            style(format!("{failing} field(s) failed validation")).red()
        );
    }

    Ok(valid)
}

fn run<P: ErrorPresenter>(
    form: &mut FormValidator<FormValues, P>,
    field: Option<&str>,
) -> Result<bool> {
    match field {
        Some(field) => {
            if !form.rules().contains(field) {
                bail!("field '{field}' is not defined in the schema");
            }
            Ok(form.validate_field(field))
        }
        None => Ok(form.validate()),
    }
}

/// Read a JSON object of field values. Scalars are turned into their text
/// form; `null` leaves the field out of the form.
async fn load_values(path: &Path) -> Result<FormValues> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("could not read values {}", path.display()))?;
    let json: Value = serde_json::from_str(&contents)
        .with_context(|| format!("invalid JSON in {}", path.display()))?;

    let Value::Object(object) = json else {
        bail!("{} must contain a JSON object", path.display());
    };

    let mut values = FormValues::new();
    for (field, value) in object {
        let text = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Array(_) | Value::Object(_) => {
                bail!("value of '{field}' must be a string, number or boolean")
            }
        };
        values.set(field, text);
    }

    tracing::debug!(path = %path.display(), fields = values.len(), "loaded form values");
    Ok(values)
}

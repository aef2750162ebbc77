//! CLI commands

mod check;
mod rules;

pub use check::{check, CheckArgs};
pub use rules::{list_rules, RulesArgs};

use anyhow::{Context, Result};
use formguard_validate::FormSchema;
use std::path::Path;

fn load_schema(path: &Path) -> Result<FormSchema> {
    FormSchema::load(path).with_context(|| format!("could not load schema {}", path.display()))
}

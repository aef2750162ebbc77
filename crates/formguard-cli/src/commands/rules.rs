//! Rules command - describe a schema

use super::load_schema;
use anyhow::Result;
use clap::Args;
use console::style;
use std::path::PathBuf;

/// Arguments for the `rules` command
#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Schema file (.toml or .json)
    #[arg(short, long)]
    pub schema: PathBuf,
}

/// Print every field with its rule chain, in declaration order
pub async fn list_rules(args: RulesArgs) -> Result<()> {
    let schema = load_schema(&args.schema)?;
    // Compiling catches bad patterns before anything is listed.
    schema.build_registry()?;

    let title = schema.name.as_deref().unwrap_or("form");
    println!("{}", style(title).bold());

    let width = schema.fields.keys().map(String::len).max().unwrap_or(0);
    for (field, specs) in &schema.fields {
        let chain = if specs.is_empty() {
            style("(no rules)".to_string()).dim()
        } else {
            let rendered: Vec<String> = specs.iter().map(ToString::to_string).collect();
            style(rendered.join(" -> ")).cyan()
        };
        println!("  {:width$}  {}", field, chain, width = width);
    }

    Ok(())
}

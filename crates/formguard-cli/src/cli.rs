//! CLI argument parsing

use crate::commands::{self, CheckArgs, RulesArgs};
use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// formguard - check form values against declarative validation rules
#[derive(Parser, Debug)]
#[command(name = "formguard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log engine decisions (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a values file against a schema
    Check(CheckArgs),

    /// List the fields of a schema and their rule chains
    Rules(RulesArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Commands::Check(args) => {
                let valid = commands::check(args).await?;
                Ok(if valid {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                })
            }
            Commands::Rules(args) => {
                commands::list_rules(args).await?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;
use std::process::ExitCode;

pub mod check;
pub mod generate_config;
pub mod list;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check documentation comments in source files
    Check(check::CheckArgs),

    /// Print or write the default configuration
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// Validate a configuration file
    Validate(validate::ValidateArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ListCommands {
    /// List documentation tags and how they are classified
    Tags,

    /// List available output formats
    Formats,
}

impl Commands {
    /// Run the command, returning the process exit code
    pub fn execute(&self) -> Result<ExitCode> {
        match self {
            Commands::Check(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute().map(|()| ExitCode::SUCCESS),
            Commands::Validate(args) => args.execute(),
            Commands::List { subcommand } => {
                list::execute(*subcommand, &mut std::io::stdout().lock())?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

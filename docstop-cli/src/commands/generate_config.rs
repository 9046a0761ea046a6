//! Generate config command implementation

use crate::config::CliConfig;
use anyhow::{Context, Result};
use clap::Args;
use docstop_core::config::default_toml;
use std::fs;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        let template = generate_template()?;

        let Some(output) = &self.output else {
            print!("{template}");
            return Ok(());
        };

        fs::write(output, &template)
            .with_context(|| format!("Failed to write to {}", output.display()))?;

        println!("✓ Configuration generated: {}", output.display());
        println!();
        println!("Next steps:");
        println!("1. Edit the configuration to adjust the rule");
        println!("2. Validate it:");
        println!("   docstop validate --config {}", output.display());
        println!("3. Use it for checking:");
        println!("   docstop check -i 'src/**/*.cs' --config {}", output.display());

        Ok(())
    }
}

/// Default rule configuration followed by the CLI sections
fn generate_template() -> Result<String> {
    let cli_sections = toml::to_string_pretty(&CliConfig::default())
        .context("Failed to serialize CLI configuration")?;

    Ok(format!(
        "{}\n# Command-line settings\n{}",
        default_toml().trim_end(),
        cli_sections
    ))
}

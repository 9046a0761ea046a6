//! Validate command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use anyhow::Result;
use clap::Args;
use docstop_core::RuleConfig;
use std::path::PathBuf;
use std::process::ExitCode;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the configuration file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<ExitCode> {
        println!("Validating configuration: {}", self.config.display());

        let checked = RuleConfig::from_file(&self.config)
            .map_err(CliError::from)
            .and_then(|rules| {
                CliConfig::from_file(&self.config)
                    .map(|cli| (rules, cli))
                    .map_err(|e| CliError::ConfigError(format!("{e:#}")))
            });

        match checked {
            Ok((rules, cli)) => {
                let accepted: String = rules.terminators.accepted.iter().collect();
                println!("✓ Configuration is valid!");
                println!("  Accepted terminators: {accepted}");
                println!("  Inserted terminator: {}", rules.terminators.insert);
                println!(
                    "  Alternative separators: {}",
                    rules.exemptions.alternative_separators.join(", ")
                );
                println!("  Tag overrides: {}", rules.tags.overrides.len());
                println!("  Output format: {}", cli.output.default_format);
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_args_debug() {
        let args = ValidateArgs {
            config: PathBuf::from("docstop.toml"),
        };

        let debug_str = format!("{:?}", args);
        assert!(debug_str.contains("ValidateArgs"));
        assert!(debug_str.contains("docstop.toml"));
    }

    #[test]
    fn test_validate_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[terminators]
accepted = [".", "!"]
insert = "."

[tags.overrides]
remarks = "exempt"

[output]
default_format = "json"
"#
        )
        .unwrap();

        let args = ValidateArgs {
            config: file.path().to_path_buf(),
        };
        assert_eq!(args.execute().unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn test_validate_invalid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[references]\nmax_depth = 0").unwrap();

        let args = ValidateArgs {
            config: file.path().to_path_buf(),
        };
        let err = args.execute().unwrap_err();
        assert!(err.to_string().contains("Validation failed"));
    }

    #[test]
    fn test_validate_unknown_class() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[tags.overrides]\nsee = \"sentence\"").unwrap();

        let args = ValidateArgs {
            config: file.path().to_path_buf(),
        };
        assert!(args.execute().is_err());
    }
}

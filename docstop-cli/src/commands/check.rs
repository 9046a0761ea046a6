//! Check command implementation

use crate::config::{self, CliConfig};
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader};
use crate::output::{
    Diagnostic, JsonFormatter, MarkdownFormatter, OutputFormatter, Summary, TextFormatter,
};
use crate::progress::ProgressReporter;
use crate::resolver::FileResolver;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use docstop_core::{apply_edits, Analyzer, LineIndex, RuleConfig, SourceReport, DEFAULT_PREFIX};
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Arguments for the check command
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: from configuration, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Configuration file (default: ./docstop.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Prefix of documentation comment lines
    #[arg(long, value_name = "PREFIX", default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// Insert missing terminators and write the files back
    #[arg(long)]
    pub fix: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `path:line:column: rule message` line per violation
    Text,
    /// JSON document with diagnostics and totals
    Json,
    /// Markdown table
    Markdown,
}

/// Outcome of checking one file
#[derive(Debug)]
struct FileCheck {
    path: PathBuf,
    /// Content after fixing, or the original content
    source: String,
    report: SourceReport,
    fixed: usize,
}

impl CheckArgs {
    /// Execute the check command
    pub fn execute(&self) -> Result<ExitCode> {
        // Initialize logging based on verbosity
        self.init_logging()?;

        log::info!("Starting documentation check");
        log::debug!("Arguments: {:?}", self);

        if self.prefix.trim().is_empty() {
            return Err(CliError::ConfigError("comment prefix must not be empty".into()).into());
        }

        let (rules, cli_config) = self.load_config()?;
        let analyzer = Analyzer::new(rules).map_err(CliError::from)?;
        let format = self.output_format(&cli_config)?;

        let files = resolve_patterns(&self.input)?;
        log::info!("Checking {} file(s)", files.len());

        let mut progress = ProgressReporter::new(self.quiet || files.len() < 2);
        progress.init_files(files.len() as u64);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(cli_config.performance.worker_threads)
            .build()
            .context("Failed to build worker pool")?;
        let checks = pool.install(|| {
            files
                .par_iter()
                .map(|path| {
                    let check = self.check_file(&analyzer, path);
                    progress.file_completed(&path.display().to_string());
                    check
                })
                .collect::<Result<Vec<_>>>()
        });
        progress.finish();
        let checks = checks?;

        let mut formatter = create_formatter(
            format,
            self.open_output()?,
            cli_config.output.pretty_json,
        );
        let mut summary = Summary {
            files: checks.len(),
            ..Summary::default()
        };
        for check in &checks {
            summary.comments += check.report.comments;
            summary.unreadable += check.report.unreadable.len();
            summary.fixed += check.fixed;
            summary.violations += check.report.violations.len();

            let index = LineIndex::new(&check.source);
            for violation in &check.report.violations {
                let position = index.position(violation.location);
                formatter.format_diagnostic(&Diagnostic::new(&check.path, position, violation))?;
            }
        }
        formatter.finish(&summary)?;

        log::info!(
            "{} file(s), {} comment(s), {} violation(s), {} fixed",
            summary.files,
            summary.comments,
            summary.violations,
            summary.fixed
        );
        if cli_config.output.show_summary && !self.quiet {
            eprintln!("{}", summary_line(&summary));
        }

        Ok(if summary.violations > 0 {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        })
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger installed earlier in the process stays in place.
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }

        Ok(())
    }

    /// Rule and CLI configuration from the configuration file, if any
    fn load_config(&self) -> Result<(RuleConfig, CliConfig)> {
        let Some(path) = config::locate(self.config.as_deref()) else {
            return Ok((RuleConfig::default(), CliConfig::default()));
        };
        log::info!("Using configuration {}", path.display());

        if !path.is_file() {
            return Err(CliError::FileNotFound(path.display().to_string()).into());
        }
        let rules = RuleConfig::from_file(&path).map_err(CliError::from)?;
        let cli_config = CliConfig::from_file(&path)?;
        Ok((rules, cli_config))
    }

    fn output_format(&self, cli_config: &CliConfig) -> Result<OutputFormat> {
        if let Some(format) = self.format {
            return Ok(format);
        }
        OutputFormat::from_str(&cli_config.output.default_format, true).map_err(|_| {
            CliError::ConfigError(format!(
                "unknown output.default_format '{}'",
                cli_config.output.default_format
            ))
            .into()
        })
    }

    fn open_output(&self) -> Result<Box<dyn Write + Send + Sync>> {
        match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Ok(Box::new(BufWriter::new(file)))
            }
            None => Ok(Box::new(io::stdout())),
        }
    }

    /// Check one file, fixing it in place when `--fix` is set
    fn check_file(&self, analyzer: &Analyzer, path: &Path) -> Result<FileCheck> {
        let source = FileReader::read_text(path)?;
        let resolver = FileResolver::for_source(path);
        let report = analyzer.check_source(&source, &self.prefix, &resolver);

        if !report.unreadable.is_empty() {
            let index = LineIndex::new(&source);
            for error in &report.unreadable {
                log::warn!(
                    "{}:{}: skipping unreadable documentation comment: {error}",
                    path.display(),
                    index.position(error.offset())
                );
            }
        }

        if !self.fix || report.edits.is_empty() {
            return Ok(FileCheck {
                path: path.to_path_buf(),
                source,
                report,
                fixed: 0,
            });
        }

        let fixed_source = apply_edits(&source, &report.edits);
        FileReader::write_text(path, &fixed_source)
            .map_err(|e| CliError::ProcessingError(format!("{e:#}")))?;
        log::info!(
            "{}: inserted {} terminator(s)",
            path.display(),
            report.edits.len()
        );

        // Only violations a fix cannot repair are left to report.
        let remaining = analyzer.check_source(&fixed_source, &self.prefix, &resolver);
        Ok(FileCheck {
            path: path.to_path_buf(),
            source: fixed_source,
            fixed: report.edits.len(),
            report: remaining,
        })
    }
}

fn create_formatter(
    format: OutputFormat,
    writer: Box<dyn Write + Send + Sync>,
    pretty_json: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
    }
}

fn summary_line(summary: &Summary) -> String {
    let mut line = format!(
        "Checked {} file(s): {} violation(s)",
        summary.files, summary.violations
    );
    if summary.fixed > 0 {
        line.push_str(&format!(", {} fixed", summary.fixed));
    }
    if summary.unreadable > 0 {
        line.push_str(&format!(", {} unreadable comment(s)", summary.unreadable));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(input: &Path) -> CheckArgs {
        CheckArgs {
            input: vec![input.display().to_string()],
            output: None,
            format: None,
            config: None,
            prefix: DEFAULT_PREFIX.to_string(),
            fix: false,
            quiet: true,
            verbose: 0,
        }
    }

    #[test]
    fn test_check_file_reports_violations() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Widget.cs");
        fs::write(&path, "/// <summary>Widget</summary>\nclass Widget {}\n").unwrap();

        let check = args(&path).check_file(&Analyzer::default(), &path).unwrap();

        assert_eq!(check.report.comments, 1);
        assert_eq!(check.report.violations.len(), 1);
        assert_eq!(check.fixed, 0);
    }

    #[test]
    fn test_check_file_fixes_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Widget.cs");
        fs::write(&path, "/// <summary>Widget</summary>\nclass Widget {}\n").unwrap();

        let mut fix_args = args(&path);
        fix_args.fix = true;
        let check = fix_args.check_file(&Analyzer::default(), &path).unwrap();

        assert_eq!(check.fixed, 1);
        assert!(check.report.violations.is_empty());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "/// <summary>Widget.</summary>\nclass Widget {}\n"
        );
    }

    #[test]
    fn test_output_format_from_config() {
        let check = args(Path::new("a.cs"));
        let mut cli_config = CliConfig::default();

        assert_eq!(check.output_format(&cli_config).unwrap(), OutputFormat::Text);

        cli_config.output.default_format = "Markdown".to_string();
        assert_eq!(
            check.output_format(&cli_config).unwrap(),
            OutputFormat::Markdown
        );

        cli_config.output.default_format = "yaml".to_string();
        assert!(check.output_format(&cli_config).is_err());
    }

    #[test]
    fn test_explicit_format_wins() {
        let mut check = args(Path::new("a.cs"));
        check.format = Some(OutputFormat::Json);

        let mut cli_config = CliConfig::default();
        cli_config.output.default_format = "markdown".to_string();
        assert_eq!(check.output_format(&cli_config).unwrap(), OutputFormat::Json);
    }

    #[test]
    fn test_load_explicit_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("rules.toml");
        fs::write(
            &config_path,
            "[exemptions]\nlead_in_colon = false\n\n[output]\npretty_json = false\n",
        )
        .unwrap();

        let mut check = args(Path::new("a.cs"));
        check.config = Some(config_path);
        let (rules, cli_config) = check.load_config().unwrap();

        assert!(!rules.exemptions.lead_in_colon);
        assert!(!cli_config.output.pretty_json);
    }

    #[test]
    fn test_load_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("rules.toml");
        fs::write(&config_path, "[terminators]\naccepted = []\n").unwrap();

        let mut check = args(Path::new("a.cs"));
        check.config = Some(config_path);
        let err = check.load_config().unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::ConfigError(_))
        ));
    }

    #[test]
    fn test_summary_line() {
        let summary = Summary {
            files: 2,
            violations: 1,
            fixed: 3,
            ..Summary::default()
        };
        assert_eq!(
            summary_line(&summary),
            "Checked 2 file(s): 1 violation(s), 3 fixed"
        );
    }
}

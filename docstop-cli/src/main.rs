//! docstop command-line entry point

use clap::Parser;
use docstop_cli::commands::Commands;
use std::process::ExitCode;

/// Check that documentation comment prose ends with a period
#[derive(Debug, Parser)]
#[command(name = "docstop", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

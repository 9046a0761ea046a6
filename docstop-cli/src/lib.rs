//! docstop CLI library
//!
//! This library provides the command-line interface for the docstop
//! documentation terminator checker.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;
pub mod resolver;

pub use error::{CliError, CliResult};

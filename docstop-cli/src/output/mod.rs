//! Output formatting module

use anyhow::Result;
use docstop_core::{Position, Violation, RULE_ID};
use serde::Serialize;
use std::path::Path;

/// One violation, located for humans
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub path: String,
    pub line: usize,
    pub column: usize,
    pub rule: &'static str,
    pub key: &'static str,
    pub message: &'static str,
    pub fixable: bool,
}

impl Diagnostic {
    /// Diagnostic for `violation` found at `position` in `path`
    pub fn new(path: &Path, position: Position, violation: &Violation) -> Self {
        Self {
            path: path.display().to_string(),
            line: position.line,
            column: position.column,
            rule: RULE_ID,
            key: violation.kind.message_key(),
            message: violation.kind.message(),
            fixable: violation.fixable,
        }
    }
}

/// Totals of one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Files checked
    pub files: usize,
    /// Documentation comments found
    pub comments: usize,
    /// Violations reported
    pub violations: usize,
    /// Terminators inserted by `--fix`
    pub fixed: usize,
    /// Comments whose markup could not be read
    pub unreadable: usize,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output a single diagnostic
    fn format_diagnostic(&mut self, diagnostic: &Diagnostic) -> Result<()>;

    /// Finalize output (e.g., close JSON document)
    fn finish(&mut self, summary: &Summary) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

#[cfg(test)]
pub(crate) fn sample_diagnostic() -> Diagnostic {
    Diagnostic::new(
        Path::new("src/Widget.cs"),
        Position { line: 3, column: 15 },
        &Violation::local(42),
    )
}

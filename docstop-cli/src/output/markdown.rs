//! Markdown output formatter

use super::{Diagnostic, OutputFormatter, Summary};
use anyhow::Result;
use std::io::Write;

/// Markdown formatter - outputs diagnostics as a table
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    diagnostic_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            diagnostic_count: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_diagnostic(&mut self, d: &Diagnostic) -> Result<()> {
        if self.diagnostic_count == 0 {
            writeln!(self.writer, "| File | Line | Column | Rule | Message |")?;
            writeln!(self.writer, "|------|------|--------|------|---------|")?;
        }
        self.diagnostic_count += 1;
        writeln!(
            self.writer,
            "| `{}` | {} | {} | {} | {} |",
            d.path, d.line, d.column, d.rule, d.message
        )?;
        Ok(())
    }

    fn finish(&mut self, summary: &Summary) -> Result<()> {
        if self.diagnostic_count == 0 {
            writeln!(self.writer, "No violations found.")?;
        }
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(
            self.writer,
            "*Total violations: {} in {} file(s)*",
            summary.violations, summary.files
        )?;
        if summary.fixed > 0 {
            writeln!(self.writer, "*Fixed: {}*", summary.fixed)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

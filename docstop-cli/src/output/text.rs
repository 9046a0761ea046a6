//! Plain text output formatter

use super::{Diagnostic, OutputFormatter, Summary};
use anyhow::Result;
use std::io::Write;

/// Plain text formatter - outputs one `path:line:column` diagnostic per line
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_diagnostic(&mut self, d: &Diagnostic) -> Result<()> {
        writeln!(
            self.writer,
            "{}:{}:{}: {} {}",
            d.path, d.line, d.column, d.rule, d.message
        )?;
        Ok(())
    }

    fn finish(&mut self, _summary: &Summary) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

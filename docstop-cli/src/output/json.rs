//! JSON output formatter

use super::{Diagnostic, OutputFormatter, Summary};
use anyhow::Result;
use serde::Serialize;
use std::io::Write;

/// JSON formatter - outputs diagnostics and totals as one document
pub struct JsonFormatter<W: Write> {
    writer: W,
    diagnostics: Vec<Diagnostic>,
    pretty: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    diagnostics: &'a [Diagnostic],
    summary: &'a Summary,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            diagnostics: Vec::new(),
            pretty,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_diagnostic(&mut self, diagnostic: &Diagnostic) -> Result<()> {
        self.diagnostics.push(diagnostic.clone());
        Ok(())
    }

    fn finish(&mut self, summary: &Summary) -> Result<()> {
        let report = Report {
            diagnostics: &self.diagnostics,
            summary,
        };
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &report)?;
        } else {
            serde_json::to_writer(&mut self.writer, &report)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::sample_diagnostic;

    #[test]
    fn test_json_document() {
        let mut formatter = JsonFormatter::new(Vec::new(), false);
        formatter.format_diagnostic(&sample_diagnostic()).unwrap();
        formatter
            .finish(&Summary {
                files: 1,
                comments: 2,
                violations: 1,
                ..Summary::default()
            })
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&formatter.writer).unwrap();
        assert_eq!(value["diagnostics"][0]["line"], 3);
        assert_eq!(value["diagnostics"][0]["rule"], "DOC1629");
        assert_eq!(value["diagnostics"][0]["key"], "missing-terminator");
        assert_eq!(value["summary"]["violations"], 1);
        assert_eq!(value["summary"]["comments"], 2);
    }

    #[test]
    fn test_empty_report() {
        let mut formatter = JsonFormatter::new(Vec::new(), true);
        formatter.finish(&Summary::default()).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&formatter.writer).unwrap();
        assert_eq!(value["diagnostics"].as_array().map(Vec::len), Some(0));
    }
}

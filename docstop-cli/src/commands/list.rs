//! List command implementation

use super::check::OutputFormat;
use super::ListCommands;
use anyhow::Result;
use clap::ValueEnum;
use docstop_core::{Attributes, DocTag, ElementClass};
use std::io::Write;

/// Write the requested listing to `writer`
pub fn execute<W: Write>(subcommand: ListCommands, writer: &mut W) -> Result<()> {
    match subcommand {
        ListCommands::Tags => list_tags(writer),
        ListCommands::Formats => list_formats(writer),
    }
}

fn list_tags<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "Documentation tags:")?;
    for tag in DocTag::ALL {
        writeln!(writer, "  {:<14} {}", tag.name(), describe(tag))?;
    }
    writeln!(writer)?;
    writeln!(
        writer,
        "Unknown tags are {}, or {} when self-closing.",
        ElementClass::Block,
        ElementClass::Inline
    )?;
    Ok(())
}

/// Class of `tag`, noting the element shapes that change it
fn describe(tag: DocTag) -> String {
    let bare = Attributes::new();
    let located: Attributes = [("file", "-"), ("path", "-")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let open = tag.class(&bare, false);
    let self_closing = tag.class(&bare, true);
    let with_locator = tag.class(&located, true);

    if with_locator != self_closing {
        format!("{with_locator} ({self_closing} without file and path)")
    } else if open != self_closing {
        format!("{open} ({self_closing} when self-closing)")
    } else {
        open.to_string()
    }
}

fn list_formats<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "Output formats:")?;
    for format in OutputFormat::value_variants() {
        if let Some(value) = format.to_possible_value() {
            let help = value.get_help().map(ToString::to_string).unwrap_or_default();
            writeln!(writer, "  {:<10} {help}", value.get_name())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(subcommand: ListCommands) -> String {
        let mut out = Vec::new();
        execute(subcommand, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_list_tags() {
        let out = listing(ListCommands::Tags);

        assert!(out.contains("summary"));
        assert!(out.contains("para           block (paragraph_separator when self-closing)"));
        assert!(out.contains("include        reference (exempt without file and path)"));
        assert!(out.contains("code           opaque"));
        assert_eq!(out.lines().filter(|l| l.starts_with("  ")).count(), DocTag::ALL.len());
    }

    #[test]
    fn test_list_formats() {
        let out = listing(ListCommands::Formats);

        assert!(out.contains("text"));
        assert!(out.contains("json"));
        assert!(out.contains("markdown"));
    }
}

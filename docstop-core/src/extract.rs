//! Documentation comments in source files
//!
//! A documentation comment is a run of consecutive lines whose first
//! non-blank text is the comment prefix (`///` by default). The extracted
//! text keeps every byte in place: indentation and prefixes are replaced by
//! spaces, so offsets in the markup read from it are offsets into the
//! source file.

use crate::error::ReadError;
use crate::markup::{MarkupNode, Span};

/// Default prefix of documentation comment lines
pub const DEFAULT_PREFIX: &str = "///";

/// One documentation comment block of a source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocComment {
    /// Span of the block in the source, from its first line start to the
    /// end of its last line
    pub span: Span,
    /// Source text of the span with indentation and prefixes blanked out
    pub masked: String,
}

impl DocComment {
    /// Read the comment's markup, with spans relative to the source file
    pub fn read(&self) -> Result<Vec<MarkupNode>, ReadError> {
        crate::reader::read_fragment(&self.masked, self.span.start)
    }
}

/// Collect the documentation comments of `source`
///
/// Lines where the prefix is immediately followed by its own last character
/// again (`////` for `///`) are ordinary comments and end a block.
pub fn extract_doc_comments(source: &str, prefix: &str) -> Vec<DocComment> {
    let mut comments = Vec::new();
    let mut current: Option<DocComment> = None;
    let mut line_start = 0;

    for line in source.split_inclusive('\n') {
        let body = line.strip_suffix('\n').unwrap_or(line);
        match prefix_end(body, prefix) {
            Some(masked_len) => {
                let block = current.get_or_insert_with(|| DocComment {
                    span: Span::at(line_start),
                    masked: String::new(),
                });
                if !block.masked.is_empty() {
                    block.masked.push('\n');
                }
                block.masked.extend(std::iter::repeat(' ').take(masked_len));
                block.masked.push_str(&body[masked_len..]);
                block.span = Span::new(block.span.start, line_start + body.len());
            }
            None => comments.extend(current.take()),
        }
        line_start += line.len();
    }

    comments.extend(current);
    log::debug!("found {} documentation comment(s)", comments.len());
    comments
}

/// Byte length of indentation plus prefix, when `line` is a doc line
fn prefix_end(line: &str, prefix: &str) -> Option<usize> {
    let content = line.trim_start();
    let rest = content.strip_prefix(prefix)?;
    if prefix.chars().next_back().is_some_and(|last| rest.starts_with(last)) {
        return None;
    }
    Some(line.len() - rest.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "namespace TestNamespace
{
    /// <summary>
    /// Test class
    /// </summary>
    public class TestClass
    {
        //// <summary>Not documentation</summary>
        /// <summary>Method</summary>
        public void M() { }
    }
}
";

    #[test]
    fn test_blocks_are_grouped() {
        let comments = extract_doc_comments(SOURCE, DEFAULT_PREFIX);

        assert_eq!(comments.len(), 2);
        let first = &comments[0];
        assert_eq!(
            &SOURCE[first.span.start..first.span.end],
            "    /// <summary>\n    /// Test class\n    /// </summary>"
        );
        assert_eq!(first.masked, "        <summary>\n        Test class\n        </summary>");
        assert_eq!(first.masked.len(), first.span.len());
    }

    #[test]
    fn test_offsets_map_to_source() {
        let comments = extract_doc_comments(SOURCE, DEFAULT_PREFIX);
        let nodes = comments[0].read().unwrap();
        let summary = nodes.iter().find(|n| n.tag() == Some("summary")).unwrap();

        let span = summary.span();
        assert!(SOURCE[span.start..].starts_with("<summary>"));
        assert!(SOURCE[..span.end].ends_with("</summary>"));
    }

    #[test]
    fn test_quadruple_slash_breaks_block() {
        let comments = extract_doc_comments(SOURCE, DEFAULT_PREFIX);
        let second = &comments[1];

        assert!(second.masked.trim().starts_with("<summary>Method"));
        assert!(!second.masked.contains("Not documentation"));
    }

    #[test]
    fn test_crlf_and_missing_final_newline() {
        let source = "/// <summary>\r\n/// Text\r\n/// </summary>";
        let comments = extract_doc_comments(source, DEFAULT_PREFIX);

        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].span, Span::new(0, source.len()));
        assert_eq!(comments[0].masked.len(), source.len());
    }

    #[test]
    fn test_custom_prefix() {
        let source = "--! <summary>Lua</summary>\nlocal x = 1\n";
        let comments = extract_doc_comments(source, "--!");

        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].masked, "    <summary>Lua</summary>");
    }

    #[test]
    fn test_no_comments() {
        assert!(extract_doc_comments("fn main() {}\n// plain\n", DEFAULT_PREFIX).is_empty());
    }
}

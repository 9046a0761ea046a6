//! Reader for documentation markup fragments
//!
//! Turns the XML-like text of a documentation comment into [`MarkupNode`]s.
//! It understands elements, quoted attributes, self-closing elements and
//! character data; comments and processing instructions are skipped. CDATA
//! sections become text nodes covering the whole section, markers included.
//! Entity references are left in the text untouched so that every text node
//! covers exactly its source bytes.

use crate::error::ReadError;
use crate::markup::{Attributes, MarkupNode, Span};

/// Read a markup fragment whose first byte sits at absolute offset `base`
pub fn read_fragment(text: &str, base: usize) -> Result<Vec<MarkupNode>, ReadError> {
    Reader::new(text, base).read()
}

struct Open {
    tag: String,
    attributes: Attributes,
    start: usize,
    children: Vec<MarkupNode>,
}

struct Reader<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    base: usize,
    stack: Vec<Open>,
    root: Vec<MarkupNode>,
}

impl<'a> Reader<'a> {
    fn new(text: &'a str, base: usize) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            base,
            stack: Vec::new(),
            root: Vec::new(),
        }
    }

    fn read(mut self) -> Result<Vec<MarkupNode>, ReadError> {
        let mut text_start = self.pos;

        while self.pos < self.bytes.len() {
            if self.bytes[self.pos] != b'<' {
                self.pos += 1;
                continue;
            }

            self.flush_text(text_start, self.pos);
            if self.starts_with("<!--") {
                self.skip_past("-->")?;
            } else if self.starts_with("<![CDATA[") {
                let start = self.pos;
                self.skip_past("]]>")?;
                self.flush_text(start, self.pos);
            } else if self.starts_with("<!") {
                return Err(ReadError::Unsupported {
                    what: "markup declaration",
                    offset: self.abs(self.pos),
                });
            } else if self.starts_with("<?") {
                self.skip_past("?>")?;
            } else if self.starts_with("</") {
                self.read_end_tag()?;
            } else {
                self.read_start_tag()?;
            }
            text_start = self.pos;
        }
        self.flush_text(text_start, self.pos);

        if let Some(open) = self.stack.pop() {
            return Err(ReadError::Unclosed {
                tag: open.tag,
                offset: self.abs(open.start),
            });
        }
        Ok(self.root)
    }

    fn read_start_tag(&mut self) -> Result<(), ReadError> {
        let start = self.pos;
        self.pos += 1;
        let tag = self.read_name(start)?;
        let mut attributes = Attributes::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => {
                    return Err(ReadError::UnexpectedEof {
                        offset: self.abs(self.pos),
                    })
                }
                Some(b'/') => {
                    if self.bytes.get(self.pos + 1) != Some(&b'>') {
                        return Err(ReadError::MalformedTag {
                            offset: self.abs(start),
                        });
                    }
                    self.pos += 2;
                    let span = Span::new(self.abs(start), self.abs(self.pos));
                    self.push(MarkupNode::element(tag, attributes, Vec::new(), span, true));
                    return Ok(());
                }
                Some(b'>') => {
                    self.pos += 1;
                    self.stack.push(Open {
                        tag,
                        attributes,
                        start,
                        children: Vec::new(),
                    });
                    return Ok(());
                }
                Some(_) => {
                    let (name, value) = self.read_attribute(start)?;
                    attributes.insert(name, value);
                }
            }
        }
    }

    fn read_end_tag(&mut self) -> Result<(), ReadError> {
        let start = self.pos;
        self.pos += 2;
        let found = self.read_name(start)?;
        self.skip_whitespace();
        match self.peek() {
            Some(b'>') => self.pos += 1,
            None => {
                return Err(ReadError::UnexpectedEof {
                    offset: self.abs(self.pos),
                })
            }
            Some(_) => {
                return Err(ReadError::MalformedTag {
                    offset: self.abs(start),
                })
            }
        }

        let Some(open) = self.stack.pop() else {
            return Err(ReadError::UnexpectedClose {
                tag: found,
                offset: self.abs(start),
            });
        };
        if open.tag != found {
            return Err(ReadError::MismatchedTag {
                expected: open.tag,
                found,
                offset: self.abs(start),
            });
        }

        let span = Span::new(self.abs(open.start), self.abs(self.pos));
        self.push(MarkupNode::element(
            open.tag,
            open.attributes,
            open.children,
            span,
            false,
        ));
        Ok(())
    }

    fn read_attribute(&mut self, tag_start: usize) -> Result<(String, String), ReadError> {
        let name = self.read_name(tag_start)?;
        self.skip_whitespace();
        if self.peek() != Some(b'=') {
            return Err(ReadError::MalformedTag {
                offset: self.abs(tag_start),
            });
        }
        self.pos += 1;
        self.skip_whitespace();

        let quote = match self.peek() {
            Some(q @ (b'"' | b'\'')) => q,
            None => {
                return Err(ReadError::UnexpectedEof {
                    offset: self.abs(self.pos),
                })
            }
            Some(_) => {
                return Err(ReadError::MalformedTag {
                    offset: self.abs(tag_start),
                })
            }
        };
        self.pos += 1;
        let value_start = self.pos;
        let Some(len) = self.bytes[value_start..].iter().position(|&b| b == quote) else {
            return Err(ReadError::UnexpectedEof {
                offset: self.abs(self.bytes.len()),
            });
        };
        self.pos = value_start + len + 1;

        Ok((name, self.text[value_start..value_start + len].to_string()))
    }

    fn read_name(&mut self, tag_start: usize) -> Result<String, ReadError> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b':' | b'.') || b >= 0x80
            {
                self.pos += 1;
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(ReadError::MalformedTag {
                offset: self.abs(tag_start),
            });
        }
        Ok(self.text[start..self.pos].to_string())
    }

    fn flush_text(&mut self, start: usize, end: usize) {
        if start < end {
            let span = Span::new(self.abs(start), self.abs(end));
            self.push(MarkupNode::text(&self.text[start..end], span));
        }
    }

    fn push(&mut self, node: MarkupNode) {
        match self.stack.last_mut() {
            Some(open) => open.children.push(node),
            None => self.root.push(node),
        }
    }

    fn skip_past(&mut self, terminator: &str) -> Result<(), ReadError> {
        match self.text[self.pos..].find(terminator) {
            Some(found) => {
                self.pos += found + terminator.len();
                Ok(())
            }
            None => Err(ReadError::UnexpectedEof {
                offset: self.abs(self.bytes.len()),
            }),
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.bytes[self.pos..].starts_with(prefix.as_bytes())
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn abs(&self, local: usize) -> usize {
        self.base + local
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_nested_elements() {
        let markup = r#"<summary>Test <see cref="ITest"/> done</summary>"#;
        let nodes = read_fragment(markup, 0).unwrap();

        assert_eq!(nodes.len(), 1);
        let summary = &nodes[0];
        assert_eq!(summary.tag(), Some("summary"));
        assert_eq!(summary.span(), Span::new(0, markup.len()));

        let children = summary.children();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0], MarkupNode::text("Test ", Span::new(9, 14)));
        assert_eq!(children[1].tag(), Some("see"));
        assert_eq!(children[1].attribute("cref"), Some("ITest"));
        assert_eq!(children[1].span(), Span::new(14, 33));
        assert!(matches!(children[1], MarkupNode::Element { self_closing: true, .. }));
    }

    #[test]
    fn test_base_offset_applies_to_all_spans() {
        let nodes = read_fragment("<para>Hi</para>", 100).unwrap();

        assert_eq!(nodes[0].span(), Span::new(100, 115));
        assert_eq!(nodes[0].children()[0].span(), Span::new(106, 108));
    }

    #[test]
    fn test_single_quoted_attributes() {
        let nodes = read_fragment("<include file='Doc.xml' path='/TestClass/*'/>", 0).unwrap();

        assert_eq!(nodes[0].attribute("file"), Some("Doc.xml"));
        assert_eq!(nodes[0].attribute("path"), Some("/TestClass/*"));
    }

    #[test]
    fn test_comments_and_declarations_are_skipped() {
        let markup = "<?xml version=\"1.0\"?>\n<!-- note -->\n<root>x</root>";
        let nodes = read_fragment(markup, 0).unwrap();

        let elements: Vec<_> = nodes.iter().filter_map(|n| n.tag()).collect();
        assert_eq!(elements, vec!["root"]);
    }

    #[test]
    fn test_unclosed_element() {
        let err =
            read_fragment("<TestClass><summary>Test class<summary></TestClass>", 0).unwrap_err();
        assert!(matches!(err, ReadError::MismatchedTag { .. }));

        let err = read_fragment("<summary>Test class", 0).unwrap_err();
        assert_eq!(
            err,
            ReadError::Unclosed {
                tag: "summary".to_string(),
                offset: 0
            }
        );
    }

    #[test]
    fn test_stray_close_tag() {
        let err = read_fragment("text</summary>", 7).unwrap_err();
        assert_eq!(
            err,
            ReadError::UnexpectedClose {
                tag: "summary".to_string(),
                offset: 11
            }
        );
    }

    #[test]
    fn test_malformed_tags() {
        assert!(matches!(
            read_fragment("< summary>", 0),
            Err(ReadError::MalformedTag { offset: 0 })
        ));
        assert!(matches!(
            read_fragment("<see cref=ITest/>", 0),
            Err(ReadError::MalformedTag { .. })
        ));
        assert!(matches!(
            read_fragment("<see cref=\"ITest", 0),
            Err(ReadError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_cdata_becomes_text() {
        let markup = "<code><![CDATA[x < y]]></code>";
        let nodes = read_fragment(markup, 0).unwrap();

        let children = nodes[0].children();
        assert_eq!(children.len(), 1);
        assert_eq!(
            children[0],
            MarkupNode::text("<![CDATA[x < y]]>", Span::new(6, markup.len() - "</code>".len()))
        );
    }

    #[test]
    fn test_unterminated_cdata() {
        assert!(matches!(
            read_fragment("<code><![CDATA[x < y</code>", 0),
            Err(ReadError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_declarations_are_rejected() {
        assert!(matches!(
            read_fragment("<!DOCTYPE doc><doc/>", 3),
            Err(ReadError::Unsupported { offset: 3, .. })
        ));
    }

    #[test]
    fn test_multibyte_text_spans() {
        let markup = "<summary>日本語</summary>";
        let nodes = read_fragment(markup, 0).unwrap();
        let text = &nodes[0].children()[0];

        assert_eq!(text.span(), Span::new(9, 9 + "日本語".len()));
    }
}

//! Documentation markup tree
//!
//! A comment arrives as an ordered list of [`MarkupNode`]s whose spans are
//! absolute byte offsets into the text the comment was read from. Trees are
//! immutable once built; every analysis pass only borrows them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Half-open byte range `[start, end)` in the analysed text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Offset of the first byte
    pub start: usize,
    /// Offset one past the last byte
    pub end: usize,
}

impl Span {
    /// Create a span from its two offsets
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} after end {end}");
        Self { start, end }
    }

    /// Zero-width span at `offset`
    pub fn at(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no bytes
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `offset` lies inside the span (end exclusive)
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// Element attributes, ordered by name for stable output
pub type Attributes = BTreeMap<String, String>;

/// One node of a documentation comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkupNode {
    /// Raw character data; `content` is exactly the text covered by `span`
    Text { content: String, span: Span },
    /// A markup element such as `<summary>` or `<see cref="T"/>`
    Element {
        tag: String,
        #[serde(default)]
        attributes: Attributes,
        #[serde(default)]
        children: Vec<MarkupNode>,
        span: Span,
        #[serde(default)]
        self_closing: bool,
    },
}

impl MarkupNode {
    /// Create a text node
    pub fn text(content: impl Into<String>, span: Span) -> Self {
        MarkupNode::Text {
            content: content.into(),
            span,
        }
    }

    /// Create an element node
    pub fn element(
        tag: impl Into<String>,
        attributes: Attributes,
        children: Vec<MarkupNode>,
        span: Span,
        self_closing: bool,
    ) -> Self {
        MarkupNode::Element {
            tag: tag.into(),
            attributes,
            children,
            span,
            self_closing,
        }
    }

    /// Span of the whole node, including start and end tags
    pub fn span(&self) -> Span {
        match self {
            MarkupNode::Text { span, .. } | MarkupNode::Element { span, .. } => *span,
        }
    }

    /// Tag name for elements, `None` for text
    pub fn tag(&self) -> Option<&str> {
        match self {
            MarkupNode::Element { tag, .. } => Some(tag),
            MarkupNode::Text { .. } => None,
        }
    }

    /// Attribute value of an element
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            MarkupNode::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            MarkupNode::Text { .. } => None,
        }
    }

    /// Child nodes; text has none
    pub fn children(&self) -> &[MarkupNode] {
        match self {
            MarkupNode::Element { children, .. } => children,
            MarkupNode::Text { .. } => &[],
        }
    }

    /// True for text nodes holding nothing but whitespace
    pub fn is_blank_text(&self) -> bool {
        matches!(self, MarkupNode::Text { content, .. } if content.trim().is_empty())
    }
}

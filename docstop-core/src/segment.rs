//! Paragraph-unit segmentation
//!
//! A comment is cut into *paragraph units*: maximal runs of text and inline
//! elements bounded by block edges, paragraph separators and nested
//! structural elements. Every non-trivial unit must end with a terminator.
//!
//! The walk is a fold over each child list. The unit in progress is threaded
//! through the fold by value and completed units are pushed to the output of
//! the call that closed them; nested blocks produce their own segment lists
//! which are appended in document order.

use crate::classify::{Classifier, ElementClass};
use crate::markup::{MarkupNode, Span};

/// Where a paragraph unit ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tail {
    /// Last significant character and the offset right after it
    Char { ch: char, end: usize },
    /// A trailing inline element ending at `end`
    Inline { end: usize },
}

impl Tail {
    /// Offset right after the last significant content
    pub fn end(&self) -> usize {
        match self {
            Tail::Char { end, .. } | Tail::Inline { end } => *end,
        }
    }

    /// Last significant character, when the unit ends on text
    pub fn char(&self) -> Option<char> {
        match self {
            Tail::Char { ch, .. } => Some(*ch),
            Tail::Inline { .. } => None,
        }
    }
}

/// A run of prose that must end with a terminator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParagraphUnit {
    /// Text of the unit's text nodes; inline element content is excluded
    pub text: String,
    /// Last significant content
    pub tail: Option<Tail>,
    /// Whether an inline element is part of the unit
    pub has_inline: bool,
    /// Whether more content follows the unit inside its section
    pub followed: bool,
}

impl ParagraphUnit {
    /// Units with nothing but whitespace are never checked
    pub fn is_trivial(&self) -> bool {
        !self.has_inline && self.text.trim().is_empty()
    }

    fn push_text(&mut self, content: &str, span: Span) {
        self.text.push_str(content);

        let trimmed = content.trim_end();
        if let Some(ch) = trimmed.chars().next_back() {
            self.tail = Some(Tail::Char {
                ch,
                end: span.start + trimmed.len(),
            });
        }
    }

    fn push_inline(&mut self, span: Span) {
        self.has_inline = true;
        self.tail = Some(Tail::Inline { end: span.end });
    }
}

/// Output of the segmenter, in document order
#[derive(Debug, Clone, PartialEq)]
pub enum Segment<'a> {
    /// A paragraph unit to be checked (possibly trivial)
    Unit(ParagraphUnit),
    /// A reference element to hand to the reference adapter
    Reference(&'a MarkupNode),
}

/// Splits markup trees into paragraph units
#[derive(Debug, Clone, Copy)]
pub struct Segmenter<'c> {
    classifier: &'c Classifier,
}

impl<'c> Segmenter<'c> {
    /// Create a segmenter using `classifier` for element classes
    pub fn new(classifier: &'c Classifier) -> Self {
        Self { classifier }
    }

    /// Segment the top-level nodes of a comment
    ///
    /// Each top-level element is its own section: a unit at the end of one
    /// section is never considered followed by the next section.
    pub fn segment<'a>(&self, nodes: &'a [MarkupNode]) -> Vec<Segment<'a>> {
        let mut out = Vec::new();
        let rest = self.fold(nodes, Context::Sections, ParagraphUnit::default(), &mut out);
        out.push(Segment::Unit(rest));
        out
    }

    /// Segment the children of one block element
    fn segment_block<'a>(&self, children: &'a [MarkupNode], followed: bool) -> Vec<Segment<'a>> {
        let mut out = Vec::new();
        let mut rest = self.fold(
            children,
            Context::Block { followed },
            ParagraphUnit::default(),
            &mut out,
        );
        rest.followed = followed;
        out.push(Segment::Unit(rest));
        out
    }

    fn fold<'a>(
        &self,
        children: &'a [MarkupNode],
        context: Context,
        mut current: ParagraphUnit,
        out: &mut Vec<Segment<'a>>,
    ) -> ParagraphUnit {
        let content_from = self.content_suffix(children);
        // Whether anything of substance follows position `index` in this list.
        let followed_at = |index: usize| match context {
            Context::Sections => false,
            Context::Block { followed } => content_from[index] || followed,
        };

        for (index, child) in children.iter().enumerate() {
            let (nested, span) = match child {
                MarkupNode::Text { content, span } => {
                    current.push_text(content, *span);
                    continue;
                }
                MarkupNode::Element { children, span, .. } => (children, span),
            };

            let Some(class) = self.classifier.classify_node(child) else {
                continue;
            };
            match class {
                ElementClass::Inline if self.has_structure(nested) => {
                    let inner = Context::Block {
                        followed: followed_at(index + 1),
                    };
                    current = self.fold(nested, inner, current, out);
                    // A unit emptied by a trailing separator stays trivial.
                    if current.tail.is_some() {
                        current.push_inline(*span);
                    }
                }
                ElementClass::Inline => current.push_inline(*span),
                ElementClass::ParagraphSeparator => {
                    current.followed = followed_at(index + 1);
                    out.push(Segment::Unit(std::mem::take(&mut current)));
                }
                ElementClass::Block => {
                    current.followed = followed_at(index);
                    out.push(Segment::Unit(std::mem::take(&mut current)));
                    out.extend(self.segment_block(nested, followed_at(index + 1)));
                }
                ElementClass::Reference => {
                    current.followed = followed_at(index);
                    out.push(Segment::Unit(std::mem::take(&mut current)));
                    out.push(Segment::Reference(child));
                }
                ElementClass::Opaque | ElementClass::Exempt => {
                    current.followed = followed_at(index);
                    out.push(Segment::Unit(std::mem::take(&mut current)));
                }
            }
        }

        current
    }

    /// `suffix[i]` is true when `children[i..]` holds any content
    fn content_suffix(&self, children: &[MarkupNode]) -> Vec<bool> {
        let mut suffix = vec![false; children.len() + 1];
        for (index, child) in children.iter().enumerate().rev() {
            let is_content = match child {
                MarkupNode::Text { content, .. } => !content.trim().is_empty(),
                MarkupNode::Element { .. } => {
                    self.classifier.classify_node(child) != Some(ElementClass::ParagraphSeparator)
                }
            };
            suffix[index] = is_content || suffix[index + 1];
        }
        suffix
    }

    /// Whether an inline element hides separators or blocks inside it
    fn has_structure(&self, children: &[MarkupNode]) -> bool {
        children.iter().any(|child| match self.classifier.classify_node(child) {
            None => false,
            Some(ElementClass::Inline) => self.has_structure(child.children()),
            Some(_) => true,
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum Context {
    /// The top-level list of a comment
    Sections,
    /// Children of a block; `followed` tells whether content follows the block
    Block { followed: bool },
}

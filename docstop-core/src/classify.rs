//! Classification of documentation elements

use crate::markup::{Attributes, MarkupNode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// How an element takes part in paragraph segmentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementClass {
    /// Embedded in running prose; never terminates a sentence
    Inline,
    /// Holds one or more complete sentences
    Block,
    /// Self-closing paragraph break splitting the surrounding text
    ParagraphSeparator,
    /// Never checked, whatever its content
    Exempt,
    /// Not prose (code); never checked
    Opaque,
    /// Content lives elsewhere and is checked through a resolver
    Reference,
}

impl ElementClass {
    /// Configuration name of the class
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementClass::Inline => "inline",
            ElementClass::Block => "block",
            ElementClass::ParagraphSeparator => "paragraph_separator",
            ElementClass::Exempt => "exempt",
            ElementClass::Opaque => "opaque",
            ElementClass::Reference => "reference",
        }
    }
}

impl fmt::Display for ElementClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Documentation tags with a built-in meaning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocTag {
    Summary,
    Remarks,
    Example,
    Returns,
    Value,
    TypeParam,
    Param,
    Para,
    Note,
    Exception,
    Permission,
    List,
    Item,
    Description,
    ListHeader,
    Term,
    See,
    SeeAlso,
    ParamRef,
    TypeParamRef,
    C,
    Code,
    Bold,
    Italic,
    Underline,
    Anchor,
    LineBreak,
    Include,
    InheritDoc,
}

impl DocTag {
    /// Every built-in tag, in table order
    pub const ALL: [DocTag; 29] = [
        DocTag::Summary,
        DocTag::Remarks,
        DocTag::Example,
        DocTag::Returns,
        DocTag::Value,
        DocTag::TypeParam,
        DocTag::Param,
        DocTag::Para,
        DocTag::Note,
        DocTag::Exception,
        DocTag::Permission,
        DocTag::List,
        DocTag::Item,
        DocTag::Description,
        DocTag::ListHeader,
        DocTag::Term,
        DocTag::See,
        DocTag::SeeAlso,
        DocTag::ParamRef,
        DocTag::TypeParamRef,
        DocTag::C,
        DocTag::Code,
        DocTag::Bold,
        DocTag::Italic,
        DocTag::Underline,
        DocTag::Anchor,
        DocTag::LineBreak,
        DocTag::Include,
        DocTag::InheritDoc,
    ];

    /// Look up a tag by its element name (case-sensitive, as in XML)
    pub fn from_name(name: &str) -> Option<Self> {
        let tag = match name {
            "summary" => DocTag::Summary,
            "remarks" => DocTag::Remarks,
            "example" => DocTag::Example,
            "returns" => DocTag::Returns,
            "value" => DocTag::Value,
            "typeparam" => DocTag::TypeParam,
            "param" => DocTag::Param,
            "para" => DocTag::Para,
            "note" => DocTag::Note,
            "exception" => DocTag::Exception,
            "permission" => DocTag::Permission,
            "list" => DocTag::List,
            "item" => DocTag::Item,
            "description" => DocTag::Description,
            "listheader" => DocTag::ListHeader,
            "term" => DocTag::Term,
            "see" => DocTag::See,
            "seealso" => DocTag::SeeAlso,
            "paramref" => DocTag::ParamRef,
            "typeparamref" => DocTag::TypeParamRef,
            "c" => DocTag::C,
            "code" => DocTag::Code,
            "b" => DocTag::Bold,
            "i" => DocTag::Italic,
            "u" => DocTag::Underline,
            "a" => DocTag::Anchor,
            "br" => DocTag::LineBreak,
            "include" => DocTag::Include,
            "inheritdoc" => DocTag::InheritDoc,
            _ => return None,
        };
        Some(tag)
    }

    /// Element name of the tag
    pub fn name(&self) -> &'static str {
        match self {
            DocTag::Summary => "summary",
            DocTag::Remarks => "remarks",
            DocTag::Example => "example",
            DocTag::Returns => "returns",
            DocTag::Value => "value",
            DocTag::TypeParam => "typeparam",
            DocTag::Param => "param",
            DocTag::Para => "para",
            DocTag::Note => "note",
            DocTag::Exception => "exception",
            DocTag::Permission => "permission",
            DocTag::List => "list",
            DocTag::Item => "item",
            DocTag::Description => "description",
            DocTag::ListHeader => "listheader",
            DocTag::Term => "term",
            DocTag::See => "see",
            DocTag::SeeAlso => "seealso",
            DocTag::ParamRef => "paramref",
            DocTag::TypeParamRef => "typeparamref",
            DocTag::C => "c",
            DocTag::Code => "code",
            DocTag::Bold => "b",
            DocTag::Italic => "i",
            DocTag::Underline => "u",
            DocTag::Anchor => "a",
            DocTag::LineBreak => "br",
            DocTag::Include => "include",
            DocTag::InheritDoc => "inheritdoc",
        }
    }

    /// Class of the tag given the shape of the element carrying it
    pub fn class(&self, attributes: &Attributes, self_closing: bool) -> ElementClass {
        match self {
            DocTag::Summary
            | DocTag::Remarks
            | DocTag::Example
            | DocTag::Returns
            | DocTag::Value
            | DocTag::TypeParam
            | DocTag::Param
            | DocTag::Note
            | DocTag::Exception
            | DocTag::Permission
            | DocTag::List
            | DocTag::Item
            | DocTag::Description => ElementClass::Block,
            DocTag::Para if self_closing => ElementClass::ParagraphSeparator,
            DocTag::Para => ElementClass::Block,
            DocTag::LineBreak => ElementClass::ParagraphSeparator,
            DocTag::Term
            | DocTag::See
            | DocTag::ParamRef
            | DocTag::TypeParamRef
            | DocTag::C
            | DocTag::Bold
            | DocTag::Italic
            | DocTag::Underline
            | DocTag::Anchor => ElementClass::Inline,
            DocTag::SeeAlso | DocTag::ListHeader => ElementClass::Exempt,
            DocTag::Code => ElementClass::Opaque,
            // An include without a locator can never be resolved.
            DocTag::Include
                if attributes.contains_key("file") && attributes.contains_key("path") =>
            {
                ElementClass::Reference
            }
            DocTag::Include => ElementClass::Exempt,
            DocTag::InheritDoc => ElementClass::Reference,
        }
    }
}

/// Classify an element by tag name, attributes and shape
///
/// Total over all inputs: unknown tags are `Block`, or `Inline` when
/// self-closing.
pub fn classify(tag: &str, attributes: &Attributes, self_closing: bool) -> ElementClass {
    match DocTag::from_name(tag) {
        Some(known) => known.class(attributes, self_closing),
        None if self_closing => ElementClass::Inline,
        None => ElementClass::Block,
    }
}

/// Classifier with per-tag overrides layered over [`classify`]
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    overrides: HashMap<String, ElementClass>,
}

impl Classifier {
    /// Classifier using the built-in table only
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifier whose overrides win over the built-in table
    pub fn with_overrides(overrides: HashMap<String, ElementClass>) -> Self {
        Self { overrides }
    }

    /// Class of an element
    pub fn classify(&self, tag: &str, attributes: &Attributes, self_closing: bool) -> ElementClass {
        if let Some(class) = self.overrides.get(tag) {
            return *class;
        }
        let class = classify(tag, attributes, self_closing);
        if DocTag::from_name(tag).is_none() {
            log::trace!("unknown tag <{tag}> classified as {class}");
        }
        class
    }

    /// Class of a node; `None` for text
    pub fn classify_node(&self, node: &MarkupNode) -> Option<ElementClass> {
        match node {
            MarkupNode::Element {
                tag,
                attributes,
                self_closing,
                ..
            } => Some(self.classify(tag, attributes, *self_closing)),
            MarkupNode::Text { .. } => None,
        }
    }
}

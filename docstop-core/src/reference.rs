//! External and inherited documentation
//!
//! Include and inheritdoc elements defer their content to somewhere else.
//! The engine never fetches that content itself: it asks an injected
//! [`ReferenceResolver`] and checks whatever comes back. Findings inside
//! resolved content are collapsed into one non-fixable violation reported
//! on the referencing element, and anything that cannot be resolved is left
//! alone.

use crate::check::Violation;
use crate::classify::DocTag;
use crate::markup::MarkupNode;
use crate::reader::read_fragment;
use std::collections::HashMap;

/// Where a reference element points
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReferenceLocator {
    /// `<include file="..." path="..."/>`
    Include { file: String, path: String },
    /// `<inheritdoc/>`, optionally naming the member to inherit from
    Inherited { cref: Option<String> },
}

impl ReferenceLocator {
    /// Locator carried by `node`, if it is a reference element
    pub fn from_node(node: &MarkupNode) -> Option<Self> {
        match node.tag().and_then(DocTag::from_name)? {
            DocTag::Include => Some(ReferenceLocator::Include {
                file: node.attribute("file")?.to_string(),
                path: node.attribute("path")?.to_string(),
            }),
            DocTag::InheritDoc => Some(ReferenceLocator::Inherited {
                cref: node.attribute("cref").map(str::to_string),
            }),
            _ => None,
        }
    }
}

/// Outcome of resolving a reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The referenced markup
    Resolved(Vec<MarkupNode>),
    /// Missing, unreadable or otherwise unusable target
    Unresolved,
}

/// Supplies the content behind reference elements
///
/// Implementations may perform I/O. A failure is final for the current
/// pass: the engine does not retry.
pub trait ReferenceResolver: Send + Sync {
    /// Resolve a locator to markup
    fn resolve(&self, locator: &ReferenceLocator) -> Resolution;
}

/// Resolver that never resolves anything
#[derive(Debug, Clone, Copy, Default)]
pub struct Unresolvable;

impl ReferenceResolver for Unresolvable {
    fn resolve(&self, _locator: &ReferenceLocator) -> Resolution {
        Resolution::Unresolved
    }
}

/// In-memory resolver keyed by file name and inherited member
#[derive(Debug, Clone, Default)]
pub struct MapResolver {
    documents: HashMap<String, Vec<MarkupNode>>,
    inherited: HashMap<String, Vec<MarkupNode>>,
}

impl MapResolver {
    /// Create an empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an already-read document under `file`
    pub fn insert_document(&mut self, file: impl Into<String>, nodes: Vec<MarkupNode>) {
        self.documents.insert(file.into(), nodes);
    }

    /// Read `text` and register it under `file`
    ///
    /// Unreadable text is not registered, so references to it stay
    /// unresolved.
    pub fn insert_text(&mut self, file: impl Into<String>, text: &str) {
        let file = file.into();
        match read_fragment(text, 0) {
            Ok(nodes) => self.insert_document(file, nodes),
            Err(e) => log::debug!("not registering unreadable document {file}: {e}"),
        }
    }

    /// Register the documentation an inheritdoc resolves to
    ///
    /// An empty `cref` key stands for inheritdoc elements without `cref`.
    pub fn insert_inherited(&mut self, cref: impl Into<String>, nodes: Vec<MarkupNode>) {
        self.inherited.insert(cref.into(), nodes);
    }
}

impl ReferenceResolver for MapResolver {
    fn resolve(&self, locator: &ReferenceLocator) -> Resolution {
        match locator {
            ReferenceLocator::Include { file, path } => {
                let Some(document) = self.documents.get(file) else {
                    return Resolution::Unresolved;
                };
                let selected = select_path(document, path);
                if selected.is_empty() {
                    Resolution::Unresolved
                } else {
                    Resolution::Resolved(selected)
                }
            }
            ReferenceLocator::Inherited { cref } => {
                let key = cref.as_deref().unwrap_or("");
                match self.inherited.get(key) {
                    Some(nodes) => Resolution::Resolved(nodes.clone()),
                    None => Resolution::Unresolved,
                }
            }
        }
    }
}

/// Select elements from a document with a `/A/B/*` style path
///
/// Each segment keeps the elements with that tag among the children of the
/// current selection (the document's top-level nodes for the first
/// segment); `*` keeps every element.
pub fn select_path(nodes: &[MarkupNode], path: &str) -> Vec<MarkupNode> {
    let mut segments = path.split('/').filter(|s| !s.is_empty()).peekable();
    if segments.peek().is_none() {
        return Vec::new();
    }

    let mut candidates: Vec<&MarkupNode> = nodes.iter().collect();
    let mut selected: Vec<&MarkupNode> = Vec::new();
    while let Some(segment) = segments.next() {
        selected = candidates
            .into_iter()
            .filter(|node| match node.tag() {
                Some(tag) => segment == "*" || tag == segment,
                None => false,
            })
            .collect();
        candidates = selected.iter().flat_map(|node| node.children()).collect();
    }

    selected.into_iter().cloned().collect()
}

/// Checks reference elements through a resolver
pub struct ReferenceAdapter<'r> {
    resolver: &'r dyn ReferenceResolver,
    max_depth: usize,
}

impl<'r> ReferenceAdapter<'r> {
    /// Create an adapter giving up after `max_depth` nested resolutions
    pub fn new(resolver: &'r dyn ReferenceResolver, max_depth: usize) -> Self {
        Self {
            resolver,
            max_depth,
        }
    }

    /// Check one reference element found at nesting `depth`
    ///
    /// `check_content` runs the full check over resolved markup at the next
    /// depth. Returns at most one violation, located on `node`.
    pub fn check<F>(&self, node: &MarkupNode, depth: usize, check_content: F) -> Option<Violation>
    where
        F: FnOnce(&[MarkupNode], usize) -> Vec<Violation>,
    {
        if depth >= self.max_depth {
            log::warn!(
                "reference at offset {} nested deeper than {}; not checked",
                node.span().start,
                self.max_depth
            );
            return None;
        }

        let Some(locator) = ReferenceLocator::from_node(node) else {
            log::debug!("element at offset {} carries no locator", node.span().start);
            return None;
        };

        match self.resolver.resolve(&locator) {
            Resolution::Unresolved => {
                log::debug!("suppressing unresolved reference {locator:?}");
                None
            }
            Resolution::Resolved(content) => {
                let found = check_content(&content, depth + 1);
                if found.is_empty() {
                    None
                } else {
                    log::trace!(
                        "{} violation(s) behind {locator:?}, reported once",
                        found.len()
                    );
                    Some(Violation::referenced(node.span()))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::ViolationKind;
    use crate::markup::Span;

    const METHOD_DOC: &str = r#"<?xml version="1.0" encoding="utf-8" ?>
<TestClass>
  <TestMethod>
    <summary>Test method</summary>
    <returns>Some value</returns>
  </TestMethod>
</TestClass>
"#;

    fn include(file: &str, path: &str) -> MarkupNode {
        read_fragment(&format!("<include file='{file}' path='{path}'/>"), 10)
            .unwrap()
            .remove(0)
    }

    #[test]
    fn test_locator_from_node() {
        assert_eq!(
            ReferenceLocator::from_node(&include("Doc.xml", "/A/*")),
            Some(ReferenceLocator::Include {
                file: "Doc.xml".to_string(),
                path: "/A/*".to_string()
            })
        );

        let inherit = read_fragment(r#"<inheritdoc cref="Base.M"/>"#, 0).unwrap();
        assert_eq!(
            ReferenceLocator::from_node(&inherit[0]),
            Some(ReferenceLocator::Inherited {
                cref: Some("Base.M".to_string())
            })
        );

        let summary = read_fragment("<summary>x</summary>", 0).unwrap();
        assert_eq!(ReferenceLocator::from_node(&summary[0]), None);
    }

    #[test]
    fn test_select_path() {
        let document = read_fragment(METHOD_DOC, 0).unwrap();

        let selected = select_path(&document, "/TestClass/TestMethod/*");
        let tags: Vec<_> = selected.iter().filter_map(|n| n.tag()).collect();
        assert_eq!(tags, vec!["summary", "returns"]);

        let selected = select_path(&document, "/TestClass/*");
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].tag(), Some("TestMethod"));

        assert!(select_path(&document, "/Missing/*").is_empty());
        assert!(select_path(&document, "/").is_empty());
    }

    #[test]
    fn test_map_resolver() {
        let mut resolver = MapResolver::new();
        resolver.insert_text("MethodDoc.xml", METHOD_DOC);
        resolver.insert_text("Invalid.xml", "<TestClass><summary>Test class<summary></TestClass>");

        let locator = ReferenceLocator::Include {
            file: "MethodDoc.xml".to_string(),
            path: "/TestClass/TestMethod/*".to_string(),
        };
        assert!(matches!(
            resolver.resolve(&locator),
            Resolution::Resolved(nodes) if nodes.len() == 2
        ));

        let invalid = ReferenceLocator::Include {
            file: "Invalid.xml".to_string(),
            path: "/TestClass/*".to_string(),
        };
        assert_eq!(resolver.resolve(&invalid), Resolution::Unresolved);

        let inherited = ReferenceLocator::Inherited { cref: None };
        assert_eq!(resolver.resolve(&inherited), Resolution::Unresolved);
    }

    #[test]
    fn test_adapter_collapses_findings() {
        let mut resolver = MapResolver::new();
        resolver.insert_text("MethodDoc.xml", METHOD_DOC);
        let adapter = ReferenceAdapter::new(&resolver, 8);
        let node = include("MethodDoc.xml", "/TestClass/TestMethod/*");

        let violation = adapter
            .check(&node, 0, |_, depth| {
                assert_eq!(depth, 1);
                vec![Violation::local(1), Violation::local(2)]
            })
            .unwrap();

        assert_eq!(violation.kind, ViolationKind::ReferencedMissingTerminator);
        assert_eq!(violation.report_at, node.span());
        assert_eq!(violation.location, 10);
        assert!(!violation.fixable);
    }

    #[test]
    fn test_adapter_clean_content() {
        let mut resolver = MapResolver::new();
        resolver.insert_text("MethodDoc.xml", METHOD_DOC);
        let adapter = ReferenceAdapter::new(&resolver, 8);

        let node = include("MethodDoc.xml", "/TestClass/TestMethod/*");
        assert_eq!(adapter.check(&node, 0, |_, _| Vec::new()), None);
    }

    #[test]
    fn test_adapter_suppresses_unresolved() {
        let adapter = ReferenceAdapter::new(&Unresolvable, 8);
        let node = include("Missing.xml", "/A/*");

        let violation = adapter.check(&node, 0, |_, _| panic!("must not check unresolved content"));
        assert_eq!(violation, None);
    }

    #[test]
    fn test_adapter_depth_limit() {
        let mut resolver = MapResolver::new();
        resolver.insert_document("Doc.xml", vec![MarkupNode::text("x", Span::new(0, 1))]);
        let adapter = ReferenceAdapter::new(&resolver, 2);
        let node = include("Doc.xml", "/*");

        let violation = adapter.check(&node, 2, |_, _| vec![Violation::local(0)]);
        assert_eq!(violation, None);
    }
}

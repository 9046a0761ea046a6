//! Terminator punctuation rule for documentation comments
//!
//! This crate checks that every paragraph of prose inside an XML-style
//! documentation comment ends with a period, and produces edits inserting
//! the missing ones. Comments arrive as markup trees with absolute spans;
//! the analysis is a pure function of the tree, the configuration and an
//! injected resolver for included or inherited documentation.
//!
//! # Architecture
//!
//! - **classify**: maps every element to a structural class
//! - **segment**: cuts a comment into paragraph units
//! - **check**: decides whether a unit violates the rule
//! - **reference**: resolves include and inheritdoc elements
//! - **fix**: turns violations into text edits
//! - **reader**, **extract**, **source**: reading markup out of source files
//!   and mapping offsets to line and column
//!
//! # Example
//!
//! ```rust
//! use docstop_core::{apply_edits, read_fragment, Analyzer, Unresolvable};
//!
//! let markup = "<summary>Paragraph 1<para/>Paragraph 2.</summary>";
//! let nodes = read_fragment(markup, 0).unwrap();
//!
//! let analyzer = Analyzer::default();
//! let analysis = analyzer.analyze(&nodes, &Unresolvable);
//! assert_eq!(analysis.violations.len(), 1);
//!
//! let fixed = apply_edits(markup, &analysis.edits);
//! assert_eq!(fixed, "<summary>Paragraph 1.<para/>Paragraph 2.</summary>");
//! ```

pub mod analyzer;
pub mod check;
pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod fix;
pub mod markup;
pub mod reader;
pub mod reference;
pub mod segment;
pub mod source;

pub use analyzer::{Analysis, Analyzer, SourceReport};
pub use check::{TerminatorChecker, TerminatorRules, Violation, ViolationKind, RULE_ID};
pub use classify::{classify, Classifier, DocTag, ElementClass};
pub use config::RuleConfig;
pub use error::{Error, ReadError, Result};
pub use extract::{extract_doc_comments, DocComment, DEFAULT_PREFIX};
pub use fix::{apply_edits, synthesize, TextEdit};
pub use markup::{Attributes, MarkupNode, Span};
pub use reader::read_fragment;
pub use reference::{
    select_path, MapResolver, ReferenceAdapter, ReferenceLocator, ReferenceResolver, Resolution,
    Unresolvable,
};
pub use segment::{ParagraphUnit, Segment, Segmenter, Tail};
pub use source::{LineIndex, Position};

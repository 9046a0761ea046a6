//! The rule engine
//!
//! [`Analyzer`] ties the pieces together: it segments a comment into
//! paragraph units, checks every unit, hands reference elements to the
//! reference adapter and turns fixable violations into edits.

use crate::check::{TerminatorChecker, TerminatorRules, Violation};
use crate::classify::Classifier;
use crate::config::{default_config, RuleConfig};
use crate::error::{ReadError, Result};
use crate::extract::extract_doc_comments;
use crate::fix::{synthesize, TextEdit};
use crate::markup::MarkupNode;
use crate::reference::{ReferenceAdapter, ReferenceResolver};
use crate::segment::{Segment, Segmenter};
use serde::Serialize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Violations of one comment together with the edits repairing them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// Violations in ascending location order
    pub violations: Vec<Violation>,
    /// Edits for the fixable violations, in ascending offset order
    pub edits: Vec<TextEdit>,
}

impl Analysis {
    /// Whether the comment is clean
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Result of checking every documentation comment of a source file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SourceReport {
    /// Number of documentation comments found
    pub comments: usize,
    /// Comments skipped because their markup could not be read
    #[serde(skip)]
    pub unreadable: Vec<ReadError>,
    /// Violations across all comments, in ascending location order
    pub violations: Vec<Violation>,
    /// Edits across all comments, in ascending offset order
    pub edits: Vec<TextEdit>,
}

/// Checks documentation comments against the terminator rule
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: RuleConfig,
    classifier: Classifier,
    checker: TerminatorChecker,
}

impl Analyzer {
    /// Create an analyzer from a validated configuration
    pub fn new(config: RuleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: RuleConfig) -> Self {
        let classifier = Classifier::with_overrides(
            config
                .tags
                .overrides
                .iter()
                .map(|(tag, class)| (tag.clone(), *class))
                .collect(),
        );
        let checker = TerminatorChecker::new(
            TerminatorRules::new(config.terminators.accepted.iter().copied()),
            config.exemptions.alternative_separators.clone(),
            config.exemptions.lead_in_colon,
        );

        Self {
            config,
            classifier,
            checker,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Violations of one comment, in ascending location order
    pub fn check(&self, nodes: &[MarkupNode], resolver: &dyn ReferenceResolver) -> Vec<Violation> {
        self.check_at_depth(nodes, resolver, 0)
    }

    fn check_at_depth(
        &self,
        nodes: &[MarkupNode],
        resolver: &dyn ReferenceResolver,
        depth: usize,
    ) -> Vec<Violation> {
        let adapter = ReferenceAdapter::new(resolver, self.config.references.max_depth);
        let mut violations = Vec::new();

        for segment in Segmenter::new(&self.classifier).segment(nodes) {
            match segment {
                Segment::Unit(unit) => violations.extend(self.checker.check_unit(&unit)),
                Segment::Reference(node) => {
                    violations.extend(adapter.check(node, depth, |content, next| {
                        self.check_at_depth(content, resolver, next)
                    }));
                }
            }
        }

        violations.sort_by_key(|v| v.location);
        violations.dedup();
        violations
    }

    /// Violations and edits of one comment
    pub fn analyze(&self, nodes: &[MarkupNode], resolver: &dyn ReferenceResolver) -> Analysis {
        let violations = self.check(nodes, resolver);
        let edits = synthesize(&violations, self.config.terminators.insert);
        Analysis { violations, edits }
    }

    /// Analyse independent comments, in parallel when the `parallel`
    /// feature is enabled
    ///
    /// Results are in input order.
    pub fn analyze_batch(
        &self,
        comments: &[Vec<MarkupNode>],
        resolver: &dyn ReferenceResolver,
    ) -> Vec<Analysis> {
        #[cfg(feature = "parallel")]
        {
            comments
                .par_iter()
                .map(|nodes| self.analyze(nodes, resolver))
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            comments
                .iter()
                .map(|nodes| self.analyze(nodes, resolver))
                .collect()
        }
    }

    /// Extract, read and analyse every documentation comment of `source`
    ///
    /// Comments whose markup cannot be read are skipped and recorded in
    /// [`SourceReport::unreadable`].
    pub fn check_source(
        &self,
        source: &str,
        prefix: &str,
        resolver: &dyn ReferenceResolver,
    ) -> SourceReport {
        let comments = extract_doc_comments(source, prefix);
        let mut report = SourceReport {
            comments: comments.len(),
            ..SourceReport::default()
        };

        let mut readable = Vec::with_capacity(comments.len());
        for comment in &comments {
            match comment.read() {
                Ok(nodes) => readable.push(nodes),
                Err(e) => {
                    log::warn!("skipping unreadable documentation comment: {e}");
                    report.unreadable.push(e);
                }
            }
        }

        for analysis in self.analyze_batch(&readable, resolver) {
            report.violations.extend(analysis.violations);
            report.edits.extend(analysis.edits);
        }
        report.violations.sort_by_key(|v| v.location);
        report.edits.sort();

        log::debug!(
            "{} comment(s), {} violation(s), {} unreadable",
            report.comments,
            report.violations.len(),
            report.unreadable.len()
        );
        report
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::build(default_config().clone())
    }
}

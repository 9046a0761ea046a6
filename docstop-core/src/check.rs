//! Terminator checking of paragraph units

use crate::markup::Span;
use crate::segment::{ParagraphUnit, Tail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Identifier under which violations are reported
pub const RULE_ID: &str = "DOC1629";

/// What a violation reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationKind {
    /// A locally written paragraph unit lacks its terminator
    MissingTerminator,
    /// Content pulled in through a reference lacks a terminator somewhere
    ReferencedMissingTerminator,
}

impl ViolationKind {
    /// Stable key for hosts that localise messages
    pub fn message_key(&self) -> &'static str {
        match self {
            ViolationKind::MissingTerminator => "missing-terminator",
            ViolationKind::ReferencedMissingTerminator => "referenced-missing-terminator",
        }
    }

    /// Human-readable message
    pub fn message(&self) -> &'static str {
        match self {
            ViolationKind::MissingTerminator => "Documentation text should end with a period",
            ViolationKind::ReferencedMissingTerminator => {
                "Referenced documentation text should end with a period"
            }
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A paragraph unit (or a reference) missing its terminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Offset right after the last significant character or element
    pub location: usize,
    /// Span to report: zero-width at `location`, or the referencing element
    pub report_at: Span,
    /// Whether a local edit can repair it
    pub fixable: bool,
    /// What is reported
    pub kind: ViolationKind,
}

impl Violation {
    /// Violation inside the analysed text, fixable at `location`
    pub fn local(location: usize) -> Self {
        Self {
            location,
            report_at: Span::at(location),
            fixable: true,
            kind: ViolationKind::MissingTerminator,
        }
    }

    /// Violation found in the content behind a reference element
    pub fn referenced(reference: Span) -> Self {
        Self {
            location: reference.start,
            report_at: reference,
            fixable: false,
            kind: ViolationKind::ReferencedMissingTerminator,
        }
    }
}

/// Set of accepted terminator characters
#[derive(Debug, Clone)]
pub struct TerminatorRules {
    /// Set of terminator characters
    chars: HashSet<char>,
    /// ASCII lookup table for performance
    ascii_lookup: [bool; 128],
}

impl TerminatorRules {
    /// Create rules accepting exactly `chars`
    pub fn new(chars: impl IntoIterator<Item = char>) -> Self {
        let chars: HashSet<char> = chars.into_iter().collect();

        let mut ascii_lookup = [false; 128];
        for &ch in &chars {
            if ch.is_ascii() {
                ascii_lookup[ch as usize] = true;
            }
        }

        Self {
            chars,
            ascii_lookup,
        }
    }

    /// Check if a character is a terminator
    #[inline]
    pub fn is_terminator(&self, ch: char) -> bool {
        if ch.is_ascii() {
            self.ascii_lookup[ch as usize]
        } else {
            self.chars.contains(&ch)
        }
    }
}

impl Default for TerminatorRules {
    fn default() -> Self {
        Self::new(['.'])
    }
}

/// Decides whether a paragraph unit violates the rule
#[derive(Debug, Clone)]
pub struct TerminatorChecker {
    terminators: TerminatorRules,
    alternative_separators: Vec<String>,
    lead_in_colon: bool,
}

impl TerminatorChecker {
    /// Create a checker
    pub fn new(
        terminators: TerminatorRules,
        alternative_separators: Vec<String>,
        lead_in_colon: bool,
    ) -> Self {
        Self {
            terminators,
            alternative_separators,
            lead_in_colon,
        }
    }

    /// The violation for `unit`, if it has one
    pub fn check_unit(&self, unit: &ParagraphUnit) -> Option<Violation> {
        if unit.is_trivial() {
            return None;
        }
        let tail = unit.tail?;

        if !unit.has_inline && self.is_alternative_separator(unit.text.trim()) {
            return None;
        }

        match tail {
            Tail::Char { ch, .. } if self.terminators.is_terminator(ch) => None,
            Tail::Char { ch: ':', .. } if self.lead_in_colon && unit.followed => None,
            Tail::Char { end, .. } | Tail::Inline { end } => Some(Violation::local(end)),
        }
    }

    fn is_alternative_separator(&self, text: &str) -> bool {
        self.alternative_separators.iter().any(|token| token == text)
    }
}

impl Default for TerminatorChecker {
    fn default() -> Self {
        Self::new(TerminatorRules::default(), vec!["-or-".to_string()], true)
    }
}

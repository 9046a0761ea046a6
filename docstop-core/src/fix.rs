//! Terminator insertion
//!
//! Every fixable violation becomes one insertion of the configured
//! terminator at the violation's location. Edits never overlap since each
//! one is a zero-width insertion, so they can be applied in a single pass.

use crate::check::Violation;
use serde::{Deserialize, Serialize};

/// Zero-width insertion into the analysed text
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextEdit {
    /// Byte offset to insert at
    pub offset: usize,
    /// Text to insert
    pub insert: String,
}

impl TextEdit {
    /// Insertion of `terminator` at `offset`
    pub fn terminator(offset: usize, terminator: char) -> Self {
        Self {
            offset,
            insert: terminator.to_string(),
        }
    }
}

/// Edits repairing the fixable `violations`, sorted by offset
///
/// Reference violations are not fixable and produce nothing. Two
/// violations at the same offset produce one edit.
pub fn synthesize(violations: &[Violation], terminator: char) -> Vec<TextEdit> {
    let mut edits: Vec<TextEdit> = violations
        .iter()
        .filter(|v| v.fixable)
        .map(|v| TextEdit::terminator(v.location, terminator))
        .collect();
    edits.sort();
    edits.dedup();
    edits
}

/// Apply insertions to `text`
///
/// Edits that fall outside the text or inside a multi-byte character are
/// skipped with a warning, as are repeated edits at one offset.
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> String {
    let mut sorted: Vec<&TextEdit> = edits.iter().collect();
    sorted.sort_by_key(|edit| edit.offset);

    let extra: usize = sorted.iter().map(|edit| edit.insert.len()).sum();
    let mut result = String::with_capacity(text.len() + extra);
    let mut copied = 0;
    let mut last_offset = None;

    for edit in sorted {
        if !text.is_char_boundary(edit.offset) {
            log::warn!("skipping edit at invalid offset {}", edit.offset);
            continue;
        }
        if last_offset == Some(edit.offset) {
            log::warn!("skipping repeated edit at offset {}", edit.offset);
            continue;
        }

        result.push_str(&text[copied..edit.offset]);
        result.push_str(&edit.insert);
        copied = edit.offset;
        last_offset = Some(edit.offset);
    }

    result.push_str(&text[copied..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::Span;

    #[test]
    fn test_synthesize_skips_unfixable() {
        let violations = [
            Violation::local(30),
            Violation::referenced(Span::new(40, 80)),
            Violation::local(12),
            Violation::local(30),
        ];

        let edits = synthesize(&violations, '.');
        assert_eq!(
            edits,
            vec![TextEdit::terminator(12, '.'), TextEdit::terminator(30, '.')]
        );
    }

    #[test]
    fn test_apply_edits() {
        let text = "<summary>Test class</summary>";
        let edits = vec![TextEdit::terminator(19, '.')];

        assert_eq!(apply_edits(text, &edits), "<summary>Test class.</summary>");
    }

    #[test]
    fn test_apply_edits_unsorted() {
        let text = "one<para/>two";
        let edits = vec![TextEdit::terminator(13, '.'), TextEdit::terminator(3, '.')];

        assert_eq!(apply_edits(text, &edits), "one.<para/>two.");
    }

    #[test]
    fn test_apply_edits_skips_invalid_offsets() {
        let text = "日本";
        let edits = vec![
            TextEdit::terminator(1, '.'),
            TextEdit::terminator(99, '.'),
            TextEdit::terminator(6, '.'),
            TextEdit::terminator(6, '.'),
        ];

        assert_eq!(apply_edits(text, &edits), "日本.");
    }

    #[test]
    fn test_no_edits() {
        assert_eq!(apply_edits("unchanged", &[]), "unchanged");
    }
}

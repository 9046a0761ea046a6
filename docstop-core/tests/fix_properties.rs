//! Property-based tests for checking and fixing
//!
//! Generated summaries are lists of paragraphs separated by `<para/>`,
//! each ending with an arbitrary punctuation mark or none at all.

use docstop_core::{apply_edits, read_fragment, Analyzer, Unresolvable};
use proptest::prelude::*;

fn paragraph(ending: &'static [&'static str]) -> impl Strategy<Value = String> {
    (
        "[A-Za-z]{1,8}( [a-z0-9]{1,8}){0,4}",
        prop::sample::select(ending),
    )
        .prop_map(|(words, end)| format!("{words}{end}"))
}

fn summary(paragraphs: &[String], separator: &str) -> String {
    format!("<summary>{}</summary>", paragraphs.join(separator))
}

proptest! {
    #[test]
    fn fixing_leaves_no_violations(
        paragraphs in prop::collection::vec(paragraph(&[".", "", "!", "?", ":", ","]), 1..6),
        separator in prop::sample::select(vec!["<para/>", "\n<para/>\n", "<br/>"]),
    ) {
        let markup = summary(&paragraphs, separator);
        let analyzer = Analyzer::default();

        let nodes = read_fragment(&markup, 0).unwrap();
        let analysis = analyzer.analyze(&nodes, &Unresolvable);
        let fixed = apply_edits(&markup, &analysis.edits);

        let nodes = read_fragment(&fixed, 0).unwrap();
        let again = analyzer.analyze(&nodes, &Unresolvable);
        prop_assert!(again.is_clean());
        prop_assert!(again.edits.is_empty());
    }

    #[test]
    fn one_violation_per_unterminated_paragraph(
        paragraphs in prop::collection::vec(paragraph(&[".", "", "!", ","]), 1..6),
    ) {
        let markup = summary(&paragraphs, "<para/>");
        let nodes = read_fragment(&markup, 0).unwrap();
        let violations = Analyzer::default().check(&nodes, &Unresolvable);

        let unterminated = paragraphs.iter().filter(|p| !p.ends_with('.')).count();
        prop_assert_eq!(violations.len(), unterminated);
        prop_assert!(violations.iter().all(|v| v.fixable));
    }

    #[test]
    fn violations_are_ordered_and_inside_text(
        paragraphs in prop::collection::vec(paragraph(&["", ":", "."]), 1..8),
    ) {
        let markup = summary(&paragraphs, "<para/>");
        let nodes = read_fragment(&markup, 0).unwrap();
        let violations = Analyzer::default().check(&nodes, &Unresolvable);

        prop_assert!(violations.windows(2).all(|w| w[0].location < w[1].location));
        prop_assert!(violations.iter().all(|v| v.location <= markup.len()));
        prop_assert!(violations.iter().all(|v| markup.is_char_boundary(v.location)));
    }

    #[test]
    fn terminated_text_is_untouched(
        paragraphs in prop::collection::vec(paragraph(&["."]), 1..6),
    ) {
        let markup = summary(&paragraphs, "<para/>");
        let nodes = read_fragment(&markup, 0).unwrap();
        let analysis = Analyzer::default().analyze(&nodes, &Unresolvable);

        prop_assert!(analysis.is_clean());
        prop_assert_eq!(apply_edits(&markup, &analysis.edits), markup);
    }
}

//! Consistency problems found while rewriting a notebook.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// A single consistency problem. The `Display` text is what users see.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("Footnotes not found: {}", .0.join(", "))]
    FootnotesNotFound(Vec<String>),

    #[error("Footnotes not referenced: {}", .0.join(", "))]
    FootnotesNotReferenced(Vec<String>),

    #[error("Duplicated references of footnotes: {}", .0.join(", "))]
    DuplicatedFootnoteReferences(Vec<String>),

    #[error("Duplicated footnotes: {}", .0.join(", "))]
    DuplicatedFootnotes(Vec<String>),

    #[error("Wrongly ordered footnotes: {}", format_pairs(.0))]
    WronglyOrderedFootnotes(Vec<(String, String)>),

    #[error("Tags not found: {}", .0.join(", "))]
    TagsNotFound(Vec<String>),

    #[error("Duplicated tags: {}", .0.join(", "))]
    DuplicatedTags(Vec<String>),
}

fn format_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(a, b)| format!("({a}, {b})"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Serialize for Diagnostic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn messages_join_labels_with_commas() {
        assert_eq!(
            Diagnostic::FootnotesNotFound(strings(&["a", "b"])).to_string(),
            "Footnotes not found: a, b"
        );
        assert_eq!(
            Diagnostic::DuplicatedTags(strings(&["3"])).to_string(),
            "Duplicated tags: 3"
        );
    }

    #[test]
    fn wrongly_ordered_lists_pairs() {
        let diagnostic = Diagnostic::WronglyOrderedFootnotes(vec![
            ("2".into(), "1".into()),
            ("5".into(), "3".into()),
        ]);
        assert_eq!(
            diagnostic.to_string(),
            "Wrongly ordered footnotes: (2, 1), (5, 3)"
        );
    }
}

//! Footnotes.
//!
//! Markdown input:
//!
//! ```text
//! This is a footnote.[^1]
//! [^1]: The footnote text.
//! ```
//!
//! HTML output (quotes are JSON-escaped because the notebook is edited as raw
//! text):
//!
//! ```text
//! This is a footnote.<a name=\"cite_ref-1\"></a>[<sup>[1]</sup>](#cite_note-1)
//! <a name=\"cite_note-1\"></a>1.&nbsp;[^](#cite_ref-1) The footnote text.
//! ```
//!
//! Previously generated HTML, including the older `<sup id=..>` and
//! `<span id=..>` forms, is parsed back so that footnotes can be renumbered
//! after edits.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::diagnostic::Diagnostic;
use crate::markup::{Marker, collect, relabel};
use crate::rule::{Guard, Rule, apply_all};
use crate::sequence::{duplicates, pairwise, remove_duplicates};

static RULES: LazyLock<[Rule; 6]> = LazyLock::new(|| {
    [
        Rule::new(r"\[\^([^\]]+)\]\s*:", Marker::Footnote).guard(Guard::NotAfterBacktick),
        Rule::new(r"\[\^([^\]]+)\]", Marker::ToFootnote).guard(Guard::NotAfterBacktick),
        Rule::new(r#"<a name=\\"cite_ref-([^"]+)\\"></a>"#, Marker::ToFootnote)
            .tail(reference_tail),
        Rule::new(r#"<a name=\\"cite_note-([^"]+)\\"></a>"#, Marker::Footnote)
            .tail(footnote_tail),
        Rule::new(r#"\[<sup id=\\"cite_ref-([^"]+)\\">"#, Marker::ToFootnote)
            .tail(|label| format!("[{label}]</sup>](#cite_note-{label})")),
        Rule::new(r#"<span id=\\"cite_note-([^"]+)\\">"#, Marker::Footnote)
            .tail(|label| format!("{label}.</span> [^](#cite_ref-{label})")),
    ]
});

fn reference_tail(label: &str) -> String {
    format!("[<sup>[{label}]</sup>](#cite_note-{label})")
}

fn footnote_tail(label: &str) -> String {
    format!("{label}.&nbsp;[^](#cite_ref-{label})")
}

fn reference_html(label: &str) -> String {
    format!(r#"<a name=\"cite_ref-{label}\"></a>{}"#, reference_tail(label))
}

fn footnote_html(label: &str) -> String {
    format!(r#"<a name=\"cite_note-{label}\"></a>{}"#, footnote_tail(label))
}

/// Convert footnotes in `lines` to numbered HTML anchors, pushing any
/// consistency problems onto `diagnostics`.
pub fn make_footnotes(lines: Vec<String>, diagnostics: &mut Vec<Diagnostic>) -> Vec<String> {
    let marked = lines
        .into_iter()
        .map(|line| apply_all(&*RULES, line))
        .collect();
    let marked = relabel(marked, Marker::ToFootnote, Marker::Footnote);

    check(&marked, diagnostics);

    marked
        .iter()
        .map(|line| {
            let line = Marker::ToFootnote.replace(line, reference_html);
            Marker::Footnote.replace(&line, footnote_html).into_owned()
        })
        .collect()
}

fn check(lines: &[String], diagnostics: &mut Vec<Diagnostic>) {
    let cites = collect(lines, Marker::ToFootnote);
    let notes = collect(lines, Marker::Footnote);

    let cited: HashSet<&str> = cites.iter().map(String::as_str).collect();
    let defined: HashSet<&str> = notes.iter().map(String::as_str).collect();

    let not_found = remove_duplicates(&cites)
        .into_iter()
        .filter(|label| !defined.contains(label.as_str()))
        .collect::<Vec<_>>();
    let not_referenced = remove_duplicates(&notes)
        .into_iter()
        .filter(|label| !cited.contains(label.as_str()))
        .collect::<Vec<_>>();
    let duplicated_cites = duplicates(&cites);
    let duplicated_notes = duplicates(&notes);
    let wrongly_ordered = pairwise(&notes)
        .filter(|(a, b)| numerically_greater(a, b))
        .map(|(a, b)| (a.clone(), b.clone()))
        .collect::<Vec<_>>();

    if !not_found.is_empty() {
        diagnostics.push(Diagnostic::FootnotesNotFound(not_found));
    }
    if !not_referenced.is_empty() {
        diagnostics.push(Diagnostic::FootnotesNotReferenced(not_referenced));
    }
    if !duplicated_cites.is_empty() {
        diagnostics.push(Diagnostic::DuplicatedFootnoteReferences(duplicated_cites));
    }
    if !duplicated_notes.is_empty() {
        diagnostics.push(Diagnostic::DuplicatedFootnotes(duplicated_notes));
    }
    if !wrongly_ordered.is_empty() {
        diagnostics.push(Diagnostic::WronglyOrderedFootnotes(wrongly_ordered));
    }
}

/// `a > b` when both are decimal numbers; `false` otherwise.
fn numerically_greater(a: &str, b: &str) -> bool {
    fn digits(s: &str) -> Option<&str> {
        (!s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())).then(|| s.trim_start_matches('0'))
    }
    match (digits(a), digits(b)) {
        (Some(a), Some(b)) => (a.len(), a) > (b.len(), b),
        _ => false,
    }
}

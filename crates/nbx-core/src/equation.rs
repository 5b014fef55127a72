//! Equation references.
//!
//! `\tag{name}` labels an equation and `\eqref{name}` refers to it. MathJax
//! understands both, but its cross references do not work across notebook
//! cells, so every `\eqref` is replaced by the literal number in parentheses,
//! preceded by an `<!-- eqref -->` comment that lets the next run find it
//! again. Backslashes appear doubled because the notebook is edited as raw
//! JSON text.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::diagnostic::Diagnostic;
use crate::markup::{Marker, collect, relabel};
use crate::rule::{Rule, apply_all};
use crate::sequence::{duplicates, remove_duplicates};

const EQREF_COMMENT: &str = "<!-- eqref -->";

static RULES: LazyLock<[Rule; 3]> = LazyLock::new(|| {
    [
        Rule::new(r"\\\\tag\{([^}]+)\}", Marker::Tag),
        Rule::new(r"\\\\eqref\{([^}]+)\}", Marker::Eqref),
        Rule::new(r"<!-- eqref -->\(([^)]+)\)", Marker::Eqref),
    ]
});

/// Renumber equation tags and resolve references to them, pushing any
/// consistency problems onto `diagnostics`.
pub fn make_eqrefs(lines: Vec<String>, diagnostics: &mut Vec<Diagnostic>) -> Vec<String> {
    let marked = lines
        .into_iter()
        .map(|line| apply_all(&*RULES, line))
        .collect();
    let marked = relabel(marked, Marker::Tag, Marker::Eqref);

    check(&marked, diagnostics);

    marked
        .iter()
        .map(|line| {
            let line = Marker::Tag.replace(line, |label| format!(r"\\tag{{{label}}}"));
            Marker::Eqref
                .replace(&line, |label| format!("{EQREF_COMMENT}({label})"))
                .into_owned()
        })
        .collect()
}

fn check(lines: &[String], diagnostics: &mut Vec<Diagnostic>) {
    let tags = collect(lines, Marker::Tag);
    let eqrefs = collect(lines, Marker::Eqref);

    let tagged: HashSet<&str> = tags.iter().map(String::as_str).collect();
    let not_found = remove_duplicates(&eqrefs)
        .into_iter()
        .filter(|label| !tagged.contains(label.as_str()))
        .collect::<Vec<_>>();
    let duplicated = duplicates(&tags);

    if !not_found.is_empty() {
        diagnostics.push(Diagnostic::TagsNotFound(not_found));
    }
    if !duplicated.is_empty() {
        diagnostics.push(Diagnostic::DuplicatedTags(duplicated));
    }
}

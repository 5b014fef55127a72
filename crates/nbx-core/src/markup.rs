//! Intermediate markers used between parsing and rendering.
//!
//! Every recognised reference is first rewritten to `{{{{KEYWORD label}}}}`,
//! relabeled in that form, and only then rendered to its final text. A label
//! is any non-empty run of characters other than `}`.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

const OPEN: &str = "{{{{";
const CLOSE: &str = "}}}}";

static TO_FOOTNOTE: LazyLock<Regex> = LazyLock::new(|| marker_regex("TO_FOOTNOTE"));
static FOOTNOTE: LazyLock<Regex> = LazyLock::new(|| marker_regex("FOOTNOTE"));
static TAG: LazyLock<Regex> = LazyLock::new(|| marker_regex("TAG"));
static EQREF: LazyLock<Regex> = LazyLock::new(|| marker_regex("EQREF"));

fn marker_regex(keyword: &str) -> Regex {
    let pattern = [r"\{\{\{\{", keyword, r" ([^}]+)\}\}\}\}"].concat();
    Regex::new(&pattern).expect("marker pattern is valid")
}

/// One pattern for both kinds, so that overlapping markers are resolved
/// leftmost first in a single pass. Group 1 is the keyword, group 2 the label.
fn pair_regex(primary: Marker, secondary: Marker) -> Regex {
    let pattern = [
        r"\{\{\{\{(",
        primary.keyword(),
        "|",
        secondary.keyword(),
        r") ([^}]+)\}\}\}\}",
    ]
    .concat();
    Regex::new(&pattern).expect("marker pattern is valid")
}

/// Kind of intermediate marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// A reference to a footnote (`[^name]` in the text).
    ToFootnote,
    /// A footnote definition (`[^name]:`).
    Footnote,
    /// An equation tag (`\tag{name}`).
    Tag,
    /// A reference to an equation tag (`\eqref{name}`).
    Eqref,
}

impl Marker {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::ToFootnote => "TO_FOOTNOTE",
            Self::Footnote => "FOOTNOTE",
            Self::Tag => "TAG",
            Self::Eqref => "EQREF",
        }
    }

    /// Render the marker for `label`.
    #[must_use]
    pub fn render(self, label: &str) -> String {
        format!("{OPEN}{} {label}{CLOSE}", self.keyword())
    }

    pub(crate) fn regex(self) -> &'static Regex {
        match self {
            Self::ToFootnote => LazyLock::force(&TO_FOOTNOTE),
            Self::Footnote => LazyLock::force(&FOOTNOTE),
            Self::Tag => LazyLock::force(&TAG),
            Self::Eqref => LazyLock::force(&EQREF),
        }
    }

    /// Labels of this marker kind in `line`, in order of appearance.
    pub fn labels(self, line: &str) -> impl Iterator<Item = &str> {
        self.regex()
            .captures_iter(line)
            .filter_map(|caps| caps.get(1))
            .map(|label| label.as_str())
    }

    /// Replace each marker of this kind in `line` with `render(label)`.
    pub fn replace<'t>(self, line: &'t str, render: impl Fn(&str) -> String) -> Cow<'t, str> {
        self.regex()
            .replace_all(line, |caps: &Captures<'_>| render(&caps[1]))
    }
}

/// Every label of `marker` across `lines`, in order.
#[must_use]
pub fn collect(lines: &[String], marker: Marker) -> Vec<String> {
    lines
        .iter()
        .flat_map(|line| marker.labels(line))
        .map(str::to_owned)
        .collect()
}

/// Renumber `primary` markers in order of appearance and apply the same
/// numbering to `secondary` markers.
///
/// A label that occurs several times as `primary` keeps the number of its
/// last occurrence. Labels without a `primary` occurrence are left as they
/// are, so the consistency check can still report them. When `lines` hold no
/// `primary` marker at all, they are returned untouched.
#[must_use]
pub fn relabel(lines: Vec<String>, primary: Marker, secondary: Marker) -> Vec<String> {
    let mut numbers = HashMap::new();
    let mut n = 0usize;
    for line in &lines {
        for label in primary.labels(line) {
            n += 1;
            numbers.insert(label.to_owned(), n.to_string());
        }
    }

    if numbers.is_empty() {
        return lines;
    }

    let markers = pair_regex(primary, secondary);
    lines
        .into_iter()
        .map(|line| {
            markers
                .replace_all(&line, |caps: &Captures<'_>| {
                    let label = &caps[2];
                    let label = numbers.get(label).map_or(label, String::as_str);
                    format!("{OPEN}{} {label}{CLOSE}", &caps[1])
                })
                .into_owned()
        })
        .collect()
}

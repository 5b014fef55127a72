//! Conversion rules from source syntax to intermediate markers.
//!
//! The `regex` crate has neither look-behind nor back-references, so a rule
//! is a prefix pattern whose first group captures the label, plus two extra
//! checks applied by hand:
//!
//! - `Guard::NotAfterBacktick` rejects a match directly preceded by `` ` ``
//!   (so `` `[^abc]` `` in prose about regular expressions stays as is);
//! - a `tail` is literal text built from the label that must follow the
//!   prefix, standing in for `\1` in the rest of the pattern.
//!
//! When a candidate is rejected the search restarts one character after the
//! candidate's start.

use std::borrow::Cow;

use regex::Regex;

use crate::markup::Marker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    None,
    NotAfterBacktick,
}

#[derive(Debug)]
pub struct Rule {
    prefix: Regex,
    marker: Marker,
    guard: Guard,
    tail: Option<fn(&str) -> String>,
}

impl Rule {
    /// Build a rule from a prefix pattern whose group 1 is the label.
    ///
    /// # Panics
    ///
    /// Panics when `prefix` is not a valid pattern. Rules are built from
    /// literals only.
    #[must_use]
    pub fn new(prefix: &str, marker: Marker) -> Self {
        Self {
            prefix: Regex::new(prefix).expect("rule pattern is valid"),
            marker,
            guard: Guard::None,
            tail: None,
        }
    }

    #[must_use]
    pub fn guard(mut self, guard: Guard) -> Self {
        self.guard = guard;
        self
    }

    #[must_use]
    pub fn tail(mut self, tail: fn(&str) -> String) -> Self {
        self.tail = Some(tail);
        self
    }

    /// Replace every accepted match in `line` with this rule's marker.
    pub fn apply<'t>(&self, line: &'t str) -> Cow<'t, str> {
        let mut out = String::new();
        let mut copied = 0;
        let mut pos = 0;
        let mut replaced = false;

        while pos <= line.len() {
            let Some(caps) = self.prefix.captures_at(line, pos) else {
                break;
            };
            let (Some(whole), Some(label)) = (caps.get(0), caps.get(1)) else {
                break;
            };

            match self.accept(line, whole.start(), whole.end(), label.as_str()) {
                Some(end) => {
                    out.push_str(&line[copied..whole.start()]);
                    out.push_str(&self.marker.render(label.as_str()));
                    copied = end;
                    pos = end.max(whole.start() + 1);
                    replaced = true;
                }
                None => pos = next_char_boundary(line, whole.start()),
            }
        }

        if !replaced {
            return Cow::Borrowed(line);
        }
        out.push_str(&line[copied..]);
        Cow::Owned(out)
    }

    /// End of the full match when the candidate passes the guard and tail.
    fn accept(&self, line: &str, start: usize, end: usize, label: &str) -> Option<usize> {
        if self.guard == Guard::NotAfterBacktick && line[..start].ends_with('`') {
            return None;
        }
        match self.tail {
            None => Some(end),
            Some(tail) => {
                let tail = tail(label);
                line[end..].starts_with(&tail).then(|| end + tail.len())
            }
        }
    }
}

/// Run `rules` in order over `line`, each on the previous one's output.
#[must_use]
pub fn apply_all(rules: &[Rule], mut line: String) -> String {
    for rule in rules {
        if let Cow::Owned(next) = rule.apply(&line) {
            line = next;
        }
    }
    line
}

fn next_char_boundary(line: &str, from: usize) -> usize {
    line[from..]
        .chars()
        .next()
        .map_or(line.len() + 1, |c| from + c.len_utf8())
}

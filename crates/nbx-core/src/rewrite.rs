//! Running the footnote and equation passes over one text.

use crate::diagnostic::Diagnostic;
use crate::equation::make_eqrefs;
use crate::footnote::make_footnotes;

/// Which passes to run over a notebook's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rewriter {
    pub footnotes: bool,
    pub equations: bool,
}

impl Default for Rewriter {
    fn default() -> Self {
        Self {
            footnotes: true,
            equations: true,
        }
    }
}

/// Result of rewriting one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub lines: Vec<String>,
    pub changed: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl Rewrite {
    /// Output text: lines joined by `\n`, with a trailing newline.
    #[must_use]
    pub fn render(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

impl Rewriter {
    /// Run the enabled passes over `text`, footnotes first.
    #[must_use]
    pub fn rewrite(&self, text: &str) -> Rewrite {
        let input = text.lines().map(str::to_owned).collect::<Vec<_>>();
        let mut diagnostics = Vec::new();

        let mut lines = input.clone();
        if self.footnotes {
            lines = make_footnotes(lines, &mut diagnostics);
        }
        if self.equations {
            lines = make_eqrefs(lines, &mut diagnostics);
        }

        Rewrite {
            changed: lines != input,
            lines,
            diagnostics,
        }
    }
}

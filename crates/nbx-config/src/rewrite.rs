//! Which rewrite passes run.

use serde::{Deserialize, Serialize};

const fn enabled() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RewriteConfig {
    /// Convert and renumber footnotes.
    #[serde(default = "enabled")]
    pub footnotes: bool,

    /// Renumber equation tags and resolve `\eqref`.
    #[serde(default = "enabled")]
    pub equations: bool,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            footnotes: enabled(),
            equations: enabled(),
        }
    }
}

impl RewriteConfig {
    #[must_use]
    pub const fn any_enabled(&self) -> bool {
        self.footnotes || self.equations
    }
}

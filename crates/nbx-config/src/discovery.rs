//! Notebook discovery settings.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_extensions() -> Vec<String> {
    vec!["ipynb".to_string()]
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DiscoveryConfig {
    /// File extensions (without the dot) collected when a directory is given.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Also descend into hidden (`.`-prefixed) files and directories.
    #[serde(default)]
    pub include_hidden: bool,

    /// Gitignore-style globs excluded from directory walks.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            include_hidden: false,
            exclude: Vec::new(),
        }
    }
}

impl DiscoveryConfig {
    /// Whether `extension` is one of the configured ones.
    #[must_use]
    pub fn matches_extension(&self, extension: &str) -> bool {
        self.extensions.iter().any(|e| e == extension)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.extensions.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "discovery.extensions".to_string(),
                reason: "at least one extension is required".to_string(),
            });
        }
        if let Some(bad) = self
            .extensions
            .iter()
            .find(|e| e.is_empty() || e.starts_with('.') || e.contains(['/', '\\']))
        {
            return Err(ConfigError::InvalidValue {
                field: "discovery.extensions".to_string(),
                reason: format!("'{bad}' must be a bare extension such as 'ipynb'"),
            });
        }
        Ok(())
    }
}

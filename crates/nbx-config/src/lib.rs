//! # nbx-config
//!
//! Layered configuration loading for nb-crossref using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`NB_CROSSREF_*` prefix, `__` as separator)
//! 2. Project-level `.nb-crossref.toml` (or an explicit `--config` file)
//! 3. User-level `~/.config/nb-crossref/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `NB_CROSSREF_REWRITE__EQUATIONS` -> `rewrite.equations`,
//! `NB_CROSSREF_DISCOVERY__INCLUDE_HIDDEN` -> `discovery.include_hidden`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use nbx_config::NbxConfig;
//!
//! let config = NbxConfig::load().expect("config");
//! if config.rewrite.footnotes {
//!     println!("footnotes on for {:?}", config.discovery.extensions);
//! }
//! ```

mod discovery;
mod error;
mod rewrite;

pub use discovery::DiscoveryConfig;
pub use error::ConfigError;
pub use rewrite::RewriteConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the project-local config file, looked up in the current directory.
pub const PROJECT_CONFIG_FILE: &str = ".nb-crossref.toml";

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "NB_CROSSREF_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NbxConfig {
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub rewrite: RewriteConfig,
}

impl NbxConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables (`NB_CROSSREF_*` prefix)
    /// 2. `.nb-crossref.toml` (project-local)
    /// 3. `~/.config/nb-crossref/config.toml` (user-global)
    /// 4. Default values
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(Self::figment())
    }

    /// Load configuration with `path` in place of the project-local file.
    ///
    /// A missing `path` is an error here, unlike the implicit lookup.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::InvalidValue {
                field: "config".to_string(),
                reason: format!("config file '{}' does not exist", path.display()),
            });
        }
        Self::extract(Self::figment_with(Some(path)))
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        let local_path = PathBuf::from(PROJECT_CONFIG_FILE);
        let local = local_path.exists().then_some(local_path.as_path());
        Self::figment_with(local)
    }

    fn figment_with(project_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local or explicit config
        if let Some(path) = project_file {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that deserialize fine but make no sense together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.discovery.validate()?;
        if !self.rewrite.any_enabled() {
            return Err(ConfigError::InvalidValue {
                field: "rewrite".to_string(),
                reason: "footnotes and equations are both disabled".to_string(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("nb-crossref").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = NbxConfig::default();
        assert!(config.rewrite.footnotes);
        assert!(config.rewrite.equations);
        assert_eq!(config.discovery.extensions, vec!["ipynb"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: NbxConfig = NbxConfig::figment().extract()?;
            assert_eq!(config, NbxConfig::default());
            Ok(())
        });
    }

    #[test]
    fn both_passes_disabled_is_invalid() {
        let config = NbxConfig {
            rewrite: RewriteConfig {
                footnotes: false,
                equations: false,
            },
            ..NbxConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "rewrite"
        ));
    }
}

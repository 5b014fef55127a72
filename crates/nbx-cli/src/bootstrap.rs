use anyhow::Context;
use nbx_config::NbxConfig;
use tracing::debug;

use crate::cli::GlobalFlags;

/// Load configuration, honouring `--config` over the project-local file.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<NbxConfig> {
    let config = match flags.config.as_deref() {
        Some(path) => NbxConfig::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => NbxConfig::load().context("failed to load configuration")?,
    };
    debug!(?config, "configuration loaded");
    Ok(config)
}

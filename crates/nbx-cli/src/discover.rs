//! Notebook discovery under directory targets.
//!
//! Uses the `ignore` crate's walker with its gitignore filters turned off:
//! every notebook below the target is a candidate. Hidden files and
//! directories are skipped unless configured otherwise, and `exclude` globs
//! are applied as negated overrides.

use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use ignore::WalkBuilder;
use ignore::overrides::OverrideBuilder;
use nbx_config::DiscoveryConfig;
use tracing::warn;

/// Whether any normal component of `path` starts with a dot.
pub fn has_hidden_component(path: &Path) -> bool {
    path.components().any(|component| match component {
        Component::Normal(name) => name.to_string_lossy().starts_with('.'),
        _ => false,
    })
}

/// Notebook files below `root`, sorted by file name within each directory.
pub fn find_notebooks(root: &Path, config: &DiscoveryConfig) -> anyhow::Result<Vec<PathBuf>> {
    if !config.include_hidden && has_hidden_component(root) {
        return Ok(Vec::new());
    }

    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false);
    builder.hidden(!config.include_hidden);
    builder.sort_by_file_name(|a, b| a.cmp(b));

    if !config.exclude.is_empty() {
        let mut overrides = OverrideBuilder::new(root);
        for glob in &config.exclude {
            // Override globs whitelist by default; negate to exclude.
            overrides
                .add(&format!("!{glob}"))
                .with_context(|| format!("invalid exclude glob '{glob}'"))?;
        }
        builder.overrides(overrides.build().context("failed to build exclude globs")?);
    }

    let mut notebooks = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                warn!(%error, "skipping unreadable entry");
                continue;
            }
        };
        let is_notebook = entry.file_type().is_some_and(|ft| ft.is_file())
            && entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| config.matches_extension(ext));
        if is_notebook {
            notebooks.push(entry.into_path());
        }
    }
    Ok(notebooks)
}

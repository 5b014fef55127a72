//! Rewriting notebook files in place.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::diagnostic::Diagnostic;
use crate::error::CoreError;
use crate::rewrite::Rewriter;

/// Whether changed files are written back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    #[default]
    Write,
    /// Report what would change without touching any file.
    Check,
}

/// What happened to one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub changed: bool,
    pub written: bool,
    pub diagnostics: Vec<Diagnostic>,
}

/// Rewrite the notebook at `path`.
///
/// The file is only written when its lines differ from the rewritten lines
/// and `mode` is [`WriteMode::Write`].
///
/// # Errors
///
/// Returns [`CoreError::Read`] when the file cannot be read as UTF-8 text and
/// [`CoreError::Write`] when writing it back fails.
pub fn process_file(
    path: &Path,
    rewriter: &Rewriter,
    mode: WriteMode,
) -> Result<FileOutcome, CoreError> {
    let text = fs::read_to_string(path).map_err(|source| CoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let rewrite = rewriter.rewrite(&text);
    let written = rewrite.changed && mode == WriteMode::Write;
    if written {
        fs::write(path, rewrite.render()).map_err(|source| CoreError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }

    debug!(
        path = %path.display(),
        changed = rewrite.changed,
        written,
        diagnostics = rewrite.diagnostics.len(),
        "processed notebook"
    );

    Ok(FileOutcome {
        path: path.to_path_buf(),
        changed: rewrite.changed,
        written,
        diagnostics: rewrite.diagnostics,
    })
}

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HookError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("git error: {0}")]
    Git(String),
    #[error("not a git repository: {0}")]
    NotGitRepo(PathBuf),
    #[error("hook conflict at '{path}': {reason}")]
    HookConflict { path: PathBuf, reason: String },
}

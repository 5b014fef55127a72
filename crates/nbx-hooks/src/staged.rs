use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::HookError;

/// Notebooks tracked in the git index of the repository containing
/// `project_root`, as absolute paths that still exist on disk.
///
/// `extensions` are bare extensions such as `ipynb`.
pub fn staged_notebooks(
    project_root: &Path,
    extensions: &[String],
) -> Result<Vec<PathBuf>, HookError> {
    let repo = gix::discover(project_root)
        .map_err(|_| HookError::NotGitRepo(project_root.to_path_buf()))?;
    let work_dir = repo
        .work_dir()
        .map(Path::to_path_buf)
        .ok_or_else(|| HookError::Git("bare repository has no work tree".to_string()))?;
    let index = repo
        .open_index()
        .map_err(|error| HookError::Git(error.to_string()))?;

    let notebooks = index
        .entries()
        .iter()
        .filter_map(|entry| {
            let rel = entry.path(&index).to_string();
            let matches = Path::new(&rel)
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.iter().any(|e| e == ext));
            matches.then(|| work_dir.join(rel))
        })
        .filter(|path| path.is_file())
        .collect::<Vec<_>>();

    debug!(count = notebooks.len(), "notebooks found in git index");
    Ok(notebooks)
}

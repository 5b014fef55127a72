use std::path::{Path, PathBuf};

use crate::error::HookError;

#[derive(Debug, Clone)]
pub struct RepoContext {
    pub work_dir: PathBuf,
    pub git_dir: PathBuf,
    pub hooks_dir: PathBuf,
    pub core_hooks_path: Option<String>,
}

pub fn discover_repo_context(project_root: &Path) -> Result<RepoContext, HookError> {
    let repo = gix::discover(project_root)
        .map_err(|_| HookError::NotGitRepo(project_root.to_path_buf()))?;
    let work_dir = repo
        .work_dir()
        .map_or_else(|| project_root.to_path_buf(), Path::to_path_buf);
    let git_dir = repo.git_dir().to_path_buf();

    let core_hooks_path = repo
        .config_snapshot()
        .string("core.hooksPath")
        .map(|v| v.to_string());

    let hooks_dir = match core_hooks_path.as_deref() {
        Some(path) if !path.trim().is_empty() => {
            let configured = PathBuf::from(path);
            if configured.is_absolute() {
                configured
            } else {
                work_dir.join(configured)
            }
        }
        _ => git_dir.join("hooks"),
    };

    Ok(RepoContext {
        work_dir,
        git_dir,
        hooks_dir,
        core_hooks_path,
    })
}

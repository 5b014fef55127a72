use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::HookError;
use crate::repo::{RepoContext, discover_repo_context};

pub const HOOK_NAME: &str = "pre-commit";
const MANAGED_MARKER: &str = "# nb-crossref managed hook";

const HOOK_SCRIPT: &str = "#!/bin/sh\n# nb-crossref managed hook\nexec nb-crossref hook pre-commit \"$@\"\n";

const CHAIN_SCRIPT: &str = "#!/bin/sh\n# nb-crossref managed hook (chain)\nif [ -x \"$(dirname \"$0\")/pre-commit.user\" ]; then\n    \"$(dirname \"$0\")/pre-commit.user\" \"$@\" || exit $?\nfi\nexec nb-crossref hook pre-commit \"$@\"\n";

/// What to do when a pre-commit hook not written by us already exists.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HookInstallStrategy {
    /// Keep the existing hook as `pre-commit.user` and run it first.
    Chain,
    /// Leave the existing hook alone and report it.
    Refuse,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HookInstallMode {
    Script,
    Chain,
    None,
}

#[derive(Debug, Serialize)]
pub struct HookInstallationReport {
    pub installed: bool,
    pub mode: HookInstallMode,
    pub hook_path: String,
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HookRemovalReport {
    pub removed: bool,
    pub restored_user_hook: bool,
    pub hook_path: String,
    pub warnings: Vec<String>,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HookState {
    Ok,
    Missing,
    NotExecutable,
    Foreign,
}

#[derive(Debug, Serialize)]
pub struct HookStatusReport {
    pub state: HookState,
    pub mode: HookInstallMode,
    pub hook_path: String,
    pub hooks_dir: String,
    pub core_hooks_path: Option<String>,
    pub user_hook_chained: bool,
    pub next_steps: Vec<String>,
}

pub fn install_hook(
    project_root: &Path,
    strategy: HookInstallStrategy,
) -> Result<HookInstallationReport, HookError> {
    let repo = discover_repo_context(project_root)?;
    fs::create_dir_all(&repo.hooks_dir)?;

    let target = repo.hooks_dir.join(HOOK_NAME);
    let mut warnings = Vec::new();
    if let Some(path) = &repo.core_hooks_path {
        warnings.push(format!("core.hooksPath is set to '{path}'"));
    }

    let mode = if !target.exists() {
        write_script(&target, HOOK_SCRIPT)?;
        HookInstallMode::Script
    } else if let Some(mode) = managed_mode(&target) {
        debug!(path = %target.display(), "pre-commit hook already managed");
        mode
    } else {
        match strategy {
            HookInstallStrategy::Chain => {
                install_chain_wrapper(&repo, &target)?;
                HookInstallMode::Chain
            }
            HookInstallStrategy::Refuse => {
                warn!(path = %target.display(), "existing pre-commit hook left untouched");
                warnings.push(format!(
                    "existing hook at '{}' is not managed by nb-crossref; rerun with --strategy chain",
                    target.display()
                ));
                HookInstallMode::None
            }
        }
    };

    Ok(HookInstallationReport {
        installed: mode != HookInstallMode::None,
        mode,
        hook_path: target.to_string_lossy().to_string(),
        warnings,
    })
}

pub fn uninstall_hook(project_root: &Path) -> Result<HookRemovalReport, HookError> {
    let repo = discover_repo_context(project_root)?;
    let target = repo.hooks_dir.join(HOOK_NAME);
    let backup = user_hook_path(&repo);
    let mut warnings = Vec::new();
    let mut removed = false;
    let mut restored_user_hook = false;

    if target.exists() {
        if managed_mode(&target).is_some() {
            fs::remove_file(&target)?;
            removed = true;
            if backup.exists() {
                fs::rename(&backup, &target)?;
                restored_user_hook = true;
            }
        } else {
            warnings.push(format!(
                "hook at '{}' is not managed by nb-crossref; left in place",
                target.display()
            ));
        }
    }

    Ok(HookRemovalReport {
        removed,
        restored_user_hook,
        hook_path: target.to_string_lossy().to_string(),
        warnings,
    })
}

pub fn hook_status(project_root: &Path) -> Result<HookStatusReport, HookError> {
    let repo = discover_repo_context(project_root)?;
    let target = repo.hooks_dir.join(HOOK_NAME);

    let (state, mode) = if !target.exists() {
        (HookState::Missing, HookInstallMode::None)
    } else if let Some(mode) = managed_mode(&target) {
        if is_executable(&target)? {
            (HookState::Ok, mode)
        } else {
            (HookState::NotExecutable, mode)
        }
    } else {
        (HookState::Foreign, HookInstallMode::None)
    };

    let next_steps = match state {
        HookState::Ok => Vec::new(),
        HookState::Missing => vec!["run: nb-crossref hook install".to_string()],
        HookState::NotExecutable => vec![format!("run: chmod +x {}", target.display())],
        HookState::Foreign => vec!["run: nb-crossref hook install --strategy chain".to_string()],
    };

    Ok(HookStatusReport {
        state,
        mode,
        hook_path: target.to_string_lossy().to_string(),
        hooks_dir: repo.hooks_dir.to_string_lossy().to_string(),
        core_hooks_path: repo.core_hooks_path.clone(),
        user_hook_chained: mode == HookInstallMode::Chain && user_hook_path(&repo).exists(),
        next_steps,
    })
}

fn user_hook_path(repo: &RepoContext) -> std::path::PathBuf {
    repo.hooks_dir.join(format!("{HOOK_NAME}.user"))
}

fn managed_mode(target: &Path) -> Option<HookInstallMode> {
    let content = fs::read_to_string(target).unwrap_or_default();
    if content.contains(&format!("{MANAGED_MARKER} (chain)")) {
        Some(HookInstallMode::Chain)
    } else if content.contains(MANAGED_MARKER) {
        Some(HookInstallMode::Script)
    } else {
        None
    }
}

fn install_chain_wrapper(repo: &RepoContext, target: &Path) -> Result<(), HookError> {
    let backup = user_hook_path(repo);
    if backup.exists() {
        return Err(HookError::HookConflict {
            path: backup,
            reason: "a previous user hook backup already exists".to_string(),
        });
    }
    fs::rename(target, &backup)?;
    write_script(target, CHAIN_SCRIPT)
}

fn write_script(target: &Path, script: &str) -> Result<(), HookError> {
    fs::write(target, script)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(target)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(target, perms)?;
    }
    Ok(())
}

fn is_executable(path: &Path) -> Result<bool, HookError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(path)?.permissions().mode();
        Ok(mode & 0o111 != 0)
    }
    #[cfg(not(unix))]
    {
        let _ = path;
        Ok(true)
    }
}

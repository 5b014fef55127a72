use std::path::{Path, PathBuf};

use anyhow::Context;
use nbx_config::NbxConfig;
use nbx_core::WriteMode;
use nbx_hooks::{
    HookInstallMode, HookInstallStrategy, HookInstallationReport, HookRemovalReport, HookState,
    HookStatusReport,
};

use super::rewrite::{process_files, report, rewriter_for};
use crate::bootstrap::load_config;
use crate::cli::{GlobalFlags, HookCommands, HookInstallStrategyArg};
use crate::output::output;

/// Handle `nb-crossref hook`.
///
/// Returns whether the command passed.
pub fn handle(action: &HookCommands, flags: &GlobalFlags) -> anyhow::Result<bool> {
    let project_root = std::env::current_dir().context("failed to read current directory")?;

    match action {
        HookCommands::Install { strategy } => {
            let strategy = match strategy {
                HookInstallStrategyArg::Chain => HookInstallStrategy::Chain,
                HookInstallStrategyArg::Refuse => HookInstallStrategy::Refuse,
            };
            let report = nbx_hooks::install_hook(&project_root, strategy)?;
            output(&report, flags.format, install_lines)?;
            Ok(report.installed)
        }
        HookCommands::Uninstall => {
            let report = nbx_hooks::uninstall_hook(&project_root)?;
            output(&report, flags.format, uninstall_lines)?;
            Ok(true)
        }
        HookCommands::Status => {
            let report = nbx_hooks::hook_status(&project_root)?;
            output(&report, flags.format, status_lines)?;
            Ok(true)
        }
        HookCommands::PreCommit => {
            let config = load_config(flags)?;
            pre_commit(&project_root, &config, flags)
        }
    }
}

/// Check-mode run over the notebooks in the git index.
fn pre_commit(project_root: &Path, config: &NbxConfig, flags: &GlobalFlags) -> anyhow::Result<bool> {
    let files: Vec<PathBuf> =
        nbx_hooks::staged_notebooks(project_root, &config.discovery.extensions)?;
    let summary = process_files(&files, &rewriter_for(config), WriteMode::Check);
    report(&summary, flags)?;
    Ok(!summary.failed())
}

fn install_lines(report: &HookInstallationReport) -> Vec<String> {
    let mut lines = vec![if report.installed {
        format!(
            "Installed pre-commit hook ({}): {}",
            mode_name(report.mode),
            report.hook_path
        )
    } else {
        format!("Pre-commit hook not installed: {}", report.hook_path)
    }];
    lines.extend(report.warnings.iter().map(|w| format!("warning: {w}")));
    lines
}

fn uninstall_lines(report: &HookRemovalReport) -> Vec<String> {
    let mut lines = Vec::new();
    if report.removed {
        lines.push(format!("Removed pre-commit hook: {}", report.hook_path));
    } else {
        lines.push(format!("No managed pre-commit hook at {}", report.hook_path));
    }
    if report.restored_user_hook {
        lines.push("Restored the previous user hook".to_string());
    }
    lines.extend(report.warnings.iter().map(|w| format!("warning: {w}")));
    lines
}

fn status_lines(report: &HookStatusReport) -> Vec<String> {
    let mut lines = vec![format!("pre-commit hook: {}", state_name(report.state))];
    lines.push(format!("path: {}", report.hook_path));
    if let Some(path) = &report.core_hooks_path {
        lines.push(format!("core.hooksPath: {path}"));
    }
    if report.user_hook_chained {
        lines.push("chained user hook: pre-commit.user".to_string());
    }
    lines.extend(report.next_steps.iter().cloned());
    lines
}

const fn mode_name(mode: HookInstallMode) -> &'static str {
    match mode {
        HookInstallMode::Script => "script",
        HookInstallMode::Chain => "chain",
        HookInstallMode::None => "none",
    }
}

const fn state_name(state: HookState) -> &'static str {
    match state {
        HookState::Ok => "ok",
        HookState::Missing => "missing",
        HookState::NotExecutable => "not executable",
        HookState::Foreign => "foreign (not managed by nb-crossref)",
    }
}

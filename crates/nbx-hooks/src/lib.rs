//! # nbx-hooks
//!
//! Git pre-commit integration for nb-crossref.
//!
//! Uses `gix` (pure Rust git implementation) for:
//! - Repository discovery and `core.hooksPath` lookup
//! - Installing, removing and inspecting the managed `pre-commit` hook
//! - Listing notebooks tracked in the index for the hook run
//!
//! This crate isolates the `gix` dependency from the rest of the workspace,
//! so compile time impact is limited to this crate only.

pub mod error;
pub mod installer;
pub mod repo;
pub mod staged;

pub use error::HookError;
pub use installer::{
    HOOK_NAME, HookInstallMode, HookInstallStrategy, HookInstallationReport, HookRemovalReport,
    HookState, HookStatusReport, hook_status, install_hook, uninstall_hook,
};
pub use repo::{RepoContext, discover_repo_context};
pub use staged::staged_notebooks;

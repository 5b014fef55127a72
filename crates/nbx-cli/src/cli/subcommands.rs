use clap::{Subcommand, ValueEnum};

/// Pre-commit hook management and the hook's own entrypoint.
#[derive(Clone, Debug, Subcommand)]
pub enum HookCommands {
    /// Install the git pre-commit hook.
    Install {
        /// What to do with an existing hook not managed by nb-crossref.
        #[arg(long, value_enum, default_value = "refuse")]
        strategy: HookInstallStrategyArg,
    },
    /// Remove the managed hook, restoring a chained user hook.
    Uninstall,
    /// Show whether the hook is installed.
    Status,
    /// Check notebooks tracked in the git index (run by the installed hook).
    #[command(name = "pre-commit")]
    PreCommit,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum HookInstallStrategyArg {
    Chain,
    Refuse,
}

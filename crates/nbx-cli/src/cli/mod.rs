use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod global;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use subcommands::{HookCommands, HookInstallStrategyArg};

/// Top-level CLI parser for the `nb-crossref` binary.
#[derive(Debug, Parser)]
#[command(
    name = "nb-crossref",
    version,
    about = "Cross reference in Jupyter notebook files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Source files to be processed; directories are searched for notebooks
    pub files: Vec<PathBuf>,

    /// Report files that would change instead of writing them
    #[arg(long)]
    pub check: bool,

    /// Config file to use instead of ./.nb-crossref.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format: text, json
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Subcommands. Without one, the positional files are rewritten.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Git pre-commit hook management.
    Hook {
        #[command(subcommand)]
        action: HookCommands,
    },
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            config: self.config.clone(),
        }
    }
}

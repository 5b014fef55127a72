//! Aggregated result of a run over many files.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::CoreError;
use crate::notebook::{FileOutcome, WriteMode};

/// `no files`, `1 file`, `N files`.
#[must_use]
pub fn describe_count(n: usize) -> String {
    match n {
        0 => "no files".to_string(),
        1 => "1 file".to_string(),
        n => format!("{n} files"),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// A file that failed with an I/O error.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Something to report about one file.
#[derive(Debug, Clone, Copy)]
pub enum Problem<'a> {
    Failure(&'a FileFailure),
    Diagnostics(&'a FileOutcome),
}

impl Problem<'_> {
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Failure(failure) => &failure.path,
            Self::Diagnostics(outcome) => &outcome.path,
        }
    }
}

/// Position of a recorded file in `files` or `failures`.
#[derive(Debug, Clone, Copy)]
enum Slot {
    File(usize),
    Failure(usize),
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub mode: WriteMode,
    pub processed: usize,
    pub changed: usize,
    pub files: Vec<FileOutcome>,
    pub failures: Vec<FileFailure>,
    #[serde(skip)]
    order: Vec<Slot>,
}

impl RunSummary {
    #[must_use]
    pub const fn new(mode: WriteMode) -> Self {
        Self {
            mode,
            processed: 0,
            changed: 0,
            files: Vec::new(),
            failures: Vec::new(),
            order: Vec::new(),
        }
    }

    /// Count one processed file.
    pub fn record(&mut self, result: Result<FileOutcome, CoreError>) {
        self.processed += 1;
        match result {
            Ok(outcome) => {
                if outcome.changed {
                    self.changed += 1;
                }
                self.order.push(Slot::File(self.files.len()));
                self.files.push(outcome);
            }
            Err(error) => {
                self.order.push(Slot::Failure(self.failures.len()));
                self.failures.push(FileFailure {
                    path: error.path().to_path_buf(),
                    error: error.to_string(),
                });
            }
        }
    }

    /// `<N files> processed. <M files> changed.`
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "{} processed. {} changed.",
            capitalize(&describe_count(self.processed)),
            capitalize(&describe_count(self.changed))
        )
    }

    /// Outcomes with at least one diagnostic.
    pub fn with_diagnostics(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files
            .iter()
            .filter(|outcome| !outcome.diagnostics.is_empty())
    }

    /// Failures and files with diagnostics, in processing order.
    pub fn problems(&self) -> impl Iterator<Item = Problem<'_>> {
        self.order.iter().filter_map(|slot| match *slot {
            Slot::Failure(i) => Some(Problem::Failure(&self.failures[i])),
            Slot::File(i) => {
                let outcome = &self.files[i];
                (!outcome.diagnostics.is_empty()).then_some(Problem::Diagnostics(outcome))
            }
        })
    }

    /// Whether the run should end with a failing exit status.
    ///
    /// In check mode a file that would change counts as a failure too.
    #[must_use]
    pub fn failed(&self) -> bool {
        !self.failures.is_empty()
            || self.with_diagnostics().next().is_some()
            || (self.mode == WriteMode::Check && self.changed > 0)
    }
}

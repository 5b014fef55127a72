use std::path::{Path, PathBuf};

use nbx_config::{DiscoveryConfig, NbxConfig};
use nbx_core::{Problem, Rewriter, RunSummary, WriteMode, process_file};
use serde::Serialize;
use tracing::debug;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::discover::find_notebooks;
use crate::output::output;

#[derive(Debug, Serialize)]
struct RewriteResponse<'a> {
    summary: String,
    #[serde(flatten)]
    run: &'a RunSummary,
}

/// Rewriter with the passes enabled in `config`.
#[must_use]
pub const fn rewriter_for(config: &NbxConfig) -> Rewriter {
    Rewriter {
        footnotes: config.rewrite.footnotes,
        equations: config.rewrite.equations,
    }
}

/// Handle `nb-crossref [--check] FILES...`.
///
/// Returns whether the run passed.
pub fn handle(
    targets: &[PathBuf],
    check: bool,
    config: &NbxConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<bool> {
    let files = expand_targets(targets, &config.discovery)?;
    let mode = if check { WriteMode::Check } else { WriteMode::Write };
    let summary = process_files(&files, &rewriter_for(config), mode);
    report(&summary, flags)?;
    Ok(!summary.failed())
}

/// Directories are walked for notebooks; anything else is taken as a file.
pub fn expand_targets(
    targets: &[PathBuf],
    discovery: &DiscoveryConfig,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for target in targets {
        if target.is_dir() {
            let found = find_notebooks(target, discovery)?;
            debug!(dir = %target.display(), count = found.len(), "discovered notebooks");
            files.extend(found);
        } else {
            files.push(target.clone());
        }
    }
    Ok(files)
}

/// Rewrite every file in order, recording failures without stopping.
pub fn process_files(files: &[PathBuf], rewriter: &Rewriter, mode: WriteMode) -> RunSummary {
    let mut summary = RunSummary::new(mode);
    for path in files {
        summary.record(process_file(path, rewriter, mode));
    }
    summary
}

/// Print the run: summary on stdout, problems on stderr.
pub fn report(summary: &RunSummary, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = RewriteResponse {
        summary: summary.summary_line(),
        run: summary,
    };
    output(&response, flags.format, |response| {
        text_lines(response.run, flags.quiet)
    })?;

    if flags.format == OutputFormat::Text {
        for line in problem_lines(summary) {
            eprintln!("{line}");
        }
    }
    Ok(())
}

fn text_lines(summary: &RunSummary, quiet: bool) -> Vec<String> {
    let verb = match summary.mode {
        WriteMode::Write => "Changed",
        WriteMode::Check => "Would change",
    };
    let mut lines = Vec::new();
    if !quiet {
        lines.extend(
            summary
                .files
                .iter()
                .filter(|outcome| outcome.changed)
                .map(|outcome| format!("{verb}: {}", outcome.path.display())),
        );
    }
    lines.push(summary.summary_line());
    lines
}

fn problem_lines(summary: &RunSummary) -> Vec<String> {
    let mut lines = Vec::new();
    for problem in summary.problems() {
        lines.push(error_header(problem.path()));
        match problem {
            Problem::Failure(failure) => lines.push(failure.error.clone()),
            Problem::Diagnostics(outcome) => {
                lines.extend(outcome.diagnostics.iter().map(ToString::to_string));
            }
        }
    }
    lines
}

fn error_header(path: &Path) -> String {
    format!("Error: in file {}:", path.display())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use nbx_core::{Diagnostic, FileOutcome};
    use pretty_assertions::assert_eq;

    use super::*;

    fn fixture_dir() -> tempfile::TempDir {
        tempfile::Builder::new()
            .prefix("nbx")
            .tempdir()
            .expect("tempdir should be created")
    }

    fn outcome(path: &str, changed: bool, diagnostics: Vec<Diagnostic>) -> FileOutcome {
        FileOutcome {
            path: PathBuf::from(path),
            changed,
            written: changed,
            diagnostics,
        }
    }

    #[test]
    fn text_lists_changed_files_then_summary() {
        let mut summary = RunSummary::new(WriteMode::Write);
        summary.record(Ok(outcome("a.ipynb", true, Vec::new())));
        summary.record(Ok(outcome("b.ipynb", false, Vec::new())));

        assert_eq!(
            text_lines(&summary, false),
            vec!["Changed: a.ipynb", "2 files processed. 1 file changed."]
        );
        assert_eq!(
            text_lines(&summary, true),
            vec!["2 files processed. 1 file changed."]
        );
    }

    #[test]
    fn check_mode_says_would_change() {
        let mut summary = RunSummary::new(WriteMode::Check);
        summary.record(Ok(outcome("a.ipynb", true, Vec::new())));

        assert_eq!(text_lines(&summary, false)[0], "Would change: a.ipynb");
    }

    #[test]
    fn problems_are_grouped_per_file() {
        let mut summary = RunSummary::new(WriteMode::Write);
        summary.record(Ok(outcome(
            "a.ipynb",
            false,
            vec![
                Diagnostic::FootnotesNotFound(vec!["x".into()]),
                Diagnostic::DuplicatedTags(vec!["1".into()]),
            ],
        )));

        assert_eq!(
            problem_lines(&summary),
            vec![
                "Error: in file a.ipynb:",
                "Footnotes not found: x",
                "Duplicated tags: 1",
            ]
        );
    }

    #[test]
    fn problems_are_reported_in_processing_order() {
        let mut summary = RunSummary::new(WriteMode::Write);
        summary.record(Ok(outcome(
            "a.ipynb",
            false,
            vec![Diagnostic::DuplicatedTags(vec!["1".into()])],
        )));
        summary.record(Err(nbx_core::CoreError::Read {
            path: PathBuf::from("b.ipynb"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        }));

        let lines = problem_lines(&summary);

        assert_eq!(lines[0], "Error: in file a.ipynb:");
        assert_eq!(lines[1], "Duplicated tags: 1");
        assert_eq!(lines[2], "Error: in file b.ipynb:");
        assert!(lines[3].starts_with("failed to read b.ipynb"));
    }

    #[test]
    fn explicit_files_are_kept_and_directories_walked() {
        let tmp = fixture_dir();
        fs::create_dir_all(tmp.path().join("nb")).unwrap();
        fs::write(tmp.path().join("nb/x.ipynb"), "{}").unwrap();
        let explicit = tmp.path().join("notes.txt");
        fs::write(&explicit, "{}").unwrap();

        let files = expand_targets(
            &[explicit.clone(), tmp.path().join("nb")],
            &DiscoveryConfig::default(),
        )
        .unwrap();

        assert_eq!(files, vec![explicit, tmp.path().join("nb/x.ipynb")]);
    }

    #[test]
    fn missing_file_is_recorded_and_run_continues() {
        let tmp = fixture_dir();
        let good = tmp.path().join("good.ipynb");
        fs::write(&good, r"x \\tag{a}").unwrap();
        let missing = tmp.path().join("missing.ipynb");

        let summary = process_files(&[missing, good.clone()], &Rewriter::default(), WriteMode::Write);

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.changed, 1);
        assert_eq!(summary.failures.len(), 1);
        assert!(summary.failed());
        assert_eq!(fs::read_to_string(good).unwrap(), "x \\\\tag{1}\n");
    }

    #[test]
    fn rewriter_follows_config() {
        let mut config = NbxConfig::default();
        config.rewrite.equations = false;
        let rewriter = rewriter_for(&config);
        assert!(rewriter.footnotes);
        assert!(!rewriter.equations);
    }
}

//! End-to-end rewriting of notebook files on disk.

use std::fs;

use nbx_core::{Diagnostic, Rewriter, RunSummary, WriteMode, process_file};
use pretty_assertions::assert_eq;

const NOTEBOOK: &str = r##"{
 "cells": [
  {
   "cell_type": "markdown",
   "metadata": {},
   "source": [
    "# Results\n",
    "\n",
    "Energy is conserved[^noether] and mass too[^lavoisier].\n",
    "$$\n",
    "E = mc^2 \\tag{energy}\n",
    "$$\n",
    "Compare \\eqref{energy} with `[^a-z]` in regex."
   ]
  },
  {
   "cell_type": "markdown",
   "metadata": {},
   "source": [
    "[^lavoisier]: Lavoisier, 1789.\n",
    "[^noether]: Noether, 1918."
   ]
  }
 ],
 "nbformat": 4,
 "nbformat_minor": 5
}"##;

const EXPECTED: &str = r##"{
 "cells": [
  {
   "cell_type": "markdown",
   "metadata": {},
   "source": [
    "# Results\n",
    "\n",
    "Energy is conserved<a name=\"cite_ref-1\"></a>[<sup>[1]</sup>](#cite_note-1) and mass too<a name=\"cite_ref-2\"></a>[<sup>[2]</sup>](#cite_note-2).\n",
    "$$\n",
    "E = mc^2 \\tag{1}\n",
    "$$\n",
    "Compare <!-- eqref -->(1) with `[^a-z]` in regex."
   ]
  },
  {
   "cell_type": "markdown",
   "metadata": {},
   "source": [
    "<a name=\"cite_note-2\"></a>2.&nbsp;[^](#cite_ref-2) Lavoisier, 1789.\n",
    "<a name=\"cite_note-1\"></a>1.&nbsp;[^](#cite_ref-1) Noether, 1918."
   ]
  }
 ],
 "nbformat": 4,
 "nbformat_minor": 5
}
"##;

#[test]
fn rewrites_notebook_and_reports_ordering() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("physics.ipynb");
    fs::write(&path, NOTEBOOK).unwrap();

    let outcome = process_file(&path, &Rewriter::default(), WriteMode::Write).unwrap();

    assert!(outcome.written);
    assert_eq!(fs::read_to_string(&path).unwrap(), EXPECTED);
    assert_eq!(
        outcome.diagnostics,
        vec![Diagnostic::WronglyOrderedFootnotes(vec![(
            "2".into(),
            "1".into()
        )])]
    );
}

#[test]
fn second_run_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("physics.ipynb");
    fs::write(&path, NOTEBOOK).unwrap();

    process_file(&path, &Rewriter::default(), WriteMode::Write).unwrap();
    let second = process_file(&path, &Rewriter::default(), WriteMode::Write).unwrap();

    assert!(!second.changed);
    assert_eq!(fs::read_to_string(&path).unwrap(), EXPECTED);
}

#[test]
fn rewritten_notebook_is_still_valid_json() {
    let rendered = Rewriter::default().rewrite(NOTEBOOK).render();
    let notebook: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    assert_eq!(
        notebook["cells"][0]["source"][4],
        serde_json::json!("E = mc^2 \\tag{1}\n")
    );
    assert_eq!(
        notebook["cells"][1]["source"][1],
        serde_json::json!(
            "<a name=\"cite_note-1\"></a>1.&nbsp;[^](#cite_ref-1) Noether, 1918."
        )
    );
}

#[test]
fn summary_across_files() {
    let dir = tempfile::tempdir().unwrap();
    let changed = dir.path().join("changed.ipynb");
    let clean = dir.path().join("clean.ipynb");
    fs::write(&changed, NOTEBOOK).unwrap();
    fs::write(&clean, "{}\n").unwrap();

    let mut summary = RunSummary::new(WriteMode::Check);
    for path in [&changed, &clean] {
        summary.record(process_file(path, &Rewriter::default(), WriteMode::Check));
    }

    assert_eq!(summary.summary_line(), "2 files processed. 1 file changed.");
    assert!(summary.failed());
    assert_eq!(fs::read_to_string(&changed).unwrap(), NOTEBOOK);
}

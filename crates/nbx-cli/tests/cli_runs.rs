//! End-to-end runs of the `nb-crossref` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

const TAGGED: &str = r#"{
 "cells": [
  {
   "cell_type": "markdown",
   "source": [
    "$$ e = mc^2 \\tag{energy} $$\n",
    "See \\eqref{energy}.\n"
   ]
  }
 ]
}"#;

const BROKEN: &str = r#"{
 "cells": [
  {
   "cell_type": "markdown",
   "source": [
    "$$ a = b \\tag{a} $$ and \\eqref{nope}\n"
   ]
  }
 ]
}"#;

fn nb_crossref(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_nb-crossref"))
        .args(args)
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join(".config-home"))
        .env_remove("NB_CROSSREF_LOG")
        .output()
        .expect("binary should run")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn no_files_is_an_empty_successful_run() {
    let tmp = tempfile::tempdir().unwrap();

    let output = nb_crossref(tmp.path(), &[]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "No files processed. No files changed.\n");
}

#[test]
fn directory_run_rewrites_and_skips_hidden() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("book/.ipynb_checkpoints")).unwrap();
    fs::write(tmp.path().join("book/ch1.ipynb"), TAGGED).unwrap();
    fs::write(tmp.path().join("book/.ipynb_checkpoints/ch1.ipynb"), TAGGED).unwrap();

    let output = nb_crossref(tmp.path(), &["book"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Changed: book/ch1.ipynb\n1 file processed. 1 file changed.\n"
    );
    let rewritten = fs::read_to_string(tmp.path().join("book/ch1.ipynb")).unwrap();
    assert!(rewritten.contains(r"\\tag{1}"));
    assert!(rewritten.contains("See <!-- eqref -->(1)."));
    assert_eq!(
        fs::read_to_string(tmp.path().join("book/.ipynb_checkpoints/ch1.ipynb")).unwrap(),
        TAGGED
    );
}

#[test]
fn second_run_changes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("a.ipynb"), TAGGED).unwrap();

    nb_crossref(tmp.path(), &["a.ipynb"]);
    let output = nb_crossref(tmp.path(), &["a.ipynb"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "1 file processed. No files changed.\n");
}

#[test]
fn check_mode_fails_without_writing() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("a.ipynb"), TAGGED).unwrap();

    let output = nb_crossref(tmp.path(), &["--check", "a.ipynb"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "Would change: a.ipynb\n1 file processed. 1 file changed.\n"
    );
    assert_eq!(fs::read_to_string(tmp.path().join("a.ipynb")).unwrap(), TAGGED);
}

#[test]
fn diagnostics_go_to_stderr_with_exit_one() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("bad.ipynb"), BROKEN).unwrap();

    let output = nb_crossref(tmp.path(), &["bad.ipynb"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("Error: in file bad.ipynb:\nTags not found: nope\n"),
        "stderr: {}",
        stderr(&output)
    );
}

#[test]
fn missing_file_is_reported_and_others_still_run() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("a.ipynb"), TAGGED).unwrap();

    let output = nb_crossref(tmp.path(), &["gone.ipynb", "a.ipynb"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("2 files processed. 1 file changed."));
    assert!(stderr(&output).contains("Error: in file gone.ipynb:"));
}

#[test]
fn json_format_prints_one_summary_object() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("a.ipynb"), TAGGED).unwrap();

    let output = nb_crossref(tmp.path(), &["--format", "json", "--check", "a.ipynb"]);

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["summary"], "1 file processed. 1 file changed.");
    assert_eq!(value["mode"], "check");
    assert_eq!(value["processed"], 1);
    assert_eq!(value["files"][0]["changed"], true);
    assert_eq!(value["files"][0]["written"], false);
}

#[test]
fn project_config_can_disable_equations() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("a.ipynb"), TAGGED).unwrap();
    fs::write(
        tmp.path().join(".nb-crossref.toml"),
        "[rewrite]\nequations = false\n",
    )
    .unwrap();

    let output = nb_crossref(tmp.path(), &["a.ipynb"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "1 file processed. No files changed.\n");
}

#[test]
fn missing_explicit_config_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();

    let output = nb_crossref(tmp.path(), &["--config", "nope.toml"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("nb-crossref error:"));
}

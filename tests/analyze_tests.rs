//! Integration tests for the analyze command

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

mod common;
use common::serene_cmd;

fn write_lexicon(root: &Path, extra_positive: &str) {
    let config = format!(
        "trial_days = 30\ncreated = \"2025-01-01T00:00:00Z\"\n\n[lexicon]\nextra_positive = {}\n",
        extra_positive
    );
    fs::write(root.join(".serene/config.toml"), config).unwrap();
}

#[test]
fn test_analyze_args() {
    let temp = TempDir::new().unwrap();

    serene_cmd()
        .current_dir(temp.path())
        .args(["analyze", "What", "a", "WONDERFUL", "day!!!"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Positive\n"));

    serene_cmd()
        .current_dir(temp.path())
        .args(["analyze", "happy", "sad"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Neutral\n"));
}

#[test]
fn test_analyze_stdin() {
    let temp = TempDir::new().unwrap();

    serene_cmd()
        .current_dir(temp.path())
        .arg("analyze")
        .write_stdin("Worried and anxious.\nBut hopeful.")
        .assert()
        .success()
        .stdout(predicate::str::diff("Negative\n"));

    serene_cmd()
        .current_dir(temp.path())
        .arg("analyze")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::diff("Neutral\n"));
}

#[test]
fn test_analyze_uses_journal_lexicon() {
    let temp = TempDir::new().unwrap();
    serene_cmd().arg("init").arg(temp.path()).assert().success();

    write_lexicon(temp.path(), "[\"sunny\"]");

    serene_cmd()
        .current_dir(temp.path())
        .args(["analyze", "a", "sunny", "morning"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Positive\n"));
}

#[test]
fn test_analyze_rejects_overlapping_lexicon() {
    let temp = TempDir::new().unwrap();
    serene_cmd().arg("init").arg(temp.path()).assert().success();

    write_lexicon(temp.path(), "[\"sad\"]");

    serene_cmd()
        .current_dir(temp.path())
        .args(["analyze", "anything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'sad'"));
}

#[test]
fn test_analyze_reports_bad_serene_root() {
    let temp = TempDir::new().unwrap();

    serene_cmd()
        .current_dir(temp.path())
        .env("SERENE_ROOT", temp.path())
        .args(["analyze", "happy"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("SERENE_ROOT"));
}

//! Integration tests for writing, editing and listing entries

#![allow(deprecated)]

use chrono::Utc;
use predicates::prelude::*;
use std::fs;

mod common;
use common::{journal_with_user, serene_cmd, user_cmd};

#[test]
fn test_add_classifies_entry() {
    let temp = journal_with_user(30);

    user_cmd(temp.path(), "ada")
        .args(["add", "--mood", "happy", "I", "am", "so", "happy", "and", "full", "of", "joy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved entry 1 (Positive)"))
        .stdout(predicate::str::contains("Suggestions for feeling 😊 Happy:"))
        .stdout(predicate::str::contains("  - Share your happiness"));

    let stored = fs::read_to_string(temp.path().join("users/ada/entries/1.toml")).unwrap();
    assert!(stored.contains("sentiment = \"Positive\""));
    assert!(stored.contains("mood = \"Happy\""));
}

#[test]
fn test_add_reads_stdin() {
    let temp = journal_with_user(30);

    user_cmd(temp.path(), "ada")
        .args(["add", "--mood", "sad"])
        .write_stdin("I feel sad and angry and terrible\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("(Negative)"));
}

#[test]
fn test_add_with_sentiment_override() {
    let temp = journal_with_user(30);

    user_cmd(temp.path(), "ada")
        .args(["add", "--mood", "tired", "--sentiment", "negative", "a", "good", "day"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(Negative)"));

    user_cmd(temp.path(), "ada")
        .args(["add", "--mood", "tired", "--sentiment", "meh", "a", "good", "day"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Invalid sentiment"));
}

#[test]
fn test_add_rejects_bad_input() {
    let temp = journal_with_user(30);

    user_cmd(temp.path(), "ada")
        .args(["add", "--mood", "bored", "hello"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Valid moods"));

    user_cmd(temp.path(), "ada")
        .args(["add", "--mood", "happy"])
        .write_stdin("   \n")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("must not be empty"));

    let too_long = "a".repeat(5001);
    user_cmd(temp.path(), "ada")
        .args(["add", "--mood", "happy", &too_long])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn test_add_requires_user() {
    let temp = journal_with_user(30);

    serene_cmd()
        .current_dir(temp.path())
        .args(["add", "--mood", "happy", "hello"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("SERENE_USER"));

    user_cmd(temp.path(), "nobody")
        .args(["add", "--mood", "happy", "hello"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("serene register nobody"));
}

#[test]
fn test_expired_trial_blocks_new_entries() {
    let temp = journal_with_user(0);

    user_cmd(temp.path(), "ada")
        .args(["add", "--mood", "happy", "hello"])
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("serene subscribe"));
}

#[test]
fn test_edit_recomputes_sentiment() {
    let temp = journal_with_user(30);

    user_cmd(temp.path(), "ada")
        .args(["add", "--mood", "happy", "a", "great", "day"])
        .assert()
        .success();

    user_cmd(temp.path(), "ada")
        .args(["edit", "1", "an", "awful", "day"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated entry 1 (Negative)"));

    user_cmd(temp.path(), "ada")
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mood:      😊 Happy"))
        .stdout(predicate::str::contains("Sentiment: Negative"))
        .stdout(predicate::str::contains("an awful day"));
}

#[test]
fn test_entries_are_private() {
    let temp = journal_with_user(30);

    serene_cmd()
        .current_dir(temp.path())
        .args(["register", "grace", "--email", "grace@example.com"])
        .assert()
        .success();

    user_cmd(temp.path(), "ada")
        .args(["add", "--mood", "neutral", "just", "a", "day"])
        .assert()
        .success();

    user_cmd(temp.path(), "grace")
        .args(["show", "1"])
        .assert()
        .failure()
        .code(4);

    user_cmd(temp.path(), "grace")
        .args(["delete", "1"])
        .assert()
        .failure()
        .code(4);
}

#[test]
fn test_path_like_user_rejected() {
    let temp = journal_with_user(30);

    user_cmd(temp.path(), "ada")
        .args(["add", "--mood", "neutral", "plain"])
        .assert()
        .success();

    user_cmd(temp.path(), "../users/ada")
        .args(["show", "1"])
        .assert()
        .failure()
        .code(4);
}

#[test]
fn test_deleted_newest_id_not_reused() {
    let temp = journal_with_user(30);

    for text in ["one", "two"] {
        user_cmd(temp.path(), "ada")
            .args(["add", "--mood", "neutral", text])
            .assert()
            .success();
    }
    user_cmd(temp.path(), "ada")
        .args(["delete", "2"])
        .assert()
        .success();

    user_cmd(temp.path(), "ada")
        .args(["add", "--mood", "neutral", "three"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved entry 3"));
}

#[test]
fn test_delete_entry() {
    let temp = journal_with_user(30);

    user_cmd(temp.path(), "ada")
        .args(["add", "--mood", "sad", "lonely"])
        .assert()
        .success();

    user_cmd(temp.path(), "ada")
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted entry 1"));

    user_cmd(temp.path(), "ada")
        .args(["show", "1"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("serene list"));
}

#[test]
fn test_list_newest_first_with_limit() {
    let temp = journal_with_user(30);

    for text in ["first", "second", "third"] {
        user_cmd(temp.path(), "ada")
            .args(["add", "--mood", "neutral", text])
            .assert()
            .success();
    }

    let output = user_cmd(temp.path(), "ada")
        .args(["list"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let third = stdout.find("third").unwrap();
    let first = stdout.find("first").unwrap();
    assert!(third < first);

    user_cmd(temp.path(), "ada")
        .args(["list", "-n", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("third"))
        .stdout(predicate::str::contains("first").not());
}

#[test]
fn test_list_by_date() {
    let temp = journal_with_user(30);

    user_cmd(temp.path(), "ada")
        .args(["add", "--mood", "happy", "today", "was", "good"])
        .assert()
        .success();

    user_cmd(temp.path(), "ada")
        .args(["list", "--date", "today"])
        .assert()
        .success()
        .stdout(predicate::str::contains("today was good"));

    user_cmd(temp.path(), "ada")
        .args(["list", "--date", "yesterday"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found"));

    let today = Utc::now().format("%d-%m-%Y").to_string();
    user_cmd(temp.path(), "ada")
        .args(["list", "--from", &today, "--to", &today])
        .assert()
        .success()
        .stdout(predicate::str::contains("today was good"));

    user_cmd(temp.path(), "ada")
        .args(["list", "--from", "2025-01-17"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("DD-MM-YYYY"));
}

#[test]
fn test_calendar_and_dashboard() {
    let temp = journal_with_user(30);

    user_cmd(temp.path(), "ada")
        .args(["calendar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries in this period"));

    user_cmd(temp.path(), "ada")
        .args(["add", "--mood", "happy", "love", "this"])
        .assert()
        .success();
    user_cmd(temp.path(), "ada")
        .args(["add", "--mood", "tired", "so", "stressed"])
        .assert()
        .success();

    let today = Utc::now().format("%d-%m-%Y").to_string();
    user_cmd(temp.path(), "ada")
        .args(["calendar", "--days", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains(today))
        .stdout(predicate::str::contains("2 entries"));

    user_cmd(temp.path(), "ada")
        .args(["dashboard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada  (ada@example.com)"))
        .stdout(predicate::str::contains("Entries: 2"))
        .stdout(predicate::str::contains("trial ("))
        .stdout(predicate::str::contains("Suggestions for feeling 😴 Tired:"))
        .stdout(predicate::str::contains("Take a power nap"))
        .stdout(predicate::str::contains("so stressed"));
}

#[test]
fn test_calendar_days_out_of_range() {
    let temp = journal_with_user(30);

    for days in ["0", "9999999999999"] {
        user_cmd(temp.path(), "ada")
            .args(["calendar", "--days", days])
            .assert()
            .failure()
            .code(2)
            .stderr(predicate::str::contains("1..=3650"));
    }
}

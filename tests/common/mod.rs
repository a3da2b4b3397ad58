#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

pub fn serene_cmd() -> Command {
    let mut cmd = Command::cargo_bin("serene").unwrap();
    cmd.env_remove("SERENE_ROOT");
    cmd.env_remove("SERENE_USER");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// `serene` run inside `root` as `user`
pub fn user_cmd(root: &Path, user: &str) -> Command {
    let mut cmd = serene_cmd();
    cmd.current_dir(root).env("SERENE_USER", user);
    cmd
}

/// Initialized journal with one registered user, "ada"
pub fn journal_with_user(trial_days: i64) -> TempDir {
    let temp = TempDir::new().unwrap();

    serene_cmd()
        .arg("init")
        .arg(temp.path())
        .arg("--trial-days")
        .arg(trial_days.to_string())
        .assert()
        .success();

    serene_cmd()
        .current_dir(temp.path())
        .args(["register", "ada", "--email", "ada@example.com", "--name", "Ada"])
        .assert()
        .success();

    temp
}

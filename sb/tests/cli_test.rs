//! CLI smoke tests for the `sb` binary

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_shows_usage() {
    Command::cargo_bin("sb")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("micro-steps"))
        .stdout(predicate::str::contains("plan"));
}

#[test]
fn test_version_runs() {
    Command::cargo_bin("sb").unwrap().arg("--version").assert().success();
}

#[test]
fn test_plan_without_api_key_fails_fast() {
    Command::cargo_bin("sb")
        .unwrap()
        .env_remove("ANTHROPIC_API_KEY")
        .args(["plan", "写数学作业", "--now", "刷抖音"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ANTHROPIC_API_KEY"));
}

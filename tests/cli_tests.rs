//! Integration tests for the gan-smoke CLI.

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to write a scenario suite file into a temp directory.
fn write_suite(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("suite.yaml");
    fs::write(&path, content).expect("Failed to write test suite");
    path
}

/// Helper to run the gan-smoke CLI with given arguments.
///
/// Tracking credentials are stripped so runs never touch a real service.
fn run_cli(args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gan-smoke").expect("Failed to find gan-smoke binary");
    cmd.args(args);
    cmd.env_remove("TRACKING_API_KEY");
    cmd.env_remove("TRACKING_REST_API_KEY");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_run_default_suite_passes() {
    let mut cmd = run_cli(&["run"]);

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("[1/5] MSD no tracking"))
        .stdout(predicates::str::contains("[5/5] MSDP with end-to-end"))
        .stdout(predicates::str::contains("All scenarios were successful"));
}

#[test]
fn test_run_failing_scenario_sets_exit_code() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let suite = write_suite(
        temp_dir.path(),
        r"
- description: unknown task code
  overrides:
    tasks: [z]
- description: plain baseline
",
    );

    let mut cmd = run_cli(&["run", "--suite", suite.to_str().unwrap()]);

    cmd.assert()
        .failure()
        .stdout(predicates::str::contains("1 successful tests"))
        .stdout(predicates::str::contains("Failed test indices: 0"));
}

#[test]
fn test_run_broken_override_path_is_fatal() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let suite = write_suite(
        temp_dir.path(),
        r"
- description: path into nowhere
  overrides:
    gen.encoder.depth: 3
",
    );

    let mut cmd = run_cli(&["run", "--suite", suite.to_str().unwrap()]);

    // a broken suite aborts the batch before any summary
    cmd.assert()
        .failure()
        .stdout(predicates::str::contains("Summary").not());
}

#[test]
fn test_run_no_end_to_end_disables_the_flag() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    // end-to-end without the painter task fails unless the flag is cleared
    let suite = write_suite(
        temp_dir.path(),
        r"
- description: masker only end-to-end
  end_to_end: true
",
    );

    run_cli(&["run", "--suite", suite.to_str().unwrap()])
        .assert()
        .failure();

    run_cli(&["run", "--suite", suite.to_str().unwrap(), "--no-end-to-end"])
        .assert()
        .success()
        .stdout(predicates::str::contains("All scenarios were successful"));
}

#[test]
fn test_run_missing_suite_file() {
    let mut cmd = run_cli(&["run", "--suite", "/nonexistent/suite.yaml"]);
    cmd.assert().failure();
}

#[test]
fn test_list_default_suite() {
    let mut cmd = run_cli(&["list"]);

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("0: MSD no tracking"))
        .stdout(predicates::str::contains("4: MSDP with end-to-end"))
        .stdout(predicates::str::contains("end-to-end: true"));
}

#[test]
fn test_init_writes_parseable_baseline() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("baseline.yaml");

    let mut cmd = run_cli(&["init", output.to_str().unwrap()]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Baseline configuration written"));

    let text = fs::read_to_string(&output).expect("baseline written");
    let parsed: serde_yaml::Value = serde_yaml::from_str(&text).expect("baseline parses");
    assert!(parsed.get("tasks").is_some());
    assert!(parsed.get("data").is_some());
}

#[test]
fn test_run_help() {
    let mut cmd = run_cli(&["run", "--help"]);

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Run the scenario suite"))
        .stdout(predicates::str::contains("--no-delete"))
        .stdout(predicates::str::contains("--no-end-to-end"));
}

#[test]
fn test_help_lists_subcommands() {
    let mut cmd = run_cli(&["--help"]);

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("run"))
        .stdout(predicates::str::contains("list"))
        .stdout(predicates::str::contains("init"));
}

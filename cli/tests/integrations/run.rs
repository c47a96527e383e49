use assert_cmd::Command;
use predicates::prelude::*;

fn echoprobe() -> Command {
    Command::cargo_bin("echoprobe").unwrap()
}

#[test]
fn test_cli_run_memory_target_passes() {
    let mut cmd = echoprobe();
    cmd.arg("run").arg("--rounds").arg("5").arg("--seed").arg("42");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("PASS"))
        .stderr(predicate::str::contains("seed: 42"))
        .stderr(predicate::str::contains("PASS: 5/5 rounds passed (seed 42)"));
}

#[test]
fn test_cli_run_prints_fresh_seed() {
    let mut cmd = echoprobe();
    cmd.arg("run").arg("--rounds").arg("3");

    cmd.assert()
        .success()
        .stderr(predicate::str::is_match(r"seed: \d+").unwrap());
}

#[test]
fn test_cli_run_dropped_write_fails() {
    let mut cmd = echoprobe();
    cmd.args(["run", "--rounds", "5", "--min", "1", "--max", "1000000"])
        .args(["--seed", "7", "--drop-write", "2"]);

    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("mismatch"))
        .stderr(predicate::str::contains("FAIL at round 2: expected"));
}

#[test]
fn test_cli_run_stop_on_first_failure() {
    let mut cmd = echoprobe();
    cmd.args(["run", "--rounds", "50", "--seed", "7", "--drop-write", "0"])
        .args(["--min", "1", "--max", "1000000", "--stop-on-first-failure", "--json"]);

    let output = cmd.output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["summary"]["verdict"], "FAIL");
    assert_eq!(report["result"]["rounds_completed"], 1);
    assert_eq!(report["result"]["rounds"].as_array().unwrap().len(), 1);
}

#[test]
fn test_cli_run_json_is_reproducible() {
    let run = || {
        let output = echoprobe()
            .args(["run", "--rounds", "10", "--seed", "0x2a", "--json"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        report["result"]["rounds"].clone()
    };

    let first = run();
    assert_eq!(first.as_array().unwrap().len(), 10);
    assert_eq!(first, run());
}

#[test]
fn test_cli_run_negative_bounds() {
    let mut cmd = echoprobe();
    cmd.args(["run", "--rounds", "5", "--min", "-10", "--max", "-1", "--json"]);

    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    for round in report["result"]["rounds"].as_array().unwrap() {
        let input = round["input"].as_i64().unwrap();
        assert!((-10..=-1).contains(&input));
    }
}

#[test]
fn test_cli_run_failures_only() {
    let mut cmd = echoprobe();
    cmd.args(["run", "--rounds", "20", "--seed", "3", "--failures-only", "--json"]);

    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["result"]["rounds_completed"], 20);
    assert!(report["result"]["rounds"].as_array().unwrap().is_empty());
}

#[test]
fn test_cli_run_inverted_domain_is_setup_error() {
    let mut cmd = echoprobe();
    cmd.args(["run", "--min", "10", "--max", "1"]);

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid domain"))
        .stderr(predicate::str::contains("seed:").not());
}

#[test]
fn test_cli_run_zero_rounds_is_setup_error() {
    let mut cmd = echoprobe();
    cmd.args(["run", "--rounds", "0"]);

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("--rounds"));
}

#[test]
fn test_cli_run_bad_seed_is_setup_error() {
    let mut cmd = echoprobe();
    cmd.args(["run", "--seed", "not-a-number"]);

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid seed"));
}

#[test]
fn test_cli_run_unknown_target_is_setup_error() {
    let mut cmd = echoprobe();
    cmd.args(["run", "--target", "carrier-pigeon", "--seed", "1"]);

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown target"));
}

#[test]
fn test_cli_run_unreachable_target_is_setup_error() {
    let mut cmd = echoprobe();
    cmd.args(["run", "--target", "http://127.0.0.1:1", "--timeout-ms", "500"])
        .args(["--seed", "1"]);

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Target unreachable"));
}

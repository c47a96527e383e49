use assert_cmd::Command;

#[test]
fn test_serve_command_available() {
    let mut cmd = Command::cargo_bin("echoprobe").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("serve"));
}

#[test]
fn test_serve_rejects_bad_host() {
    let mut cmd = Command::cargo_bin("echoprobe").unwrap();
    cmd.args(["serve", "--host", "not a host", "--port", "0"]);

    cmd.assert().code(2);
}

use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn discovery() -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo_bin_cmd!("discovery");
    cmd.env("DISCOVERY_RC", "/nonexistent/.discoveryrc")
        .env("DISCOVERY_LOG", "off");
    cmd
}

#[test]
fn unknown_command_prints_help() {
    discovery()
        .arg("bogus")
        .assert()
        .success()
        .stdout(predicate::str::contains("discovery add"))
        .stdout(predicate::str::contains("discovery show"))
        .stdout(predicate::str::contains("discovery delete"));
}

#[test]
fn show_uses_alias_file() {
    let mut alias_file = NamedTempFile::new().expect("temp file");
    writeln!(alias_file, "alias2 = http://h1:8080, http://h2:8080").expect("write aliases");

    let assert = discovery()
        .env("DISCOVERY_RC", alias_file.path())
        .args(["show", "alias2", "-o", "id"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let plan: serde_json::Value = serde_json::from_str(&stdout).expect("plan is JSON");
    assert_eq!(plan["command"], "SHOW");
    assert_eq!(plan["output"], "ID");
    assert_eq!(
        plan["hosts"],
        serde_json::json!(["http://h1:8080", "http://h2:8080"])
    );
}

#[test]
fn add_reads_json_from_stdin() {
    let assert = discovery()
        .args(["add", "--JSON", "-"])
        .write_stdin(r#"{"environment":"prod","type":"web","pool":"general"}"#)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let plan: serde_json::Value = serde_json::from_str(&stdout).expect("plan is JSON");
    assert_eq!(plan["command"], "ADD");
    assert_eq!(plan["hosts"], serde_json::json!(["http://localhost:8080"]));
    assert_eq!(plan["definition"]["pool"], "general");
}

#[test]
fn parse_errors_exit_non_zero() {
    discovery()
        .args(["show", "--this_is_an_unknown_option"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "invalid option: --this_is_an_unknown_option",
        ));

    discovery()
        .args(["add", "-e", "prod", "-t", "web"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing argument --pool"));

    discovery()
        .args(["add", "-Dk=v", "--JSON", "{}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("-Dk=v"));
}

#[test]
fn delete_prints_identifier() {
    discovery()
        .args(["delete", "http://h:8080", "svc-123"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""id": "svc-123""#))
        .stdout(predicate::str::contains("http://h:8080"));
}

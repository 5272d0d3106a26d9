//! Integration tests for the inspect command

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn stagehand_cmd() -> Command {
    Command::cargo_bin("stagehand").unwrap()
}

fn build(project: &common::TestProject) {
    stagehand_cmd()
        .current_dir(&project.path)
        .env_remove("STAGEHAND_RUNTIMES_DIR")
        .args(["build", "--runtimes-dir"])
        .arg(project.runtimes_dir())
        .assert()
        .success();
}

#[test]
fn test_inspect_summary() {
    let project = common::TestProject::with_fixtures();
    build(&project);

    stagehand_cmd()
        .current_dir(&project.path)
        .args(["inspect", "image"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Runtime: python-3.11.9"))
        .stdout(predicate::str::contains("Exposed port: 8000"))
        .stdout(predicate::str::contains("Entrypoint: main.py"))
        .stdout(predicate::str::contains("redis"))
        .stdout(predicate::str::contains("pytz"));
}

#[test]
fn test_inspect_json_dumps_raw_config() {
    let project = common::TestProject::with_fixtures();
    build(&project);

    let output = stagehand_cmd()
        .current_dir(&project.path)
        .args(["inspect", "image", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let raw = String::from_utf8(output).unwrap();
    assert_eq!(raw, project.read_file("image/image.json"));

    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed["exposed_port"], 8000);
    assert_eq!(parsed["entrypoint"], "main.py");
}

#[test]
fn test_inspect_default_image_dir() {
    let project = common::TestProject::with_fixtures();
    build(&project);

    stagehand_cmd()
        .current_dir(&project.path)
        .arg("inspect")
        .assert()
        .success()
        .stdout(predicate::str::contains("Digest:"));
}

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use httpmock::prelude::*;
use tempfile::{tempdir, TempDir};

const BIN: &str = "harvestctl";

/// Write a one-dataset configuration pointing at `url`.
///
fn config(dir: &Path, url: &str, file: &str) -> PathBuf {
    let data = format!(
        r##"
version = 1

dataset "one" {{
  url    = "{url}"
  folder = "data"
  file   = "{file}"
  report = "results.txt"
}}
"##
    );
    let fname = dir.join("datasets.hcl");
    fs::write(&fname, data).unwrap();
    fname
}

fn workdir() -> TempDir {
    tempdir().unwrap()
}

#[test]
fn test_empty_args() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.assert().failure();
}

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("-h").assert().success();
}

#[test]
fn test_version_opt() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("-V").assert().failure();
}

#[test]
fn test_version_keyword() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("version").assert().success();
}

#[test]
fn test_bad_keyword() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("bouh").assert().failure();
}

#[test]
fn test_list_empty() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("list").assert().failure();
}

#[test]
fn test_list_formats() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("list").arg("formats").assert().success();
}

#[test]
fn test_list_datasets() {
    let dir = workdir();
    let cfg = config(dir.path(), "http://localhost/x.csv", "data.csv");

    let mut cmd = Command::cargo_bin(BIN).unwrap();
    let out = cmd
        .arg("-c")
        .arg(&cfg)
        .arg("list")
        .arg("datasets")
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&out.get_output().stdout).to_string();
    assert!(stdout.contains("delimited"));
}

#[test]
fn test_missing_config() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("-c")
        .arg("/nonexistent/datasets.hcl")
        .arg("run")
        .assert()
        .failure();
}

#[test]
fn test_init() {
    let home = workdir();

    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.env("HOME", home.path()).arg("init").assert().success();
    assert!(home
        .path()
        .join(".config")
        .join("harvest")
        .join("datasets.hcl")
        .exists());

    // Second time the file is already there.
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.env("HOME", home.path()).arg("init").assert().failure();
}

#[test]
fn test_run_ok() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/stadiums.csv");
        then.status(200).body("a,b,c,d,state\n1,2,3,4,OH\n5,6,7,8,CA\n");
    });

    let dir = workdir();
    let cfg = config(dir.path(), &server.url("/stadiums.csv"), "data.csv");

    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("-c")
        .arg(&cfg)
        .arg("-d")
        .arg(dir.path())
        .arg("run")
        .assert()
        .success();

    let report = fs::read_to_string(dir.path().join("data").join("results.txt")).unwrap();
    assert!(report.starts_with("Total Stadiums: 2\n"));
}

#[test]
fn test_run_shows_saved_paths() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/stadiums.csv");
        then.status(200).body("a,b,c,d,state\n1,2,3,4,OH\n");
    });

    let dir = workdir();
    let cfg = config(dir.path(), &server.url("/stadiums.csv"), "data.csv");

    // No RUST_LOG: confirmations must still be there.
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    let out = cmd
        .env_remove("RUST_LOG")
        .arg("-q")
        .arg("-c")
        .arg(&cfg)
        .arg("-d")
        .arg(dir.path())
        .arg("run")
        .assert()
        .success();
    let stderr = String::from_utf8_lossy(&out.get_output().stderr).to_string();
    assert!(stderr.contains("data saved to"));
    assert!(stderr.contains("data.csv"));
    assert!(stderr.contains("Report saved to"));
}

#[test]
fn test_run_fetch_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/gone.txt");
        then.status(404);
    });

    let dir = workdir();
    let cfg = config(dir.path(), &server.url("/gone.txt"), "data.txt");

    let mut cmd = Command::cargo_bin(BIN).unwrap();
    let out = cmd
        .arg("-c")
        .arg(&cfg)
        .arg("-d")
        .arg(dir.path())
        .arg("run")
        .assert()
        .code(1);
    let stderr = String::from_utf8_lossy(&out.get_output().stderr).to_string();
    assert!(stderr.contains("dataset=one stage=fetch error=HttpStatus(404)"));
    assert!(!dir.path().join("data").join("data.txt").exists());
}

#[test]
fn test_run_bad_data() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/data.json");
        then.status(200).body("not json");
    });

    let dir = workdir();
    let cfg = config(dir.path(), &server.url("/data.json"), "data.json");

    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("-c")
        .arg(&cfg)
        .arg("-d")
        .arg(dir.path())
        .arg("run")
        .assert()
        .code(3);
    assert!(!dir.path().join("data").join("results.txt").exists());
}

#[test]
fn test_summarize_without_fetch() {
    let dir = workdir();
    let cfg = config(dir.path(), "http://127.0.0.1:1/", "data.txt");

    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("-c")
        .arg(&cfg)
        .arg("-d")
        .arg(dir.path())
        .arg("summarize")
        .arg("one")
        .assert()
        .code(2);
}

#[test]
fn test_unknown_dataset() {
    let dir = workdir();
    let cfg = config(dir.path(), "http://127.0.0.1:1/", "data.txt");

    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("-c")
        .arg(&cfg)
        .arg("fetch")
        .arg("two")
        .assert()
        .failure();
}

// dirbackup: mirror or archive a directory tree.
// Copyright 2026 The dirbackup Authors.

//! Tests for trace-related options of the CLI.

use std::fs::read_to_string;

use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;
use serde_json::Deserializer;

use dirbackup::test_fixtures::TreeFixture;

use crate::run_dirbackup;

#[test]
fn debug_shows_trace() {
    let src = TreeFixture::new();
    let dst = TempDir::new().unwrap();
    run_dirbackup()
        .args(["-D", "--no-stats", "-n", "b"])
        .arg(src.path())
        .arg(dst.path())
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "TRACE dirbackup::termui: Tracing enabled",
        ));
}

#[test]
fn no_trace_by_default() {
    let src = TreeFixture::new();
    let dst = TempDir::new().unwrap();
    run_dirbackup()
        .args(["--no-stats", "-n", "b"])
        .arg(src.path())
        .arg(dst.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Tracing enabled").not());
}

#[test]
fn utc_timestamps() {
    let src = TreeFixture::new();
    let dst = TempDir::new().unwrap();
    run_dirbackup()
        .args(["-D", "--trace-time", "utc", "--no-stats", "-n", "b"])
        .arg(src.path())
        .arg(dst.path())
        .assert()
        .success()
        .stderr(predicate::str::is_match(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}").unwrap());
}

#[test]
fn json_log() {
    let src = TreeFixture::new();
    src.create_file("a");
    let dst = TempDir::new().unwrap();
    let log = dst.child("log.json");
    run_dirbackup()
        .args(["-v", "--no-stats", "-n", "b", "--log-json"])
        .arg(log.path())
        .arg(src.path())
        .arg(dst.path())
        .assert()
        .success();

    let content = read_to_string(log.path()).unwrap();
    let events: Vec<serde_json::Value> = Deserializer::from_str(&content)
        .into_iter::<serde_json::Value>()
        .map(Result::unwrap)
        .collect();
    assert!(!events.is_empty());
    assert!(events.iter().any(|event| event["fields"]["message"]
        .as_str()
        .is_some_and(|m| m.starts_with("copy: "))));
}

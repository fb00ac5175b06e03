// dirbackup: mirror or archive a directory tree.
// Copyright 2026 The dirbackup Authors.

// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

//! Compressed archive backups through the CLI.

use std::process::Command;

use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use dir_assert::assert_paths;
use predicates::prelude::*;

use dirbackup::test_fixtures::TreeFixture;

use crate::{have_tar, run_dirbackup};

#[test]
fn archive_extracts_to_the_source_tree() {
    if !have_tar() {
        eprintln!("tar is not available; skipping");
        return;
    }
    let src = TreeFixture::new();
    src.create_file_with_contents("a.txt", b"hi");
    src.create_dir("sub");
    src.create_file_with_contents("sub/b.txt", b"world");
    let dst = TempDir::new().unwrap();

    run_dirbackup()
        .args(["-c", "-n", "mybackup"])
        .arg(src.path())
        .arg(dst.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Archive complete"));

    let archive = dst.child("mybackup.tar.gz");
    archive.assert(predicate::path::is_file());
    dst.child("mybackup").assert(predicate::path::missing());

    let extracted = TempDir::new().unwrap();
    let status = Command::new("tar")
        .arg("-xzf")
        .arg(archive.path())
        .arg("-C")
        .arg(extracted.path())
        .status()
        .unwrap();
    assert!(status.success());
    assert_paths!(extracted.path(), src.path());
}

#[test]
fn archiver_not_found() {
    let src = TreeFixture::new();
    src.create_file("a");
    let dst = TempDir::new().unwrap();

    run_dirbackup()
        .args(["-c", "-n", "b", "--tar", "/nonexistent/tar-program"])
        .arg(src.path())
        .arg(dst.path())
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Archiver \"/nonexistent/tar-program\" failed"))
        .stderr(predicate::str::contains("caused by: Could not be launched"));
}

#[test]
fn archiver_exits_with_failure() {
    let src = TreeFixture::new();
    let dst = TempDir::new().unwrap();

    run_dirbackup()
        .args(["--compress", "--name", "b", "--tar", "false"])
        .arg(src.path())
        .arg(dst.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("caused by: Exited with status 1"));
}

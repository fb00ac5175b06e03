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

//! Whole backups through the library API.

use std::fs;
use std::os::unix::fs::PermissionsExt;

use assert_fs::prelude::*;
use assert_fs::TempDir;
use dir_assert::assert_paths;
use pretty_assertions::assert_eq;
use rstest::rstest;
use tracing_test::traced_test;

use dirbackup::test_fixtures::TreeFixture;
use dirbackup::*;

use super::mirror_request;

#[test]
fn mirror_equals_source() {
    let src = TreeFixture::new();
    src.create_file_with_contents("a.txt", b"hi");
    src.create_dir("sub");
    src.create_file_with_contents("sub/b.txt", b"world");
    src.create_dir("sub/empty");
    src.create_file_with_contents("empty-file", b"");
    let dst = TempDir::new().unwrap();

    let outcome = backup(
        &mirror_request(src.path(), dst.path(), "mybackup"),
        &BackupOptions::default(),
    )
    .unwrap();

    assert_paths!(dst.child("mybackup").path(), src.path());
    let BackupOutcome::Mirror { stats, .. } = outcome else {
        panic!("expected a mirror");
    };
    assert_eq!(
        stats,
        CopyStats {
            directories_created: 2,
            files: 3,
            file_bytes: 7,
            empty_files: 1,
            ..Default::default()
        }
    );
}

#[rstest]
fn permission_bits_are_copied(
    #[values(0o400, 0o444, 0o600, 0o640, 0o644, 0o700, 0o750, 0o755, 0o777)] mode: u32,
) {
    let src = TreeFixture::new();
    src.create_file_with_mode("f", b"data", mode);
    let dst = TempDir::new().unwrap();

    backup(
        &mirror_request(src.path(), dst.path(), "b"),
        &BackupOptions::default(),
    )
    .unwrap();

    let copied = fs::metadata(dst.path().join("b/f")).unwrap();
    assert_eq!(copied.permissions().mode() & 0o777, mode);
    assert_eq!(fs::read(dst.path().join("b/f")).unwrap(), b"data");
}

#[test]
#[traced_test]
fn symlinks_are_absent_from_mirror() {
    let src = TreeFixture::new();
    src.create_file_with_contents("a.txt", b"hi");
    src.create_symlink("link", "a.txt");
    src.create_dir("sub");
    src.create_symlink("sub/up", "..");
    let dst = TempDir::new().unwrap();

    backup(
        &mirror_request(src.path(), dst.path(), "mybackup"),
        &BackupOptions::default(),
    )
    .unwrap();

    dst.child("mybackup/a.txt").assert("hi");
    assert!(fs::symlink_metadata(dst.path().join("mybackup/link")).is_err());
    assert!(fs::symlink_metadata(dst.path().join("mybackup/sub/up")).is_err());
    assert!(logs_contain("Skipping symlink"));
}

#[test]
fn second_backup_into_same_mirror_is_idempotent() {
    let src = TreeFixture::new();
    src.create_dir("sub");
    src.create_file("sub/f");
    let dst = TempDir::new().unwrap();
    let request = mirror_request(src.path(), dst.path(), "b");

    backup(&request, &BackupOptions::default()).unwrap();
    let outcome = backup(&request, &BackupOptions::default()).unwrap();

    let BackupOutcome::Mirror { stats, .. } = outcome else {
        panic!("expected a mirror");
    };
    assert_eq!(stats.directories_created, 0);
    assert_eq!(stats.directories_existing, 1);
    assert_paths!(dst.child("b").path(), src.path());
}

#[test]
fn verify_reports_clean_mirror() {
    let src = TreeFixture::new();
    src.create_file("a");
    src.create_dir("d");
    src.create_file("d/b");
    src.create_file("skip.tmp");
    let dst = TempDir::new().unwrap();
    let options = BackupOptions {
        verify: true,
        exclude: Exclude::from_strings(["*.tmp"]).unwrap(),
        ..Default::default()
    };

    let outcome = backup(&mirror_request(src.path(), dst.path(), "b"), &options).unwrap();

    let BackupOutcome::Mirror {
        verify: Some(verify),
        stats,
        ..
    } = outcome
    else {
        panic!("expected a verified mirror");
    };
    assert_eq!(stats.excluded, 1);
    assert_eq!(
        verify,
        VerifyStats {
            files_checked: 2,
            directories_checked: 1,
            ..Default::default()
        }
    );
}

#[test]
fn verify_mirror_after_tampering() {
    let src = TreeFixture::new();
    src.create_file_with_contents("a", b"original");
    let dst = TempDir::new().unwrap();
    backup(
        &mirror_request(src.path(), dst.path(), "b"),
        &BackupOptions::default(),
    )
    .unwrap();

    dst.child("b/a").write_str("tampered").unwrap();

    let stats = verify_mirror(
        src.path(),
        &dst.path().join("b"),
        &Exclude::nothing(),
        &Include::everything(),
    )
    .unwrap();
    assert_eq!(stats.content_mismatches, 1);
    assert!(stats.has_problems());
}

#[test]
fn unreadable_source_file_stops_backup() {
    if test_fixtures::running_as_root() {
        eprintln!("running as root; permissions are not enforced");
        return;
    }
    let src = TreeFixture::new();
    src.create_file("locked");
    src.make_file_unreadable("locked");
    let dst = TempDir::new().unwrap();

    let err = backup(
        &mirror_request(src.path(), dst.path(), "b"),
        &BackupOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(err, Error::OpenSource { .. }), "{err:?}");
    assert!(err.path().unwrap().ends_with("locked"));
    // The mirror directory itself was already made.
    dst.child("b").assert(predicates::path::is_dir());
}

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

use std::fs;

use assert_fs::prelude::*;
use assert_fs::TempDir;

use dirbackup::test_fixtures::TreeFixture;
use dirbackup::*;

#[test]
fn large_file_spanning_many_buffers() {
    let src = TreeFixture::new();
    let content: Vec<u8> = (0..1_000_003u32).map(|i| (i % 251) as u8).collect();
    src.create_file_with_contents("big", &content);
    let dst = TempDir::new().unwrap();

    let stats = copy_tree(src.path(), dst.path(), &CopyOptions::default()).unwrap();

    assert_eq!(stats.file_bytes, content.len() as u64);
    assert_eq!(fs::read(dst.path().join("big")).unwrap(), content);
}

#[test]
fn ensure_directory_is_idempotent() {
    let dst = TempDir::new().unwrap();
    let path = dst.child("d");

    assert_eq!(ensure_directory(path.path()).unwrap(), DirOutcome::Created);
    path.child("inside").write_str("kept").unwrap();
    assert_eq!(
        ensure_directory(path.path()).unwrap(),
        DirOutcome::AlreadyExists
    );
    path.child("inside").assert("kept");
}

#[test]
fn stops_at_first_error() {
    let src = TreeFixture::new();
    src.create_dir("sub");
    src.create_file("sub/f");
    let dst = TempDir::new().unwrap();
    // A file where the directory should go makes the copy fail.
    dst.child("sub").write_str("in the way").unwrap();

    let err = copy_tree(src.path(), dst.path(), &CopyOptions::default()).unwrap_err();

    assert!(matches!(err, Error::PathTypeConflict { .. }), "{err:?}");
    dst.child("sub").assert("in the way");
}

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

//! Tests for the dirbackup library API.

use std::path::Path;

use dirbackup::{BackupMode, BackupRequest};

mod backup;
mod copy_tree;

fn mirror_request(src: &Path, dst: &Path, name: &str) -> BackupRequest {
    BackupRequest {
        source_path: src.to_owned(),
        destination_root: dst.to_owned(),
        backup_name: name.to_owned(),
        mode: BackupMode::DirectoryMirror,
        verbose: false,
    }
}

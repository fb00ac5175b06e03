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

//! Make a backup of a directory tree, either as a mirrored directory or as a
//! single compressed archive.
//!
//! Mirrors reproduce every directory and regular file, with its permission
//! bits. Symlinks and special files are skipped with a warning.

pub mod archive;
pub mod backup;
pub mod copy_file;
pub mod copy_tree;
pub mod errors;
pub mod excludes;
pub mod kind;
pub mod materialize;
pub mod misc;
pub mod name;
pub mod stats;
pub mod termui;
pub mod test_fixtures;
pub mod unix_mode;
pub mod verify;

pub use crate::archive::{create_archive, ArchiveOptions};
pub use crate::backup::{backup, BackupMode, BackupOptions, BackupOutcome, BackupRequest};
pub use crate::copy_file::copy_file;
pub use crate::copy_tree::{copy_tree, CopyOptions};
pub use crate::errors::{Error, Result, SubprocessFailure};
pub use crate::excludes::{Exclude, ExcludeBuilder, Include};
pub use crate::kind::{Kind, TreeEntry};
pub use crate::materialize::{ensure_directory, DirOutcome};
pub use crate::name::default_backup_name;
pub use crate::stats::{CopyStats, VerifyStats};
pub use crate::unix_mode::UnixMode;
pub use crate::verify::verify_mirror;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version() -> &'static str {
    VERSION
}

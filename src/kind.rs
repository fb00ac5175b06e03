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

//! Entries found while walking a source tree, classified by kind.

use std::ffi::OsString;
use std::fmt;
use std::fs::{self, FileType};
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::misc::failpoint_hits;
use crate::unix_mode::UnixMode;
use crate::*;

/// Kind of filesystem object, as seen by `lstat`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Kind {
    Dir,
    File,
    Symlink,
    /// Devices, sockets, FIFOs: never copied.
    Other,
}

impl Kind {
    pub fn is_file(&self) -> bool {
        matches!(self, Kind::File)
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Kind::Dir)
    }

    pub fn is_symlink(&self) -> bool {
        matches!(self, Kind::Symlink)
    }
}

impl From<FileType> for Kind {
    fn from(ft: FileType) -> Kind {
        if ft.is_file() {
            Kind::File
        } else if ft.is_dir() {
            Kind::Dir
        } else if ft.is_symlink() {
            Kind::Symlink
        } else {
            Kind::Other
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Dir => "directory",
            Kind::File => "file",
            Kind::Symlink => "symlink",
            Kind::Other => "special file",
        })
    }
}

/// One filesystem object found in a source directory.
///
/// Entries are built as a directory is listed and dropped as soon as they've
/// been dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub name: OsString,
    pub path: PathBuf,
    pub kind: Kind,
    pub unix_mode: UnixMode,
}

impl TreeEntry {
    /// Classify `path` without following a symlink in its final component.
    pub fn lstat(name: OsString, path: PathBuf) -> Result<TreeEntry> {
        if failpoint_hits("dirbackup::lstat", &path) {
            return Err(Error::Stat {
                path,
                source: io::Error::other("injected stat failure"),
            });
        }
        let metadata = fs::symlink_metadata(&path).map_err(|source| Error::Stat {
            path: path.clone(),
            source,
        })?;
        Ok(TreeEntry {
            name,
            kind: metadata.file_type().into(),
            unix_mode: UnixMode::from(&metadata),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

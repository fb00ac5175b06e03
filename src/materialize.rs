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

//! Make sure destination directories exist.

use std::fs;
use std::io;
use std::path::Path;

use nix::sys::stat::Mode;
use tracing::trace;

use crate::*;

/// Mode for directories created in the destination, before the umask.
pub const NEW_DIRECTORY_MODE: u32 = 0o755;

/// What [ensure_directory] found or did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirOutcome {
    /// The directory was already there; nothing was changed.
    AlreadyExists,
    /// A new directory was made.
    Created,
}

/// Ensure `path` is a directory, creating it if it's absent.
///
/// Only the final component is created: the parent must already exist.
/// An existing directory is left untouched, so this can be called any number
/// of times on the same path. Anything else already at `path` is a
/// [Error::PathTypeConflict].
pub fn ensure_directory(path: &Path) -> Result<DirOutcome> {
    fail::fail_point!("dirbackup::ensure_directory", |_| {
        Err(Error::CreateDirectory {
            path: path.to_owned(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        })
    });
    if let Ok(metadata) = fs::metadata(path) {
        return if metadata.is_dir() {
            trace!(?path, "Directory already exists");
            Ok(DirOutcome::AlreadyExists)
        } else {
            Err(Error::PathTypeConflict {
                path: path.to_owned(),
            })
        };
    }
    // Whatever stopped the stat, mkdir will report it more usefully.
    nix::unistd::mkdir(path, Mode::from_bits_truncate(NEW_DIRECTORY_MODE)).map_err(|errno| {
        Error::CreateDirectory {
            path: path.to_owned(),
            source: io::Error::from(errno),
        }
    })?;
    trace!(?path, "Created directory");
    Ok(DirOutcome::Created)
}

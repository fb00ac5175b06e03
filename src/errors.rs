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

//! Dirbackup specific error types.
//!
//! Every error is fatal to the run that raised it: nothing is retried and
//! nothing is skipped past. Entries that are deliberately not copied, such
//! as symlinks, are reported as trace warnings rather than errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Dirbackup specific error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("Path is too long: {path:?}")]
    PathTooLong { path: PathBuf },

    #[error("Path exists and is not a directory: {path:?}")]
    PathTypeConflict { path: PathBuf },

    #[error("Failed to open source file {path:?}")]
    OpenSource { path: PathBuf, source: io::Error },

    #[error("Failed to open directory {path:?}")]
    OpenDirectory { path: PathBuf, source: io::Error },

    #[error("Failed to stat {path:?}")]
    Stat { path: PathBuf, source: io::Error },

    #[error("Failed to create directory {path:?}")]
    CreateDirectory { path: PathBuf, source: io::Error },

    #[error("Failed to open {path:?} for writing")]
    CreateDestination { path: PathBuf, source: io::Error },

    #[error("Read error on {path:?}")]
    ReadSource { path: PathBuf, source: io::Error },

    #[error("Write error on {path:?}")]
    WriteDestination { path: PathBuf, source: io::Error },

    #[error("Failed to set permissions on {path:?}")]
    SetPermissions { path: PathBuf, source: io::Error },

    #[error("Source {path:?} does not exist")]
    SourceNotFound { path: PathBuf, source: io::Error },

    #[error("Source is not a directory: {path:?}")]
    SourceNotDirectory { path: PathBuf },

    #[error("Destination {path:?} does not exist")]
    DestinationNotFound { path: PathBuf, source: io::Error },

    #[error("Destination is not a directory: {path:?}")]
    DestinationNotDirectory { path: PathBuf },

    #[error("Destination {path:?} is inside the source directory {source_root:?}")]
    DestinationInsideSource { path: PathBuf, source_root: PathBuf },

    #[error("Archiver {program:?} failed")]
    SubprocessFailed {
        program: String,
        #[source]
        failure: SubprocessFailure,
    },

    #[error("Failed to parse glob")]
    ParseGlob {
        #[from]
        source: globset::Error,
    },

    #[error("Failed to read exclusion file {path:?}")]
    ReadExcludeFile { path: PathBuf, source: io::Error },

    #[error("Failed to read mirrored file {path:?}")]
    VerifyRead { path: PathBuf, source: io::Error },
}

/// How an external archiver process failed.
#[derive(Debug, Error)]
pub enum SubprocessFailure {
    #[error("Could not be launched")]
    Launch(#[source] io::Error),

    #[error("Exited with status {0}")]
    ExitStatus(i32),

    #[error("Killed by signal {0}")]
    Signal(i32),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The path most closely associated with this error, if there is one.
    pub fn path(&self) -> Option<&PathBuf> {
        use Error::*;
        match self {
            PathTooLong { path }
            | PathTypeConflict { path }
            | OpenSource { path, .. }
            | OpenDirectory { path, .. }
            | Stat { path, .. }
            | CreateDirectory { path, .. }
            | CreateDestination { path, .. }
            | ReadSource { path, .. }
            | WriteDestination { path, .. }
            | SetPermissions { path, .. }
            | SourceNotFound { path, .. }
            | SourceNotDirectory { path }
            | DestinationNotFound { path, .. }
            | DestinationNotDirectory { path }
            | DestinationInsideSource { path, .. }
            | ReadExcludeFile { path, .. }
            | VerifyRead { path, .. } => Some(path),
            SubprocessFailed { .. } | ParseGlob { .. } => None,
        }
    }
}

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

//! Compressed archive backups, made by running an external `tar`.

use std::os::unix::process::ExitStatusExt;
use std::path::Path;
use std::process::Command;

use tracing::{debug, trace};

use crate::errors::SubprocessFailure;
use crate::*;

/// The archiver used unless another is configured.
pub const DEFAULT_ARCHIVER: &str = "tar";

/// How to run the archiver.
#[derive(Clone, Debug)]
pub struct ArchiveOptions {
    /// Program name or path. It must accept `-czf OUTPUT -C DIR .` the way
    /// tar does.
    pub program: String,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        ArchiveOptions {
            program: DEFAULT_ARCHIVER.to_owned(),
        }
    }
}

/// Write a gzip-compressed tar of everything under `source` to `output`.
///
/// Entries are stored relative to `source`. The archiver's stderr is passed
/// through to ours. It's waited for synchronously.
pub fn create_archive(source: &Path, output: &Path, options: &ArchiveOptions) -> Result<()> {
    let mut command = Command::new(&options.program);
    command
        .arg("-czf")
        .arg(output)
        .arg("-C")
        .arg(source)
        .arg(".");
    debug!(?command, "Run archiver");
    let failed = |failure| Error::SubprocessFailed {
        program: options.program.clone(),
        failure,
    };
    let status = command
        .status()
        .map_err(|err| failed(SubprocessFailure::Launch(err)))?;
    trace!(?status);
    if status.success() {
        Ok(())
    } else if let Some(code) = status.code() {
        Err(failed(SubprocessFailure::ExitStatus(code)))
    } else if let Some(signal) = status.signal() {
        Err(failed(SubprocessFailure::Signal(signal)))
    } else {
        Err(failed(SubprocessFailure::ExitStatus(-1)))
    }
}

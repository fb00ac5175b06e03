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

//! Make a backup of one directory into another.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::archive::{create_archive, ArchiveOptions};
use crate::copy_tree::{copy_tree, CopyOptions};
use crate::materialize::ensure_directory;
use crate::misc::check_path_length;
use crate::stats::{CopyStats, VerifyStats};
use crate::verify::verify_mirror;
use crate::*;

/// Suffix added to the backup name in archive mode.
pub const ARCHIVE_SUFFIX: &str = ".tar.gz";

/// What form the backup takes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum BackupMode {
    /// A directory with the same contents as the source.
    #[default]
    DirectoryMirror,
    /// A single gzipped tar file.
    CompressedArchive,
}

/// One backup to run: where from, where to, and what to call it.
#[derive(Clone, Debug)]
pub struct BackupRequest {
    pub source_path: PathBuf,
    /// An existing directory that will hold the backup.
    pub destination_root: PathBuf,
    /// A single path component, used for the mirror directory or, with a
    /// suffix, the archive file.
    pub backup_name: String,
    pub mode: BackupMode,
    /// Log each file copied and directory made.
    pub verbose: bool,
}

/// Configuration of how to make a backup.
#[derive(Clone, Debug, Default)]
pub struct BackupOptions {
    /// Leave out matching entries. Applies to mirrors only.
    pub exclude: Exclude,

    /// If not empty, copy only matching files. Applies to mirrors only.
    pub include: Include,

    /// Compare the mirror to the source after copying.
    pub verify: bool,

    /// How to run the archiver in archive mode.
    pub archiver: ArchiveOptions,
}

/// What a successful backup produced.
#[derive(Debug)]
pub enum BackupOutcome {
    Mirror {
        path: PathBuf,
        stats: CopyStats,
        /// Present if verification was requested.
        verify: Option<VerifyStats>,
    },
    Archive {
        path: PathBuf,
    },
}

impl BackupOutcome {
    /// The directory or file that was written.
    pub fn path(&self) -> &Path {
        match self {
            BackupOutcome::Mirror { path, .. } | BackupOutcome::Archive { path } => path,
        }
    }
}

/// Run a backup.
///
/// Both the source and the destination root are checked before anything is
/// written. The destination must not be inside the source, or the copy would
/// walk into its own output.
pub fn backup(request: &BackupRequest, options: &BackupOptions) -> Result<BackupOutcome> {
    check_source(&request.source_path)?;
    check_destination(&request.destination_root)?;
    let source_canonical = canonicalize(&request.source_path)?;
    check_outside_source(&request.destination_root, &source_canonical)?;
    if request.verbose {
        info!("from: {}", request.source_path.display());
    }
    match request.mode {
        BackupMode::DirectoryMirror => {
            let path = check_path_length(request.destination_root.join(&request.backup_name))?;
            if request.verbose {
                info!("to: {}", path.display());
            }
            ensure_directory(&path)?;
            // An existing symlink at the mirror path could lead back in.
            check_outside_source(&path, &source_canonical)?;
            let copy_options = CopyOptions {
                verbose: request.verbose,
                exclude: options.exclude.clone(),
                include: options.include.clone(),
            };
            let stats = copy_tree(&request.source_path, &path, &copy_options)?;
            let verify = if options.verify {
                Some(verify_mirror(
                    &request.source_path,
                    &path,
                    &options.exclude,
                    &options.include,
                )?)
            } else {
                None
            };
            Ok(BackupOutcome::Mirror {
                path,
                stats,
                verify,
            })
        }
        BackupMode::CompressedArchive => {
            let path = check_path_length(
                request
                    .destination_root
                    .join(format!("{}{ARCHIVE_SUFFIX}", request.backup_name)),
            )?;
            if request.verbose {
                info!("to: {}", path.display());
            }
            if !options.exclude.is_empty() || !options.include.is_empty() {
                warn!("Include and exclude patterns are not applied to archives");
            }
            if options.verify {
                warn!("Archives are not verified");
            }
            create_archive(&request.source_path, &path, &options.archiver)?;
            debug!(?path, "Archive written");
            Ok(BackupOutcome::Archive { path })
        }
    }
}

fn check_source(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(Error::SourceNotDirectory {
            path: path.to_owned(),
        }),
        Err(source) => Err(Error::SourceNotFound {
            path: path.to_owned(),
            source,
        }),
    }
}

fn check_destination(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(Error::DestinationNotDirectory {
            path: path.to_owned(),
        }),
        Err(source) => Err(Error::DestinationNotFound {
            path: path.to_owned(),
            source,
        }),
    }
}

fn canonicalize(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).map_err(|source| Error::Stat {
        path: path.to_owned(),
        source,
    })
}

/// Fail if `path` is the source directory or anywhere under it.
fn check_outside_source(path: &Path, source_canonical: &Path) -> Result<()> {
    if canonicalize(path)?.starts_with(source_canonical) {
        Err(Error::DestinationInsideSource {
            path: path.to_owned(),
            source_root: source_canonical.to_owned(),
        })
    } else {
        Ok(())
    }
}

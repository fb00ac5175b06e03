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

//! Copy tree contents.
//!
//! The source is walked depth first, in whatever order the OS lists each
//! directory. Directories and regular files are reproduced in the
//! destination; symlinks and special files are skipped with a warning.
//!
//! Directories waiting to be listed are kept on an explicit stack, so the
//! depth of the tree is limited only by the path length.
//!
//! The first error anywhere stops the whole copy. Whatever was already
//! written to the destination stays there.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::copy_file::copy_file;
use crate::kind::{Kind, TreeEntry};
use crate::materialize::{ensure_directory, DirOutcome};
use crate::misc::check_path_length;
use crate::stats::CopyStats;
use crate::*;

/// Description of how to copy a tree.
#[derive(Clone, Debug, Default)]
pub struct CopyOptions {
    /// Log each directory created and each file copied.
    pub verbose: bool,

    /// Leave out entries matching these patterns.
    pub exclude: Exclude,

    /// If not empty, copy only files matching these patterns.
    pub include: Include,
}

/// A source directory still to be listed, and where its contents go.
pub(crate) struct PendingDir {
    pub src: PathBuf,
    pub dst: PathBuf,
    /// Path relative to the top of the tree, starting with a slash, for
    /// matching patterns.
    pub rel: PathBuf,
}

impl PendingDir {
    pub(crate) fn root(src: &Path, dst: &Path) -> PendingDir {
        PendingDir {
            src: src.to_owned(),
            dst: dst.to_owned(),
            rel: PathBuf::from("/"),
        }
    }
}

/// Copy the contents of `src_root` into `dst_root`, which must already exist.
///
/// Returns statistics about what was copied.
pub fn copy_tree(src_root: &Path, dst_root: &Path, options: &CopyOptions) -> Result<CopyStats> {
    let mut stats = CopyStats::default();
    let mut pending = vec![PendingDir::root(src_root, dst_root)];
    while let Some(dir) = pending.pop() {
        copy_dir_contents(&dir, options, &mut stats, &mut pending)?;
    }
    debug!(?stats, "Tree copy complete");
    Ok(stats)
}

/// Copy one directory level, queueing subdirectories onto `pending`.
fn copy_dir_contents(
    dir: &PendingDir,
    options: &CopyOptions,
    stats: &mut CopyStats,
    pending: &mut Vec<PendingDir>,
) -> Result<()> {
    let read_dir = fs::read_dir(&dir.src).map_err(|source| Error::OpenDirectory {
        path: dir.src.clone(),
        source,
    })?;
    for dir_entry in read_dir {
        let dir_entry = dir_entry.map_err(|source| Error::OpenDirectory {
            path: dir.src.clone(),
            source,
        })?;
        let name = dir_entry.file_name();
        let src_path = check_path_length(dir.src.join(&name))?;
        let dst_path = check_path_length(dir.dst.join(&name))?;
        let rel_path = dir.rel.join(&name);
        if options.exclude.matches(&rel_path) {
            debug!(path = ?src_path, "Excluded");
            stats.excluded += 1;
            continue;
        }
        let entry = TreeEntry::lstat(name, src_path)?;
        match entry.kind {
            Kind::Dir => {
                match ensure_directory(&dst_path)? {
                    DirOutcome::Created => {
                        stats.directories_created += 1;
                        if options.verbose {
                            info!("mkdir: {}", dst_path.display());
                        }
                    }
                    DirOutcome::AlreadyExists => {
                        stats.directories_existing += 1;
                        if options.verbose {
                            info!("dir exists: {}", dst_path.display());
                        }
                    }
                }
                pending.push(PendingDir {
                    src: entry.path,
                    dst: dst_path,
                    rel: rel_path,
                });
            }
            Kind::File if !options.include.matches(&rel_path) => {
                debug!(path = ?entry.path, "Not included");
                stats.excluded += 1;
            }
            Kind::File => {
                if options.verbose {
                    info!(
                        "copy: {} -> {} ({})",
                        entry.path.display(),
                        dst_path.display(),
                        entry.unix_mode
                    );
                }
                let bytes = copy_file(&entry.path, &dst_path)?;
                stats.files += 1;
                stats.file_bytes += bytes;
                if bytes == 0 {
                    stats.empty_files += 1;
                }
            }
            Kind::Symlink => {
                warn!("Skipping symlink {:?}", entry.path);
                stats.symlinks_skipped += 1;
            }
            Kind::Other => {
                warn!("Skipping unsupported file type {:?}", entry.path);
                stats.other_skipped += 1;
            }
        }
    }
    Ok(())
}

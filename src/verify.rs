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

//! Check that a mirror matches its source.
//!
//! The source is walked the same way as for a copy, ignoring symlinks,
//! special files, excluded entries and files that aren't included. Each file
//! and directory that would have been copied must be present in the mirror as
//! the same kind of thing. Files must also have the same content and
//! permission bits.
//!
//! Differences are counted and logged as warnings. Failing to read either
//! tree is an error.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use tracing::{debug, warn};

use crate::copy_file::COPY_BUFFER_SIZE;
use crate::copy_tree::PendingDir;
use crate::kind::{Kind, TreeEntry};
use crate::misc::check_path_length;
use crate::stats::VerifyStats;
use crate::unix_mode::UnixMode;
use crate::*;

/// Compare the mirror at `mirror` against the tree at `source`.
///
/// `exclude` and `include` should be the patterns the mirror was copied with.
pub fn verify_mirror(
    source: &Path,
    mirror: &Path,
    exclude: &Exclude,
    include: &Include,
) -> Result<VerifyStats> {
    let mut stats = VerifyStats::default();
    let mut pending = vec![PendingDir::root(source, mirror)];
    while let Some(dir) = pending.pop() {
        verify_dir(&dir, exclude, include, &mut stats, &mut pending)?;
    }
    debug!(?stats, "Verify complete");
    Ok(stats)
}

fn verify_dir(
    dir: &PendingDir,
    exclude: &Exclude,
    include: &Include,
    stats: &mut VerifyStats,
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
        if exclude.matches(&rel_path) {
            continue;
        }
        let entry = TreeEntry::lstat(name, src_path)?;
        match entry.kind {
            Kind::Dir => {
                stats.directories_checked += 1;
                if mirror_kind(&dst_path)? != Some(Kind::Dir) {
                    warn!("Directory missing from mirror: {:?}", dst_path);
                    stats.missing += 1;
                    continue;
                }
                pending.push(PendingDir {
                    src: entry.path,
                    dst: dst_path,
                    rel: rel_path,
                });
            }
            Kind::File if include.matches(&rel_path) => {
                stats.files_checked += 1;
                verify_file(&entry, &dst_path, stats)?;
            }
            Kind::File | Kind::Symlink | Kind::Other => (),
        }
    }
    Ok(())
}

fn verify_file(entry: &TreeEntry, dst_path: &Path, stats: &mut VerifyStats) -> Result<()> {
    let dst_metadata = match fs::symlink_metadata(dst_path) {
        Ok(m) if m.is_file() => m,
        Ok(_) => {
            warn!("Mirror has something other than a file at {:?}", dst_path);
            stats.missing += 1;
            return Ok(());
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            warn!("File missing from mirror: {:?}", dst_path);
            stats.missing += 1;
            return Ok(());
        }
        Err(source) => {
            return Err(Error::VerifyRead {
                path: dst_path.to_owned(),
                source,
            })
        }
    };
    let dst_mode = UnixMode::from(&dst_metadata);
    if !entry.unix_mode.same_permissions(dst_mode) {
        warn!(
            "Permissions differ on {:?}: source {}, mirror {}",
            dst_path, entry.unix_mode, dst_mode
        );
        stats.permission_mismatches += 1;
    }
    if !same_content(&entry.path, dst_path)? {
        warn!("Content differs on {:?}", dst_path);
        stats.content_mismatches += 1;
    }
    Ok(())
}

/// The kind of whatever is at `path`, or None if there's nothing there.
fn mirror_kind(path: &Path) -> Result<Option<Kind>> {
    match fs::symlink_metadata(path) {
        Ok(metadata) => Ok(Some(metadata.file_type().into())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(Error::VerifyRead {
            path: path.to_owned(),
            source,
        }),
    }
}

fn same_content(src_path: &Path, dst_path: &Path) -> Result<bool> {
    let mut src = File::open(src_path).map_err(|source| Error::OpenSource {
        path: src_path.to_owned(),
        source,
    })?;
    let mut dst = File::open(dst_path).map_err(|source| Error::VerifyRead {
        path: dst_path.to_owned(),
        source,
    })?;
    let mut src_buf = vec![0u8; COPY_BUFFER_SIZE];
    let mut dst_buf = vec![0u8; COPY_BUFFER_SIZE];
    loop {
        let src_len = fill(&mut src, &mut src_buf).map_err(|source| Error::ReadSource {
            path: src_path.to_owned(),
            source,
        })?;
        let dst_len = fill(&mut dst, &mut dst_buf).map_err(|source| Error::VerifyRead {
            path: dst_path.to_owned(),
            source,
        })?;
        if src_buf[..src_len] != dst_buf[..dst_len] {
            return Ok(false);
        }
        if src_len == 0 {
            return Ok(true);
        }
    }
}

/// Read until `buf` is full or the file ends, returning the number of bytes read.
fn fill(r: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}

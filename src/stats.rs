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

use std::fmt;

use derive_more::{Add, AddAssign};
use serde::Serialize;
use thousands::Separable;

use crate::misc::bytes_to_human_mb;

/// Counts of what a tree copy did.
#[derive(Add, AddAssign, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct CopyStats {
    /// Directories made in the destination.
    pub directories_created: usize,
    /// Destination directories that were already present.
    pub directories_existing: usize,
    pub files: usize,
    /// Bytes written into regular files.
    pub file_bytes: u64,
    pub empty_files: usize,
    pub symlinks_skipped: usize,
    /// Devices, sockets, and FIFOs that were not copied.
    pub other_skipped: usize,
    /// Entries matching an exclusion pattern, and files matching no
    /// inclusion pattern.
    pub excluded: usize,
}

impl CopyStats {
    /// Total directories in the mirror, whether or not they were made by
    /// this run.
    pub fn directories(&self) -> usize {
        self.directories_created + self.directories_existing
    }

    pub fn skipped(&self) -> usize {
        self.symlinks_skipped + self.other_skipped
    }
}

impl fmt::Display for CopyStats {
    fn fmt(&self, w: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            w,
            "{:>12} files copied, {} empty",
            self.files.separate_with_commas(),
            self.empty_files.separate_with_commas()
        )?;
        writeln!(
            w,
            "{:>12} in file content ({} bytes)",
            bytes_to_human_mb(self.file_bytes),
            self.file_bytes.separate_with_commas()
        )?;
        writeln!(
            w,
            "{:>12} directories, {} created",
            self.directories().separate_with_commas(),
            self.directories_created.separate_with_commas()
        )?;
        writeln!(
            w,
            "{:>12} symlinks and {} special files skipped",
            self.symlinks_skipped.separate_with_commas(),
            self.other_skipped.separate_with_commas()
        )?;
        writeln!(
            w,
            "{:>12} entries excluded",
            self.excluded.separate_with_commas()
        )?;
        Ok(())
    }
}

/// Results of comparing a mirror to its source.
#[derive(Add, AddAssign, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct VerifyStats {
    pub files_checked: usize,
    pub directories_checked: usize,
    /// Source entries with nothing, or the wrong kind of thing, in the mirror.
    pub missing: usize,
    pub content_mismatches: usize,
    pub permission_mismatches: usize,
}

impl VerifyStats {
    pub fn has_problems(&self) -> bool {
        self.missing > 0 || self.content_mismatches > 0 || self.permission_mismatches > 0
    }
}

impl fmt::Display for VerifyStats {
    fn fmt(&self, w: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            w,
            "{:>12} files and {} directories verified",
            self.files_checked.separate_with_commas(),
            self.directories_checked.separate_with_commas()
        )?;
        if self.has_problems() {
            writeln!(
                w,
                "{:>12} missing, {} with different content, {} with different permissions",
                self.missing.separate_with_commas(),
                self.content_mismatches.separate_with_commas(),
                self.permission_mismatches.separate_with_commas()
            )?;
        }
        Ok(())
    }
}

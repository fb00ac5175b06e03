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

//! Unix mode bits of entries being copied.
//!
//! The full `st_mode` carries the file type, the setuid, setgid and sticky
//! bits, and nine permission bits: read, write and execute for each of the
//! owner, group, and others classes. Only the nine permission bits are ever
//! carried over to a mirrored file.

use std::fmt;
use std::fs::{Metadata, Permissions};
use std::os::unix::fs::{MetadataExt, PermissionsExt};

use serde::Serialize;

/// Mask selecting the owner/group/other read, write, and execute bits.
pub const PERMISSION_BITS: u32 = 0o777;

/// Mode bits of a file, as returned by `stat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnixMode {
    mode: u32,
}

impl UnixMode {
    /// The permission bits only, discarding the file type and special bits.
    pub fn permissions(self) -> u32 {
        self.mode & PERMISSION_BITS
    }

    /// Whether the permission bits of two modes are the same.
    pub fn same_permissions(self, other: UnixMode) -> bool {
        self.permissions() == other.permissions()
    }
}

impl From<u32> for UnixMode {
    fn from(mode: u32) -> Self {
        Self { mode }
    }
}

impl From<&Metadata> for UnixMode {
    fn from(metadata: &Metadata) -> Self {
        Self {
            mode: metadata.mode(),
        }
    }
}

/// Permissions to give a copy of a file with this mode.
impl From<UnixMode> for Permissions {
    fn from(mode: UnixMode) -> Self {
        Permissions::from_mode(mode.permissions())
    }
}

impl fmt::Display for UnixMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Show just the permissions, without a file type prefix.
        write!(
            f,
            "{}",
            unix_mode::to_string(self.permissions()).trim_start_matches('?')
        )
    }
}

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

//! Generally useful functions.

use std::path::{Path, PathBuf};

use crate::*;

/// Longest path, in bytes including the terminating nul, the platform accepts.
pub const PATH_MAX: usize = nix::libc::PATH_MAX as usize;

/// Return `path` unchanged if it fits within [PATH_MAX], or fail with
/// [Error::PathTooLong].
pub(crate) fn check_path_length(path: PathBuf) -> Result<PathBuf> {
    if path.as_os_str().len() >= PATH_MAX {
        Err(Error::PathTooLong { path })
    } else {
        Ok(path)
    }
}

/// True if the failpoint `name` is set to return for `path`.
///
/// A `return` action with no argument hits every path; `return(NAME)` hits
/// only paths ending with the components in `NAME`.
#[allow(unused_variables)] // Both are unused without failpoints built in.
pub(crate) fn failpoint_hits(name: &str, path: &Path) -> bool {
    fail::fail_point!(name, |target: Option<String>| {
        target.map_or(true, |target| path.ends_with(target))
    });
    false
}

pub fn bytes_to_human_mb(s: u64) -> String {
    use thousands::Separable;
    let mut s = (s / 1_000_000).separate_with_commas();
    s.push_str(" MB");
    s
}

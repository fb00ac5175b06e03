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

//! Copy the contents and permissions of one regular file.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use tracing::{instrument, trace};

use crate::misc::failpoint_hits;
use crate::unix_mode::UnixMode;
use crate::*;

/// Size of the buffer used to stream file contents.
pub const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Copy `src` to `dst`, returning the number of bytes copied.
///
/// The destination gets the source's permission bits, masked to
/// [crate::unix_mode::PERMISSION_BITS]. An existing file at `dst` is truncated and
/// overwritten.
///
/// If reading or writing fails part way through, the error is returned and
/// `dst` is left holding whatever was written before the failure.
#[instrument(level = "trace")]
pub fn copy_file(src: &Path, dst: &Path) -> Result<u64> {
    let mut src_file = File::open(src).map_err(|source| Error::OpenSource {
        path: src.to_owned(),
        source,
    })?;
    let metadata = src_file.metadata().map_err(|source| Error::OpenSource {
        path: src.to_owned(),
        source,
    })?;
    let unix_mode = UnixMode::from(&metadata);

    let mut dst_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(unix_mode.permissions())
        .open(dst)
        .map_err(|source| Error::CreateDestination {
            path: dst.to_owned(),
            source,
        })?;
    // The mode given to open is filtered by the umask, and ignored entirely
    // if the file already existed.
    dst_file
        .set_permissions(unix_mode.into())
        .map_err(|source| Error::SetPermissions {
            path: dst.to_owned(),
            source,
        })?;

    let mut buf = vec![0u8; COPY_BUFFER_SIZE];
    let mut copied: u64 = 0;
    loop {
        if failpoint_hits("dirbackup::copy_file::read", src) {
            return Err(Error::ReadSource {
                path: src.to_owned(),
                source: io::Error::other("injected read failure"),
            });
        }
        let len = match src_file.read(&mut buf) {
            Ok(0) => break,
            Ok(len) => len,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(Error::ReadSource {
                    path: src.to_owned(),
                    source,
                })
            }
        };
        // write_all keeps going after short writes.
        dst_file
            .write_all(&buf[..len])
            .map_err(|source| Error::WriteDestination {
                path: dst.to_owned(),
                source,
            })?;
        copied += len as u64;
    }
    trace!(copied, "Copied file");
    Ok(copied)
}

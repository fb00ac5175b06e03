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

//! Names for backups when the user doesn't give one.

use time::macros::format_description;
use time::OffsetDateTime;
use tracing::debug;

/// Used only if the timestamp can't be formatted.
pub const FALLBACK_BACKUP_NAME: &str = "backup";

/// A name like `backup-20240131-235959` from the current local time.
///
/// If the local UTC offset can't be determined, which is common in
/// multithreaded processes, UTC is used instead.
pub fn default_backup_name() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|err| {
        debug!(?err, "Local time offset unavailable, using UTC");
        OffsetDateTime::now_utc()
    });
    backup_name_at(now)
}

pub(crate) fn backup_name_at(when: OffsetDateTime) -> String {
    when.format(format_description!(
        "backup-[year][month][day]-[hour][minute][second]"
    ))
    .unwrap_or_else(|err| {
        debug!(?err, "Failed to format backup name");
        FALLBACK_BACKUP_NAME.to_owned()
    })
}

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

//! Exclude entries from a backup by glob patterns, or include only some
//! files.
//!
//! Patterns are matched against the path of an entry relative to the top of
//! the source tree, written with a leading slash: `/sub/a.txt`.
//!
//! Patterns that start with a slash match only against full paths from the top
//! of the tree. Patterns that do not start with a slash match the suffix of the
//! path.
//!
//! Inclusion patterns are written the same way, but apply only to files:
//! directories are always walked so that files inside them can be matched.

use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};

use crate::*;

/// A set of compiled exclusion patterns.
#[derive(Clone, Debug)]
pub struct Exclude(Arc<GlobSet>);

impl Exclude {
    /// Build from a list of glob patterns.
    pub fn from_strings<I: IntoIterator<Item = S>, S: AsRef<str>>(excludes: I) -> Result<Exclude> {
        let mut builder = ExcludeBuilder::new();
        for s in excludes {
            builder.add(s.as_ref())?;
        }
        builder.build()
    }

    /// Build from command line arguments of patterns and filenames.
    pub fn from_patterns_and_files(
        exclude: &[String],
        exclude_from: &[String],
    ) -> Result<Exclude> {
        let mut builder = ExcludeBuilder::new();
        for pat in exclude {
            builder.add(pat)?;
        }
        for path in exclude_from {
            builder.add_file(Path::new(path))?;
        }
        builder.build()
    }

    /// Exclude nothing, even things that look like they might be unimportant.
    pub fn nothing() -> Exclude {
        Exclude(Arc::new(GlobSet::empty()))
    }

    /// True if the entry at `rel_path`, relative to the top of the tree,
    /// should be left out.
    ///
    /// `rel_path` may be given with or without a leading slash.
    pub fn matches(&self, rel_path: &Path) -> bool {
        !self.0.is_empty() && set_matches(&self.0, rel_path)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Exclude {
    fn default() -> Self {
        Exclude::nothing()
    }
}

/// Files to copy, if not all of them.
#[derive(Clone, Debug)]
pub struct Include(Arc<GlobSet>);

impl Include {
    /// Build from a list of glob patterns. An empty list includes everything.
    pub fn from_strings<I: IntoIterator<Item = S>, S: AsRef<str>>(patterns: I) -> Result<Include> {
        let mut gsb = GlobSetBuilder::new();
        for pat in patterns {
            gsb.add(rooted_glob(pat.as_ref())?);
        }
        Ok(Include(Arc::new(gsb.build()?)))
    }

    pub fn everything() -> Include {
        Include(Arc::new(GlobSet::empty()))
    }

    /// True if the file at `rel_path` should be copied.
    pub fn matches(&self, rel_path: &Path) -> bool {
        self.0.is_empty() || set_matches(&self.0, rel_path)
    }

    /// True if there are no patterns, so everything is included.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Include {
    fn default() -> Self {
        Include::everything()
    }
}

fn set_matches(set: &GlobSet, rel_path: &Path) -> bool {
    let s = rel_path.to_string_lossy();
    if s.starts_with('/') {
        set.is_match(&*s)
    } else {
        set.is_match(format!("/{s}"))
    }
}

/// Compile a pattern, anchoring it at any depth unless it starts with a slash.
fn rooted_glob(pat: &str) -> Result<Glob> {
    let pat: Cow<str> = if pat.starts_with('/') {
        Cow::Borrowed(pat)
    } else {
        Cow::Owned(format!("**/{pat}"))
    };
    Ok(GlobBuilder::new(&pat).literal_separator(true).build()?)
}

/// Accumulates patterns before compiling them into an [Exclude].
pub struct ExcludeBuilder {
    gsb: GlobSetBuilder,
}

impl ExcludeBuilder {
    pub fn new() -> ExcludeBuilder {
        ExcludeBuilder {
            gsb: GlobSetBuilder::new(),
        }
    }

    pub fn build(&self) -> Result<Exclude> {
        Ok(Exclude(Arc::new(self.gsb.build()?)))
    }

    pub fn add(&mut self, pat: &str) -> Result<&mut ExcludeBuilder> {
        self.gsb.add(rooted_glob(pat)?);
        Ok(self)
    }

    /// Add patterns from a file, one per line.
    ///
    /// Lines starting with `#` are comments, and leading and trailing whitespace is removed.
    pub fn add_file(&mut self, path: &Path) -> Result<&mut ExcludeBuilder> {
        let content = fs::read_to_string(path).map_err(|source| Error::ReadExcludeFile {
            path: path.to_owned(),
            source,
        })?;
        for pat in content
            .lines()
            .map(str::trim)
            .filter(|s| !s.starts_with('#') && !s.is_empty())
        {
            self.add(pat)?;
        }
        Ok(self)
    }
}

impl Default for ExcludeBuilder {
    fn default() -> Self {
        ExcludeBuilder::new()
    }
}

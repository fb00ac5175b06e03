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

//! Command-line entry point for dirbackup.

use std::error::Error as _;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing::{debug, error, Level};

use dirbackup::archive::DEFAULT_ARCHIVER;
use dirbackup::termui::{enable_tracing, TraceTimeStyle};
use dirbackup::*;

/// Back up a directory, as a mirrored tree or a compressed archive.
#[derive(Debug, Parser)]
#[command(author, about, version)]
struct Args {
    /// Directory to back up.
    source: PathBuf,

    /// Existing directory to hold the backup.
    destination: PathBuf,

    /// Name of the backup directory, or of the archive before its
    /// `.tar.gz` suffix. By default, a name from the current time.
    #[arg(long, short)]
    name: Option<String>,

    /// Write a single gzipped tar file instead of a mirrored tree.
    #[arg(long, short)]
    compress: bool,

    /// Show each directory made and file copied.
    #[arg(long, short)]
    verbose: bool,

    /// Exclude paths matching this glob; may be repeated.
    #[arg(long, short)]
    exclude: Vec<String>,

    /// Read exclusion globs from this file, one per line.
    #[arg(long, short = 'E')]
    exclude_from: Vec<String>,

    /// Copy only files matching this glob; may be repeated. Directories are
    /// still walked.
    #[arg(long, short)]
    include: Vec<String>,

    /// Check the mirror against the source after copying.
    #[arg(long, conflicts_with = "compress")]
    verify: bool,

    /// Archiver program to run for --compress.
    #[arg(long = "tar", value_name = "PROGRAM", default_value = DEFAULT_ARCHIVER)]
    archiver: String,

    /// Don't print a summary when done.
    #[arg(long)]
    no_stats: bool,

    /// Print the summary as JSON.
    #[arg(long, conflicts_with = "no_stats")]
    stats_json: bool,

    /// Show debug trace to stderr.
    #[arg(long, short = 'D')]
    debug: bool,

    /// Control timestamps prefixes on stderr.
    #[arg(long, value_enum, default_value_t = TraceTimeStyle::None)]
    trace_time: TraceTimeStyle,

    /// Append a json formatted log to this file.
    #[arg(long)]
    log_json: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitCode {
    Success = 0,
    Failure = 1,
}

impl std::process::Termination for ExitCode {
    fn report(self) -> std::process::ExitCode {
        (self as u8).into()
    }
}

impl Args {
    fn run(&self) -> Result<ExitCode> {
        let request = BackupRequest {
            source_path: self.source.clone(),
            destination_root: self.destination.clone(),
            backup_name: self.name.clone().unwrap_or_else(default_backup_name),
            mode: if self.compress {
                BackupMode::CompressedArchive
            } else {
                BackupMode::DirectoryMirror
            },
            verbose: self.verbose,
        };
        let options = BackupOptions {
            exclude: Exclude::from_patterns_and_files(&self.exclude, &self.exclude_from)?,
            include: Include::from_strings(&self.include)?,
            verify: self.verify,
            archiver: ArchiveOptions {
                program: self.archiver.clone(),
            },
        };
        let outcome = backup(&request, &options)?;
        let mut exit_code = ExitCode::Success;
        match &outcome {
            BackupOutcome::Mirror {
                path,
                stats,
                verify,
            } => {
                if let Some(verify) = verify {
                    if verify.has_problems() {
                        error!("Mirror {path:?} does not match its source");
                        exit_code = ExitCode::Failure;
                    }
                }
                if self.stats_json {
                    let json = serde_json::json!({
                        "path": path,
                        "copy": stats,
                        "verify": verify,
                    });
                    println!("{json:#}");
                } else if !self.no_stats {
                    println!("Backup complete: {}", path.display());
                    print!("{stats}");
                    if let Some(verify) = verify {
                        print!("{verify}");
                    }
                }
            }
            BackupOutcome::Archive { path } => {
                if self.stats_json {
                    println!("{:#}", serde_json::json!({ "path": path }));
                } else if !self.no_stats {
                    println!("Archive complete: {}", path.display());
                }
            }
        }
        Ok(exit_code)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let start_time = Instant::now();
    let trace_level = if args.debug {
        Level::TRACE
    } else {
        Level::INFO
    };
    let _flush_guard = match enable_tracing(&args.trace_time, trace_level, &args.log_json) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Failed to open log file {:?}: {err}", args.log_json);
            return ExitCode::Failure;
        }
    };
    let result = args.run();
    debug!(elapsed = ?start_time.elapsed());
    match result {
        Err(err) => {
            error!("{err}");
            let mut err: &dyn std::error::Error = &err;
            while let Some(source) = err.source() {
                error!("caused by: {source}");
                err = source;
            }
            ExitCode::Failure
        }
        Ok(exit_code) => exit_code,
    }
}

#[test]
fn verify_clap() {
    use clap::CommandFactory;
    Args::command().debug_assert()
}

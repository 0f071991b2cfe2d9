//! Directory enumeration and parallel size scanning.
//!
//! This module lists the immediate child directories of a root and measures
//! each of them on a rayon worker pool. Results are handed to a
//! [`ResultSink`] as soon as each directory is done, which either prints them
//! right away or buffers them for sorting.
//!
//! Failures are isolated per directory: a directory that cannot be measured
//! produces an unmeasured [`SizeResult`] and never aborts its siblings. Only
//! an invalid root, a cancellation request or a closed output ends a scan
//! early.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
    time::{Duration, Instant},
};

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use walkdir::{DirEntry, WalkDir};

use crate::{
    cancel::CancellationFlag, config::ScanOptions, entry::SizeResult, error::ScanError,
    utils::calculate_dir_size,
};

/// Destination for results produced by scan workers.
///
/// Implementations are called concurrently from several workers and must
/// serialize access to any state they share.
pub trait ResultSink: Sync {
    /// Take ownership of one finished result.
    ///
    /// # Errors
    ///
    /// An error means the sink can take no more results; the scanner stops
    /// dispatching new directories and reports it as [`ScanError::Output`].
    fn accept(&self, result: SizeResult) -> io::Result<()>;
}

/// Totals for a scan that ran to completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanSummary {
    /// Number of top-level directories measured
    pub scanned: usize,

    /// How many of them could not be measured
    pub failed: usize,

    /// Wall-clock time of the scan
    pub elapsed: Duration,
}

/// Reason a worker stopped the parallel loop.
enum Stop {
    Cancelled,
    Output(io::Error),
}

/// List the immediate child directories of `root`.
///
/// The sequence is lazy and in filesystem order. Symbolic links are skipped,
/// even when they point at directories, and entries that cannot be read are
/// skipped silently. A root that does not exist or is not a directory yields
/// an empty sequence.
pub fn enumerate_top_level(root: &Path) -> impl Iterator<Item = PathBuf> + Send + use<> {
    WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_dir())
        .map(DirEntry::into_path)
}

/// Measure one top-level directory.
///
/// Returns the result together with the error that made it unmeasured, if
/// any. A directory that vanished before or during the walk measures `0`.
pub fn measure_dir(order: usize, path: &Path) -> (SizeResult, Option<io::Error>) {
    match calculate_dir_size(path) {
        Ok(bytes) => (SizeResult::measured(order, path, bytes), None),
        Err(err) => (SizeResult::unmeasured(order, path), Some(err)),
    }
}

/// Parallel scanner measuring every top-level subdirectory of a root.
#[derive(Debug)]
pub struct Scanner {
    /// Configuration options for scanning behavior
    scan_options: ScanOptions,

    /// Checked before each directory is dispatched
    cancel: CancellationFlag,

    /// When `true`, shows a progress spinner on stderr
    progress: bool,
}

impl Scanner {
    /// Create a new scanner with the specified options.
    ///
    /// The scanner starts with a cancellation flag nobody else holds and no
    /// progress spinner.
    #[must_use]
    pub fn new(scan_options: ScanOptions) -> Self {
        Self {
            scan_options,
            cancel: CancellationFlag::new(),
            progress: false,
        }
    }

    /// Use `cancel` as the flag that stops dispatching new directories.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Enable or disable the progress spinner.
    ///
    /// The spinner only makes sense while output is withheld, so it should
    /// stay off in streaming mode.
    #[must_use]
    pub const fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// The cancellation flag observed by this scanner.
    #[must_use]
    pub const fn cancellation(&self) -> &CancellationFlag {
        &self.cancel
    }

    /// Measure every top-level subdirectory of `root`, delivering results to `sink`.
    ///
    /// Exactly one [`SizeResult`] is delivered per enumerated directory unless
    /// the scan is cancelled, in which case directories not yet dispatched are
    /// never measured. Directories already being measured finish and are
    /// still delivered.
    ///
    /// # Errors
    ///
    /// - [`ScanError::RootNotFound`] / [`ScanError::NotADirectory`] /
    ///   [`ScanError::RootInaccessible`] if `root` is not a usable directory
    /// - [`ScanError::ThreadPool`] if the worker pool cannot be built
    /// - [`ScanError::Cancelled`] if the cancellation flag stopped dispatch
    /// - [`ScanError::Output`] if the sink refused a result
    pub fn scan<S>(&self, root: &Path, sink: &S) -> Result<ScanSummary, ScanError>
    where
        S: ResultSink + ?Sized,
    {
        let root = Self::resolve_root(root)?;
        let start = Instant::now();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.scan_options.threads)
            .build()?;

        let errors = Mutex::new(Vec::<String>::new());
        let completed = AtomicUsize::new(0);
        let failed = AtomicUsize::new(0);
        let progress = self.progress_bar();

        let outcome = pool.install(|| {
            enumerate_top_level(&root)
                .enumerate()
                .par_bridge()
                .try_for_each(|(order, target)| {
                    if self.cancel.is_cancelled() {
                        return Err(Stop::Cancelled);
                    }

                    let (result, error) = measure_dir(order, &target);
                    if let Some(err) = error {
                        failed.fetch_add(1, Ordering::Relaxed);
                        errors
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .push(format!("Error measuring {}: {err}", target.display()));
                    }
                    sink.accept(result).map_err(Stop::Output)?;

                    let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    progress.set_message(format!("Scanning... {n} directories measured"));
                    Ok(())
                })
        });

        progress.finish_and_clear();

        if self.scan_options.verbose {
            let errors = errors.into_inner().unwrap_or_else(PoisonError::into_inner);
            for error in &errors {
                eprintln!("{}", error.red());
            }
        }

        let completed = completed.into_inner();
        match outcome {
            Ok(()) => Ok(ScanSummary {
                scanned: completed,
                failed: failed.into_inner(),
                elapsed: start.elapsed(),
            }),
            Err(Stop::Cancelled) => Err(ScanError::Cancelled { completed }),
            Err(Stop::Output(source)) => Err(ScanError::Output(source)),
        }
    }

    /// Check that `root` is an existing, listable directory and make it absolute.
    fn resolve_root(root: &Path) -> Result<PathBuf, ScanError> {
        let absolute = std::path::absolute(root).map_err(|source| ScanError::RootInaccessible {
            path: root.to_path_buf(),
            source,
        })?;

        match fs::metadata(&absolute) {
            Ok(metadata) if metadata.is_dir() => {}
            Ok(_) => return Err(ScanError::NotADirectory(absolute)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(ScanError::RootNotFound(absolute));
            }
            Err(source) => {
                return Err(ScanError::RootInaccessible {
                    path: absolute,
                    source,
                });
            }
        }

        // The enumerator drops listing errors, so an unlistable root would
        // otherwise look like an empty one.
        match fs::read_dir(&absolute) {
            Ok(_) => Ok(absolute),
            Err(source) => Err(ScanError::RootInaccessible {
                path: absolute,
                source,
            }),
        }
    }

    fn progress_bar(&self) -> ProgressBar {
        if !self.progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message("Scanning...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

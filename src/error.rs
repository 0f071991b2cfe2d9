//! Error types for the directory-size scanner.
//!
//! Only coordinator-wide conditions are represented here. Failures that affect
//! a single top-level directory never become a [`ScanError`]; they are folded
//! into that directory's [`SizeResult`](crate::entry::SizeResult) as the
//! unmeasured sentinel instead.

use std::{io, path::PathBuf};

/// Errors that stop a scan as a whole.
///
/// # Error Recovery Strategy
///
/// - [`ScanError::Cancelled`]: user-requested stop, report as a notice
/// - Everything else: unexpected, report as an error and exit non-zero
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The cancellation flag was raised before every directory was dispatched.
    #[error("scan cancelled after {completed} directories")]
    Cancelled {
        /// Number of results delivered before dispatch stopped.
        completed: usize,
    },

    /// The scan root does not exist.
    #[error("directory not found: {}", _0.display())]
    RootNotFound(PathBuf),

    /// The scan root exists but is not a directory.
    #[error("not a directory: {}", _0.display())]
    NotADirectory(PathBuf),

    /// The scan root could not be inspected.
    #[error("failed to access {}: {source}", path.display())]
    RootInaccessible {
        /// The root that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Writing a result to the output failed, e.g. because stdout was closed.
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),

    /// The worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl ScanError {
    /// Returns `true` if the scan stopped because cancellation was requested.
    #[inline]
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_is_distinguishable() {
        let err = ScanError::Cancelled { completed: 3 };
        assert!(err.is_cancelled());
        assert_eq!(err.to_string(), "scan cancelled after 3 directories");
    }

    #[test]
    fn test_root_errors_are_not_cancellation() {
        let missing = ScanError::RootNotFound(PathBuf::from("/nope"));
        let file = ScanError::NotADirectory(PathBuf::from("/etc/hosts"));

        assert!(!missing.is_cancelled());
        assert!(!file.is_cancelled());
        assert!(missing.to_string().contains("/nope"));
        assert!(file.to_string().contains("/etc/hosts"));
    }

    #[test]
    fn test_root_inaccessible_display() {
        let err = ScanError::RootInaccessible {
            path: PathBuf::from("/locked"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };

        assert!(!err.is_cancelled());
        assert_eq!(err.to_string(), "failed to access /locked: denied");
    }

    #[test]
    fn test_output_error_display() {
        let err = ScanError::Output(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));

        assert!(!err.is_cancelled());
        assert_eq!(err.to_string(), "failed to write output: pipe closed");
    }
}

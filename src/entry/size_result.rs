//! The result produced for a single top-level directory.

use std::path::Path;

/// Size value meaning "could not be measured".
///
/// Distinct from `0`, which is a genuine empty (or vanished) directory.
pub const UNMEASURED: i64 = -1;

/// The recursive size of one top-level directory.
///
/// Produced exactly once per enumerated directory by the worker that measured
/// it, then handed to a [`ResultSink`](crate::scanner::ResultSink).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SizeResult {
    /// Final path component of the measured directory
    pub name: String,

    /// Size in bytes, or [`UNMEASURED`]
    pub size: i64,

    /// Position of the directory in enumeration order
    pub order: usize,
}

impl SizeResult {
    /// Create a result from its parts.
    #[must_use]
    pub fn new(order: usize, name: impl Into<String>, size: i64) -> Self {
        Self {
            name: name.into(),
            size,
            order,
        }
    }

    /// Create a result named after the last component of `path`.
    ///
    /// Paths without a final component (such as `/`) are named by their full
    /// display form.
    #[must_use]
    pub fn from_path(order: usize, path: &Path, size: i64) -> Self {
        let name = path.file_name().map_or_else(
            || path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        );

        Self::new(order, name, size)
    }

    /// Create a result from a byte count, saturating at `i64::MAX`.
    #[must_use]
    pub fn measured(order: usize, path: &Path, bytes: u64) -> Self {
        Self::from_path(order, path, i64::try_from(bytes).unwrap_or(i64::MAX))
    }

    /// Create the sentinel result for a directory that could not be measured.
    #[must_use]
    pub fn unmeasured(order: usize, path: &Path) -> Self {
        Self::from_path(order, path, UNMEASURED)
    }

    /// Whether the size is a real byte count.
    #[must_use]
    pub const fn is_measured(&self) -> bool {
        self.size >= 0
    }

    /// The size in bytes, or `None` for the unmeasured sentinel.
    #[must_use]
    pub fn bytes(&self) -> Option<u64> {
        u64::try_from(self.size).ok()
    }
}

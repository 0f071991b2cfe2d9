//! Scanning configuration for the parallel coordinator.
//!
//! This module defines the options that control how many workers measure
//! top-level directories and whether measurement failures are reported.

/// Configuration for directory scanning behavior.
#[derive(Clone, Debug, Default)]
pub struct ScanOptions {
    /// Whether to print the reason behind each unmeasured directory
    pub verbose: bool,

    /// Number of worker threads (0 = one per available CPU)
    pub threads: usize,
}

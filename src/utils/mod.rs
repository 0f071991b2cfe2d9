//! Utility functions and helpers.
//!
//! This module contains the filesystem helpers used by the scanner, such as
//! recursive directory size measurement.

pub mod size;

pub use size::calculate_dir_size;

//! # dir-sizes
//!
//! Library backing the `dir-sizes` CLI. For every immediate subdirectory of a
//! root it measures the recursive size of its contents on a rayon worker pool,
//! then either streams each result as it completes or buffers, sorts and
//! prints them in one pass.
//!
//! ## Main Parts
//!
//! - [`scanner::Scanner`] - parallel scan coordinator with cooperative cancellation
//! - [`scanner::enumerate_top_level`] - lazy listing of the root's child directories
//! - [`utils::calculate_dir_size`] - recursive size accumulator
//! - [`entry::SizeResult`] and [`entry::ResultSet`] - per-directory results and their buffered collection
//! - [`presenter`] - line formatting, sorting and the streaming printer

pub mod cancel;
pub mod config;
pub mod entry;
pub mod error;
pub mod output;
pub mod presenter;
pub mod scanner;
pub mod utils;

pub use cancel::CancellationFlag;
pub use config::{OutputOptions, ScanOptions, SortOrder};
pub use entry::{ResultSet, SizeResult, UNMEASURED};
pub use error::ScanError;
pub use scanner::{ResultSink, ScanSummary, Scanner};

//! Configuration types for scanning and presentation.
//!
//! Options are built once per invocation by layering CLI arguments over the
//! optional configuration file (see [`file`]) and stay read-only afterwards.

pub mod file;
pub mod output;
pub mod scan;

pub use file::FileConfig;
pub use output::{DEFAULT_NAME_WIDTH, OutputOptions, SortOrder};
pub use scan::ScanOptions;

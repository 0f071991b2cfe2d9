//! Presentation configuration.
//!
//! This module decides whether results are streamed or buffered, in which
//! direction buffered results are sorted, and how wide the name column is.

use clap::ValueEnum;

/// Default padding width of the directory-name column.
pub const DEFAULT_NAME_WIDTH: usize = 50;

/// Direction in which buffered results are sorted by size.
///
/// Unmeasured directories are placed after every measured one in both
/// directions.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum, Default)]
pub enum SortOrder {
    /// Smallest first
    #[default]
    #[value(name = "asc")]
    Ascending,

    /// Largest first
    #[value(name = "desc")]
    Descending,
}

/// Configuration for how results are delivered and rendered.
#[derive(Clone, Debug)]
pub struct OutputOptions {
    /// Buffer every result and print them sorted by size
    pub sort: bool,

    /// Sort direction used when `sort` is set
    pub order: SortOrder,

    /// Padding width of the name column
    pub name_width: usize,

    /// Emit a single JSON document instead of text lines
    pub json: bool,
}

impl OutputOptions {
    /// Whether results must be collected before anything is printed.
    ///
    /// JSON output is a single document, so it always buffers.
    #[must_use]
    pub const fn buffered(&self) -> bool {
        self.sort || self.json
    }
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            sort: false,
            order: SortOrder::default(),
            name_width: DEFAULT_NAME_WIDTH,
            json: false,
        }
    }
}

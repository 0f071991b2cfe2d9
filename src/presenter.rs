//! Rendering and ordering of scan results.
//!
//! Each result becomes one line: the directory name left-aligned to a fixed
//! width, a space, then the human-readable size or `N/A` for a directory
//! that could not be measured.

use std::{
    cmp::Ordering,
    io::{self, Write},
    sync::{Mutex, PoisonError},
};

use colored::Colorize;
use humansize::{BINARY, format_size};

use crate::{config::SortOrder, entry::SizeResult, scanner::ResultSink};

/// Marker printed in place of a size that could not be measured.
pub const UNMEASURED_LABEL: &str = "N/A";

/// Human-readable size of a result, or `None` when it is unmeasured.
#[must_use]
pub fn size_label(result: &SizeResult) -> Option<String> {
    result.bytes().map(|bytes| format_size(bytes, BINARY))
}

/// Format a result as a plain, uncolored output line.
///
/// # Examples
///
/// ```
/// # use dir_sizes::{SizeResult, presenter::format_line};
/// let line = format_line(&SizeResult::new(0, "docs", 350), 10);
/// assert_eq!(line, "docs       350 B");
/// ```
#[must_use]
pub fn format_line(result: &SizeResult, name_width: usize) -> String {
    let size = size_label(result).unwrap_or_else(|| UNMEASURED_LABEL.to_string());
    format!("{:<name_width$} {size}", result.name)
}

/// Format a result for the terminal, highlighting the `N/A` marker.
fn render_line(result: &SizeResult, name_width: usize) -> String {
    match size_label(result) {
        Some(size) => format!("{:<name_width$} {size}", result.name),
        None => format!("{:<name_width$} {}", result.name, UNMEASURED_LABEL.red()),
    }
}

/// Sort results by size in the given direction.
///
/// Unmeasured results always come after every measured one, whatever the
/// direction. Equal sizes keep enumeration order.
pub fn sort_results(results: &mut [SizeResult], order: SortOrder) {
    results.sort_by(|a, b| compare_sizes(a, b, order).then(a.order.cmp(&b.order)));
}

fn compare_sizes(a: &SizeResult, b: &SizeResult, order: SortOrder) -> Ordering {
    match (a.bytes(), b.bytes()) {
        (Some(x), Some(y)) => match order {
            SortOrder::Ascending => x.cmp(&y),
            SortOrder::Descending => y.cmp(&x),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Print every result to `out`, one line each.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn print_results<W: Write>(
    out: &mut W,
    results: &[SizeResult],
    name_width: usize,
) -> io::Result<()> {
    for result in results {
        writeln!(out, "{}", render_line(result, name_width))?;
    }
    Ok(())
}

/// Streaming sink that prints each result as soon as it arrives.
///
/// The writer is held behind a mutex for the duration of one line, so lines
/// from concurrent workers never interleave.
#[derive(Debug)]
pub struct LinePrinter<W> {
    out: Mutex<W>,
    name_width: usize,
}

impl<W: Write + Send> LinePrinter<W> {
    /// Create a printer writing to `out` with the given name column width.
    pub const fn new(out: W, name_width: usize) -> Self {
        Self {
            out: Mutex::new(out),
            name_width,
        }
    }

    /// Consume the printer and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> ResultSink for LinePrinter<W> {
    fn accept(&self, result: SizeResult) -> io::Result<()> {
        let line = render_line(&result, self.name_width);
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(out, "{line}")?;
        out.flush()
    }
}

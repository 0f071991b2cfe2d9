//! Structured JSON output for scripting and piping.
//!
//! When the `--json` flag is passed, the whole scan is serialized to stdout as
//! a single JSON object, replacing all human-readable output.

use std::path::Path;

use humansize::{BINARY, format_size};
use serde::Serialize;

use crate::{entry::SizeResult, presenter::size_label, scanner::ScanSummary};

/// Top-level JSON output emitted when `--json` is active.
#[derive(Serialize, Debug)]
pub struct JsonOutput {
    /// The scanned root directory.
    pub root: String,

    /// Whether `entries` is sorted by size (otherwise enumeration order).
    pub sorted: bool,

    /// One entry per top-level subdirectory.
    pub entries: Vec<JsonEntry>,

    /// Aggregated summary statistics.
    pub summary: JsonSummary,
}

/// A single directory in the JSON output.
#[derive(Serialize, Debug)]
pub struct JsonEntry {
    /// Final path component of the directory.
    pub name: String,

    /// Size in bytes, or `-1` if it could not be measured.
    pub size: i64,

    /// Human-readable size (e.g. `"1.5 MiB"`), or `null` if unmeasured.
    pub size_formatted: Option<String>,
}

/// Totals across all directories.
#[derive(Serialize, Debug)]
pub struct JsonSummary {
    /// Number of directories measured.
    pub total_directories: usize,

    /// Number of directories that could not be measured.
    pub failed: usize,

    /// Sum of all measured sizes in bytes.
    pub total_size: u64,

    /// Human-readable total size.
    pub total_size_formatted: String,

    /// Scan duration in milliseconds.
    pub elapsed_ms: u64,
}

impl JsonOutput {
    /// Build the JSON document for a finished scan.
    #[must_use]
    pub fn from_results(
        root: &Path,
        results: &[SizeResult],
        summary: &ScanSummary,
        sorted: bool,
    ) -> Self {
        let total_size = results
            .iter()
            .filter_map(SizeResult::bytes)
            .fold(0u64, u64::saturating_add);

        Self {
            root: root.display().to_string(),
            sorted,
            entries: results.iter().map(JsonEntry::from).collect(),
            summary: JsonSummary {
                total_directories: summary.scanned,
                failed: summary.failed,
                total_size,
                total_size_formatted: format_size(total_size, BINARY),
                elapsed_ms: u64::try_from(summary.elapsed.as_millis()).unwrap_or(u64::MAX),
            },
        }
    }
}

impl From<&SizeResult> for JsonEntry {
    fn from(result: &SizeResult) -> Self {
        Self {
            name: result.name.clone(),
            size: result.size,
            size_formatted: size_label(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::UNMEASURED;
    use std::time::Duration;

    fn summary() -> ScanSummary {
        ScanSummary {
            scanned: 3,
            failed: 1,
            elapsed: Duration::from_millis(12),
        }
    }

    fn results() -> Vec<SizeResult> {
        vec![
            SizeResult::new(1, "B", 0),
            SizeResult::new(0, "A", 350),
            SizeResult::new(2, "C", UNMEASURED),
        ]
    }

    #[test]
    fn test_summary_excludes_unmeasured_from_total() {
        let output = JsonOutput::from_results(Path::new("/root"), &results(), &summary(), true);

        assert_eq!(output.root, "/root");
        assert!(output.sorted);
        assert_eq!(output.summary.total_directories, 3);
        assert_eq!(output.summary.failed, 1);
        assert_eq!(output.summary.total_size, 350);
        assert_eq!(output.summary.total_size_formatted, "350 B");
        assert_eq!(output.summary.elapsed_ms, 12);
    }

    #[test]
    fn test_entries_keep_given_order() {
        let output = JsonOutput::from_results(Path::new("."), &results(), &summary(), true);
        let names: Vec<_> = output.entries.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(names, ["B", "A", "C"]);
    }

    #[test]
    fn test_serialized_shape() {
        let output = JsonOutput::from_results(Path::new("/data"), &results(), &summary(), false);
        let value = serde_json::to_value(&output).unwrap();

        assert_eq!(value["sorted"], false);
        assert_eq!(value["entries"][0]["size"], 0);
        assert_eq!(value["entries"][0]["size_formatted"], "0 B");
        assert_eq!(value["entries"][2]["size"], -1);
        assert!(value["entries"][2]["size_formatted"].is_null());
        assert_eq!(value["summary"]["total_size"], 350);
    }
}

//! Recursive directory size measurement.
//!
//! This module sums the byte length of every regular file below a directory.
//! Unlike a best-effort walk it refuses to return a partial sum: any I/O
//! failure other than an entry vanishing mid-walk fails the whole
//! measurement, so a small result always means a small directory. Every
//! regular file must be openable for reading, not just stat-able.

use std::{fs::File, io, path::Path};

use walkdir::WalkDir;

/// Calculate the total size of a directory and all its contents, in bytes.
///
/// Symbolic links are neither followed nor counted, so self-referential link
/// structures cannot loop.
///
/// Returns `Ok(0)` if the path does not exist (it was deleted before or while
/// being measured). Nested entries that disappear between being listed and
/// being inspected contribute nothing.
///
/// # Errors
///
/// Returns the first I/O error hit while traversing (unreadable file,
/// unlistable directory, ...). No partial sum is returned in that case.
pub fn calculate_dir_size(path: &Path) -> io::Result<u64> {
    let mut total = 0u64;

    for entry in WalkDir::new(path).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if is_vanished(&err) => {
                if err.depth() == 0 {
                    return Ok(0);
                }
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        if !entry.file_type().is_file() {
            continue;
        }

        match File::open(entry.path()) {
            Ok(_) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
            Err(err) => return Err(err),
        }

        match entry.metadata() {
            Ok(metadata) => total = total.saturating_add(metadata.len()),
            Err(err) if is_vanished(&err) => {}
            Err(err) => return Err(err.into()),
        }
    }

    Ok(total)
}

/// Whether a walk error means the entry no longer exists.
fn is_vanished(err: &walkdir::Error) -> bool {
    err.io_error()
        .is_some_and(|io_err| io_err.kind() == io::ErrorKind::NotFound)
}

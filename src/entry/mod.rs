//! Per-directory scan results.
//!
//! ## Main Parts
//!
//! - [`SizeResult`] - the measured (or unmeasured) size of one top-level directory
//! - [`ResultSet`] - the mutex-guarded collection used in buffered mode

pub mod result_set;
pub mod size_result;

pub use result_set::ResultSet;
pub use size_result::{SizeResult, UNMEASURED};

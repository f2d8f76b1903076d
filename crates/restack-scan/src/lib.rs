//! Read-only repository scanning.
//!
//! [`walker::scan`] turns a directory tree into the sorted `Vec<FileRecord>`
//! the analysis pipeline consumes. [`python`] extracts per-file Python
//! metadata with a regex line scan; [`git`] probes version-control state.
//! Nothing in this crate writes to the scanned tree.

pub mod git;
pub mod python;
pub mod walker;

pub use git::GitInfo;
pub use walker::scan;

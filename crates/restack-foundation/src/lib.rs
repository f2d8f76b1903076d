//! Foundation layer for restack: the data model every other crate speaks.
//!
//! All pipeline inputs and outputs live here so that the scanner, the
//! analysis crates and the CLI agree on one vocabulary:
//! - [`record::FileRecord`] and [`record::ImportStatement`]: what the scanner produces
//! - [`category::FileCategory`]: the closed classification set
//! - [`proposal::Proposal`]: suggested changes, never auto-applied
//! - [`warning::ImportWarning`]: advisory import-breakage signals
//! - [`confidence::ConfidenceScore`]: the explainable HIGH/MEDIUM/LOW verdict
//!
//! Everything is plain data with serde derives; no I/O happens in this crate.

pub mod category;
pub mod confidence;
pub mod error;
pub mod paths;
pub mod profile;
pub mod proposal;
pub mod record;
pub mod repo_type;
pub mod warning;

pub use category::FileCategory;
pub use confidence::{
    ConfidenceLevel, ConfidenceScore, Contribution, ExecutionMode, Factor,
};
pub use error::{RestackError, RestackResult};
pub use profile::EcosystemProfile;
pub use proposal::{ActionType, DuplicateSet, Proposal, RiskLevel};
pub use record::{FileRecord, ImportStatement};
pub use repo_type::RepoType;
pub use warning::{ImportWarning, ImportWarningKind};

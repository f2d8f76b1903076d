//! Pure analysis pipeline for repository structure advice.
//!
//! Everything in this crate operates on in-memory [`FileRecord`] slices and
//! produces plain data. No filesystem access happens here: scanning lives in
//! `restack-scan`, mutation in the application crate. Running the pipeline
//! twice over the same records yields identical reports.

pub mod classifier;
pub mod confidence;
pub mod duplicates;
pub mod imports;
pub mod reasoner;
pub mod repo_type;

use restack_foundation::{
    ConfidenceScore, EcosystemProfile, ExecutionMode, FileCategory, FileRecord, ImportWarning,
    Proposal, RepoType,
};
use serde::{Deserialize, Serialize};

/// Complete output of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    pub repo_type: RepoType,
    pub profile: String,
    pub proposals: Vec<Proposal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ImportWarning>,
    pub confidence: ConfidenceScore,
}

/// Run the full pipeline: detect the repository type, group duplicates,
/// generate proposals, analyze import breakage, and score confidence.
pub fn run(records: &[FileRecord], mode: ExecutionMode) -> AnalysisReport {
    let repo_type = repo_type::detect(records);
    let profile = EcosystemProfile::for_repo_type(repo_type);
    tracing::debug!(?repo_type, profile = profile.name, files = records.len(), "analysis started");

    let duplicate_sets = duplicates::group(records, profile);
    let proposals = reasoner::propose(records, &duplicate_sets, repo_type);
    let warnings = imports::analyze(&proposals, records, repo_type);

    let test_file_count = records
        .iter()
        .filter(|r| classifier::classify(r) == FileCategory::Tests)
        .count();
    let confidence = confidence::score(repo_type, &proposals, &warnings, test_file_count, mode);

    tracing::info!(
        proposals = proposals.len(),
        warnings = warnings.len(),
        verdict = %confidence.verdict,
        "analysis finished"
    );

    AnalysisReport {
        repo_type,
        profile: profile.name.to_string(),
        proposals,
        warnings,
        confidence,
    }
}

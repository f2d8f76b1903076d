//! Confidence aggregation: one explainable HIGH/MEDIUM/LOW verdict.
//!
//! A fixed-order cap model rather than opaque point arithmetic: each factor
//! either records a positive observation or fires a cap, and the final
//! verdict is the minimum level the caps left standing. The factor list is
//! the whole story; `ConfidenceScore::verdict_from_factors` replays it and
//! reproduces the verdict.

use restack_foundation::{
    ConfidenceScore, Contribution, ExecutionMode, Factor, ImportWarning,
    Proposal, RepoType, RiskLevel,
};

/// Aggregate repository type, proposal risk distribution, import warnings
/// and execution mode into a confidence verdict.
///
/// `test_file_count` is the number of files the classifier assigned to the
/// tests category; import warnings in a repository with zero tests cap the
/// verdict at LOW because there is nothing to catch a broken move.
pub fn score(
    repo_type: RepoType,
    proposals: &[Proposal],
    warnings: &[ImportWarning],
    test_file_count: usize,
    mode: ExecutionMode,
) -> ConfidenceScore {
    let mut factors = Vec::new();

    // 1. Repository type.
    match repo_type {
        RepoType::PythonDominant => {
            factors.push(Factor::new("python-dominant repository", Contribution::None));
        }
        RepoType::Mixed => {
            factors.push(Factor::new(
                "mixed repository: move coverage is partial",
                Contribution::CapMedium,
            ));
        }
        RepoType::NonPython => {
            factors.push(Factor::new(
                "non-python repository: moves suppressed",
                Contribution::CapMedium,
            ));
        }
    }

    // 2. Proposal risk distribution.
    let high_count = proposals
        .iter()
        .filter(|p| p.risk == RiskLevel::High)
        .count();
    if high_count > 0 {
        factors.push(Factor::new(
            format!("{high_count} high-risk proposal(s)"),
            Contribution::CapMedium,
        ));
        if high_count * 2 > proposals.len() {
            factors.push(Factor::new(
                "majority of proposals are high-risk",
                Contribution::CapLow,
            ));
        }
    } else if !proposals.is_empty() {
        factors.push(Factor::new("no high-risk proposals", Contribution::None));
    }

    // 3. Import warnings.
    if !warnings.is_empty() {
        factors.push(Factor::new(
            format!("{} import breakage warning(s)", warnings.len()),
            Contribution::CapMedium,
        ));
        if test_file_count == 0 {
            factors.push(Factor::new(
                "import warnings with no test coverage to catch breakage",
                Contribution::CapLow,
            ));
        }
    } else if proposals.iter().any(Proposal::is_move) {
        factors.push(Factor::new("no import breakage warnings", Contribution::None));
    }

    // 4. Execution mode: executing costs one level as an added-caution
    // margin over the identical dry-run.
    match mode {
        ExecutionMode::DryRun => {
            factors.push(Factor::new("dry-run mode", Contribution::None));
        }
        ExecutionMode::Execute => {
            factors.push(Factor::new(
                "execute mode safety margin",
                Contribution::DowngradeOneLevel,
            ));
        }
    }

    let verdict = ConfidenceScore::verdict_from_factors(&factors);
    tracing::info!(verdict = %verdict, "confidence computed");
    ConfidenceScore { verdict, factors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use restack_foundation::{ConfidenceLevel, FileCategory, ImportWarningKind};

    fn mv(risk: RiskLevel) -> Proposal {
        Proposal::move_file("a.py", "src/a.py", "r", risk, FileCategory::Src)
    }

    fn warning() -> ImportWarning {
        ImportWarning {
            source_file: "a.py".to_string(),
            line: 1,
            kind: ImportWarningKind::RelativeImport,
            affected_path: "b.py".to_string(),
            detail: String::new(),
        }
    }

    #[test]
    fn clean_python_dry_run_is_high() {
        let proposals = vec![mv(RiskLevel::Low)];
        let score = score(
            RepoType::PythonDominant,
            &proposals,
            &[],
            2,
            ExecutionMode::DryRun,
        );
        assert_eq!(score.verdict, ConfidenceLevel::High);
    }

    #[test]
    fn any_high_risk_proposal_caps_at_medium() {
        let proposals = vec![mv(RiskLevel::Low), mv(RiskLevel::Low), mv(RiskLevel::High)];
        let score = score(
            RepoType::PythonDominant,
            &proposals,
            &[],
            2,
            ExecutionMode::DryRun,
        );
        assert_eq!(score.verdict, ConfidenceLevel::Medium);
    }

    #[test]
    fn high_risk_majority_caps_at_low() {
        let proposals = vec![mv(RiskLevel::High), mv(RiskLevel::High), mv(RiskLevel::Low)];
        let score = score(
            RepoType::PythonDominant,
            &proposals,
            &[],
            2,
            ExecutionMode::DryRun,
        );
        assert_eq!(score.verdict, ConfidenceLevel::Low);
    }

    #[test]
    fn import_warnings_cap_at_medium_and_low_without_tests() {
        let proposals = vec![mv(RiskLevel::Low)];
        let with_tests = score(
            RepoType::PythonDominant,
            &proposals,
            &[warning()],
            3,
            ExecutionMode::DryRun,
        );
        assert_eq!(with_tests.verdict, ConfidenceLevel::Medium);

        let without_tests = score(
            RepoType::PythonDominant,
            &proposals,
            &[warning()],
            0,
            ExecutionMode::DryRun,
        );
        assert_eq!(without_tests.verdict, ConfidenceLevel::Low);
    }

    #[test]
    fn execute_mode_downgrades_one_level() {
        let proposals = vec![mv(RiskLevel::Low)];
        let dry = score(
            RepoType::PythonDominant,
            &proposals,
            &[],
            2,
            ExecutionMode::DryRun,
        );
        let exec = score(
            RepoType::PythonDominant,
            &proposals,
            &[],
            2,
            ExecutionMode::Execute,
        );
        assert_eq!(dry.verdict, ConfidenceLevel::High);
        assert_eq!(exec.verdict, ConfidenceLevel::Medium);
    }

    #[test]
    fn non_python_repo_caps_at_medium() {
        let score = score(RepoType::NonPython, &[], &[], 0, ExecutionMode::DryRun);
        assert_eq!(score.verdict, ConfidenceLevel::Medium);
    }

    #[test]
    fn verdict_is_reconstructible_from_factors() {
        let proposals = vec![mv(RiskLevel::High), mv(RiskLevel::Low)];
        let s = score(
            RepoType::Mixed,
            &proposals,
            &[warning()],
            0,
            ExecutionMode::Execute,
        );
        assert_eq!(
            ConfidenceScore::verdict_from_factors(&s.factors),
            s.verdict
        );
    }
}

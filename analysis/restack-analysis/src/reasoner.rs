//! Proposal generation: turns classifications and duplicate sets into an
//! ordered list of MOVE and FLAG proposals.

use std::collections::HashSet;

use restack_foundation::paths;
use restack_foundation::profile::{is_critical_filename, is_root_anchored};
use restack_foundation::{
    DuplicateSet, FileCategory, FileRecord, Proposal, RepoType, RiskLevel,
};

use crate::classifier;

/// Category order for the MOVE phase. Matches the classifier's rule
/// priority so that output grouping is stable and reviewable; Trash flags
/// come last.
const CATEGORY_ORDER: [FileCategory; 9] = [
    FileCategory::Experiments,
    FileCategory::Tests,
    FileCategory::Configs,
    FileCategory::Scripts,
    FileCategory::Src,
    FileCategory::Docs,
    FileCategory::Markdown,
    FileCategory::Data,
    FileCategory::Trash,
];

/// Basenames whose duplication is routine rather than suspicious.
const LOW_RISK_DUPLICATE_NAMES: &[&str] = &[
    "readme.md",
    "changelog.md",
    "license",
    "license.md",
    "license.txt",
    "contributing.md",
];

/// Generate the full proposal list.
///
/// Ordering contract: duplicate FLAGs first (one per set), then MOVEs
/// grouped by category in [`CATEGORY_ORDER`]; within a group, input scan
/// order. The list is generation-ordered and renderers must not re-sort it.
///
/// Gating by repository type:
/// - `PythonDominant`: full MOVE generation.
/// - `Mixed`: MOVEs for Python files only; non-Python files are left alone.
/// - `NonPython`: no MOVEs at all, only duplicate FLAGs, as a deliberate
///   safety gate against wrong directory-convention assumptions.
pub fn propose(
    records: &[FileRecord],
    duplicate_sets: &[DuplicateSet],
    repo_type: RepoType,
) -> Vec<Proposal> {
    let mut proposals = Vec::new();

    let duplicate_members: HashSet<&str> = duplicate_sets
        .iter()
        .flat_map(|set| set.paths.iter().map(String::as_str))
        .collect();

    for set in duplicate_sets {
        proposals.push(duplicate_flag(set));
    }

    if repo_type == RepoType::NonPython {
        tracing::info!("non-python repository: MOVE proposals suppressed");
        return proposals;
    }

    // Classify once, then emit in fixed category order.
    let classified: Vec<(usize, FileCategory)> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| repo_type == RepoType::PythonDominant || record.is_python)
        .map(|(idx, record)| (idx, classifier::classify(record)))
        .collect();

    for category in CATEGORY_ORDER {
        for (idx, assigned) in &classified {
            if *assigned != category {
                continue;
            }
            let record = &records[*idx];
            if let Some(proposal) = propose_for_file(record, category, &duplicate_members) {
                proposals.push(proposal);
            }
        }
    }

    tracing::info!(count = proposals.len(), "proposals generated");
    proposals
}

fn propose_for_file(
    record: &FileRecord,
    category: FileCategory,
    duplicate_members: &HashSet<&str>,
) -> Option<Proposal> {
    if category == FileCategory::Trash {
        return Some(
            Proposal::flag(
                &record.path,
                "Could not classify; needs manual review",
                RiskLevel::Low,
            )
            .with_category(FileCategory::Trash),
        );
    }

    let name = record.file_name();
    if is_root_anchored(name) {
        return None;
    }

    // Already under an accepted directory for its category: fixed point,
    // no proposal.
    if let Some(first) = paths::first_component(&record.path) {
        if category.accepted_roots().contains(&first) {
            return None;
        }
    }

    let canonical = category.canonical_dir()?;
    let target = paths::join(canonical, name);
    if target == record.path {
        return None;
    }

    let risk = move_risk(record, category, duplicate_members);
    let current = if record.parent_dir().is_empty() {
        "root".to_string()
    } else {
        record.parent_dir().to_string()
    };

    Some(
        Proposal::move_file(&record.path, target, move_reason(record, category), risk, category)
            .with_extra("current_location", current),
    )
}

/// Risk for a MOVE. Category table with upward-only overrides: critical
/// filenames and duplicate-set members are always High, never Low.
fn move_risk(
    record: &FileRecord,
    category: FileCategory,
    duplicate_members: &HashSet<&str>,
) -> RiskLevel {
    if is_critical_filename(record.file_name()) {
        return RiskLevel::High;
    }
    if duplicate_members.contains(record.path.as_str()) {
        return RiskLevel::High;
    }
    match category {
        FileCategory::Configs | FileCategory::Scripts | FileCategory::Src => RiskLevel::Medium,
        FileCategory::Tests
        | FileCategory::Docs
        | FileCategory::Markdown
        | FileCategory::Data
        | FileCategory::Experiments
        | FileCategory::Trash => RiskLevel::Low,
    }
}

fn move_reason(record: &FileRecord, category: FileCategory) -> String {
    let mut parts: Vec<String> = Vec::new();
    match category {
        FileCategory::Tests => {
            if record.is_test {
                parts.push("Contains test functions or test classes".to_string());
            }
            if record.file_name().starts_with("test_") || record.file_name().ends_with("_test.py")
            {
                parts.push("Follows the test file naming convention".to_string());
            }
            parts.push("Test files belong under tests/".to_string());
        }
        FileCategory::Src => {
            parts.push(format!(
                "Module with {} import(s), indicating application logic",
                record.imports.len()
            ));
            parts.push("Library code belongs under src/".to_string());
        }
        FileCategory::Scripts => {
            if record.has_main_block {
                parts.push("Contains an entry-point block".to_string());
            } else {
                parts.push("Executable naming convention".to_string());
            }
            parts.push("Executable scripts belong under scripts/".to_string());
        }
        FileCategory::Configs => {
            parts.push("Configuration file detected by name or extension".to_string());
            parts.push("Non-root configuration belongs under configs/".to_string());
        }
        FileCategory::Docs | FileCategory::Markdown => {
            parts.push("Documentation file".to_string());
            parts.push("Documentation belongs under docs/".to_string());
        }
        FileCategory::Data => {
            parts.push("Data file detected by extension".to_string());
            parts.push("Data files belong under data/".to_string());
        }
        FileCategory::Experiments => {
            parts.push("Temporary or experimental naming pattern".to_string());
            parts.push("Consider moving to experiments/ or removing if obsolete".to_string());
        }
        FileCategory::Trash => parts.push("Needs manual review".to_string()),
    }
    parts.join(". ") + "."
}

fn duplicate_flag(set: &DuplicateSet) -> Proposal {
    let risk = duplicate_risk(set);
    let reason = format!(
        "Duplicate filename: {} files named '{}'",
        set.paths.len(),
        set.normalized_name
    );
    let mut proposal = Proposal::flag(&set.paths[0], reason, risk)
        .with_extra("total_count", set.paths.len().to_string());
    // One extra key per member path; zero-padded indexes keep set order.
    for (i, path) in set.paths.iter().enumerate() {
        proposal = proposal.with_extra(format!("member_{:02}", i + 1), path.clone());
    }
    proposal
        .extra
        .insert("normalized_name".to_string(), set.normalized_name.clone());
    proposal
}

/// Risk for a duplicate set: High when any member basename is critical,
/// Low for routine documentation/log names, Medium otherwise.
fn duplicate_risk(set: &DuplicateSet) -> RiskLevel {
    if set
        .paths
        .iter()
        .any(|path| is_critical_filename(paths::file_name(path)))
    {
        return RiskLevel::High;
    }
    let name = set.normalized_name.as_str();
    if LOW_RISK_DUPLICATE_NAMES.contains(&name) || name.ends_with(".log") || name.ends_with(".tmp")
    {
        return RiskLevel::Low;
    }
    RiskLevel::Medium
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use restack_foundation::profile::PYTHON_PROFILE;
    use restack_foundation::{ActionType, ImportStatement};

    use crate::duplicates;

    fn py(path: &str) -> FileRecord {
        FileRecord {
            is_python: true,
            ..FileRecord::plain(path, 100)
        }
    }

    fn propose_python(records: &[FileRecord]) -> Vec<Proposal> {
        let sets = duplicates::group(records, &PYTHON_PROFILE);
        propose(records, &sets, RepoType::PythonDominant)
    }

    /// Scenario: three root-level Python files, no duplicates.
    #[test]
    fn root_modules_move_to_canonical_directories() {
        let mut main = py("main.py");
        main.has_main_block = true;
        main.looks_executable = true;
        main.has_defs = true;
        main.imports.push(ImportStatement::absolute("os", 1));
        main.imports.push(ImportStatement::absolute("utils", 2));

        let mut utils = py("utils.py");
        utils.has_defs = true;
        utils.imports.push(ImportStatement::absolute("os", 1));
        utils.imports.push(ImportStatement::absolute("json", 2));

        let mut test_main = py("test_main.py");
        test_main.is_test = true;
        test_main.imports.push(ImportStatement::absolute("pytest", 1));

        let proposals = propose_python(&[main, utils, test_main]);

        assert!(proposals.iter().all(|p| p.action == ActionType::Move));
        assert_eq!(proposals.len(), 3);

        let by_source = |src: &str| {
            proposals
                .iter()
                .find(|p| p.source == src)
                .unwrap_or_else(|| panic!("no proposal for {src}"))
        };

        let main_p = by_source("main.py");
        assert_eq!(main_p.target.as_deref(), Some("scripts/main.py"));
        assert_eq!(main_p.risk, RiskLevel::Medium);

        let utils_p = by_source("utils.py");
        assert_eq!(utils_p.target.as_deref(), Some("src/utils.py"));
        assert_eq!(utils_p.risk, RiskLevel::Medium);

        let test_p = by_source("test_main.py");
        assert_eq!(test_p.target.as_deref(), Some("tests/test_main.py"));
        assert_eq!(test_p.risk, RiskLevel::Low);
    }

    /// Scenario: two requirements.txt at different paths.
    #[test]
    fn duplicate_manifests_get_one_high_flag_and_no_moves() {
        let records = vec![
            FileRecord::plain("api/requirements.txt", 20),
            FileRecord::plain("worker/requirements.txt", 25),
        ];
        let sets = duplicates::group(&records, &PYTHON_PROFILE);
        let proposals = propose(&records, &sets, RepoType::PythonDominant);

        let flags: Vec<_> = proposals
            .iter()
            .filter(|p| p.action == ActionType::Flag)
            .collect();
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].risk, RiskLevel::High);
        assert_eq!(
            flags[0].extra.get("member_01").map(String::as_str),
            Some("api/requirements.txt")
        );
        assert_eq!(
            flags[0].extra.get("member_02").map(String::as_str),
            Some("worker/requirements.txt")
        );
        // requirements.txt is root-anchored as well as duplicated: it must
        // never receive a MOVE.
        assert!(proposals.iter().all(|p| p.action != ActionType::Move));
    }

    #[test]
    fn duplicate_members_with_commas_stay_in_separate_keys() {
        let records = vec![
            FileRecord::plain("drafts, old/requirements.txt", 20),
            FileRecord::plain("worker/requirements.txt", 25),
        ];
        let sets = duplicates::group(&records, &PYTHON_PROFILE);
        let proposals = propose(&records, &sets, RepoType::PythonDominant);

        let flag = proposals
            .iter()
            .find(|p| p.action == ActionType::Flag)
            .unwrap();
        assert_eq!(flag.extra.get("total_count").map(String::as_str), Some("2"));
        assert_eq!(
            flag.extra.get("member_01").map(String::as_str),
            Some("drafts, old/requirements.txt")
        );
        assert_eq!(
            flag.extra.get("member_02").map(String::as_str),
            Some("worker/requirements.txt")
        );
    }

    #[test]
    fn non_python_repo_generates_zero_moves() {
        let records = vec![
            FileRecord::plain("lib/util.js", 10),
            FileRecord::plain("a/notes.txt", 10),
            FileRecord::plain("b/notes.txt", 10),
        ];
        let sets = duplicates::group(&records, &PYTHON_PROFILE);
        let proposals = propose(&records, &sets, RepoType::NonPython);
        assert!(proposals.iter().all(|p| p.action == ActionType::Flag));
        assert_eq!(proposals.len(), 1); // only the notes.txt duplicate set
    }

    #[test]
    fn mixed_repo_moves_python_files_only() {
        let mut module = py("helpers.py");
        module.has_defs = true;
        module.imports.push(ImportStatement::absolute("os", 1));
        let records = vec![module, FileRecord::plain("notes_misplaced.rst", 10)];
        let proposals = propose(&records, &[], RepoType::Mixed);
        assert_eq!(proposals.len(), 1);
        assert_eq!(proposals[0].source, "helpers.py");
        assert_eq!(proposals[0].target.as_deref(), Some("src/helpers.py"));
    }

    #[test]
    fn organized_tree_is_a_fixed_point() {
        let mut lib = py("src/lib.py");
        lib.has_defs = true;
        lib.imports.push(ImportStatement::absolute("os", 1));
        let mut test = py("tests/test_lib.py");
        test.is_test = true;
        let records = vec![
            lib,
            test,
            FileRecord::plain("docs/guide.md", 10),
            FileRecord::plain("pyproject.toml", 10),
        ];
        let proposals = propose_python(&records);
        assert!(
            proposals.iter().all(|p| p.action != ActionType::Move),
            "expected zero MOVE proposals, got {proposals:?}"
        );
    }

    #[test]
    fn critical_filenames_are_never_low_risk() {
        // .env classifies as configs and is on the critical list.
        let records = vec![FileRecord::plain("deploy/.env", 5)];
        let proposals = propose_python(&records);
        assert_eq!(proposals.len(), 1);
        assert_eq!(proposals[0].risk, RiskLevel::High);
    }

    #[test]
    fn duplicate_set_members_move_at_high_risk() {
        let records = vec![py("a/report_gen.py"), py("b/report_gen.py")];
        let mut records = records;
        for r in &mut records {
            r.has_defs = true;
            r.imports.push(ImportStatement::absolute("os", 1));
        }
        let sets = duplicates::group(&records, &PYTHON_PROFILE);
        let proposals = propose(&records, &sets, RepoType::PythonDominant);

        let moves: Vec<_> = proposals.iter().filter(|p| p.is_move()).collect();
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|p| p.risk == RiskLevel::High));
    }

    #[test]
    fn duplicates_precede_moves_in_output_order() {
        let mut records = vec![
            FileRecord::plain("x/data.csv", 10),
            FileRecord::plain("y/data.csv", 10),
        ];
        let mut module = py("api_layer.py");
        module.has_defs = true;
        module.imports.push(ImportStatement::absolute("os", 1));
        records.push(module);

        let sets = duplicates::group(&records, &PYTHON_PROFILE);
        let proposals = propose(&records, &sets, RepoType::PythonDominant);
        assert_eq!(proposals[0].action, ActionType::Flag);
        assert!(proposals[1..].iter().any(|p| p.is_move()));
    }

    #[test]
    fn unclassifiable_files_are_flagged_for_review() {
        let records = vec![py("mystery_blob.py")]; // no imports, no defs, no markers
        let proposals = propose_python(&records);
        assert_eq!(proposals.len(), 1);
        assert_eq!(proposals[0].action, ActionType::Flag);
        assert_eq!(proposals[0].category, Some(FileCategory::Trash));
    }

    #[test]
    fn proposal_output_is_deterministic() {
        let mut records = vec![py("b_mod.py"), py("a_mod.py")];
        for r in &mut records {
            r.has_defs = true;
            r.imports.push(ImportStatement::absolute("os", 1));
        }
        let first = propose_python(&records);
        let second = propose_python(&records);
        assert_eq!(first, second);
    }
}

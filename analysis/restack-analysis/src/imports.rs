//! Import-breakage analysis for MOVE proposals.
//!
//! Pure lookup-based static analysis over the already-parsed import lists:
//! no file is read here. The path-keyed indexes are built up front so the
//! per-import checks are O(1) map probes.

use std::collections::HashMap;

use restack_foundation::paths;
use restack_foundation::{
    FileRecord, ImportStatement, ImportWarning, ImportWarningKind, Proposal, RepoType,
};

/// Detect imports whose resolution would likely break after the proposed
/// moves. Advisory only: warnings never suppress or remove a proposal.
///
/// Returns an empty list for `NonPython` repositories, where import
/// semantics cannot be trusted.
pub fn analyze(
    proposals: &[Proposal],
    records: &[FileRecord],
    repo_type: RepoType,
) -> Vec<ImportWarning> {
    if repo_type == RepoType::NonPython {
        return Vec::new();
    }

    // source path -> target path for every MOVE proposal.
    let move_map: HashMap<&str, &str> = proposals
        .iter()
        .filter(|p| p.is_move())
        .filter_map(|p| Some((p.source.as_str(), p.target.as_deref()?)))
        .collect();

    if move_map.is_empty() {
        return Vec::new();
    }

    // normalized path -> record, for candidate resolution.
    let index: HashMap<&str, &FileRecord> =
        records.iter().map(|r| (r.path.as_str(), r)).collect();

    let mut warnings = Vec::new();

    for record in records {
        if !record.is_python || record.imports.is_empty() {
            continue;
        }
        let current_dir = record.parent_dir();
        let new_dir = move_map
            .get(record.path.as_str())
            .map(|target| paths::parent_dir(target))
            .unwrap_or(current_dir);

        for import in &record.imports {
            if let Some(warning) =
                check_import(record, import, current_dir, new_dir, &move_map, &index)
            {
                warnings.push(warning);
            }
        }
    }

    tracing::debug!(count = warnings.len(), "import warnings");
    warnings
}

fn check_import(
    record: &FileRecord,
    import: &ImportStatement,
    current_dir: &str,
    new_dir: &str,
    move_map: &HashMap<&str, &str>,
    index: &HashMap<&str, &FileRecord>,
) -> Option<ImportWarning> {
    let candidate = resolve_candidate(import, current_dir);

    // Cross-move takes precedence over the per-kind checks, including for
    // relative imports: when both ends move apart, any fix-up is needed on
    // both, which is a different signal than "your own position changed".
    if let Some(candidate_path) = candidate.as_deref() {
        if index.contains_key(candidate_path) {
            let candidate_new_dir = move_map
                .get(candidate_path)
                .map(|target| paths::parent_dir(target))
                .unwrap_or_else(|| paths::parent_dir(candidate_path));

            let importer_moves = new_dir != current_dir;
            let candidate_moves = move_map.contains_key(candidate_path);

            if importer_moves && candidate_moves && new_dir != candidate_new_dir {
                return Some(ImportWarning {
                    source_file: record.path.clone(),
                    line: import.line,
                    kind: ImportWarningKind::CrossMoveDependency,
                    affected_path: candidate_path.to_string(),
                    detail: format!(
                        "'{}' and its import '{}' both move, to different directories",
                        record.file_name(),
                        import.module
                    ),
                });
            }

            if !import.is_relative && new_dir != candidate_new_dir {
                // A same-directory absolute import is only resolvable
                // through path-based execution from that directory; either
                // end moving away severs the co-location.
                return Some(ImportWarning {
                    source_file: record.path.clone(),
                    line: import.line,
                    kind: ImportWarningKind::SameDirectoryImport,
                    affected_path: candidate_path.to_string(),
                    detail: format!(
                        "absolute import '{}' resolves to a file in the same directory",
                        import.module
                    ),
                });
            }
        }
    }

    // A relative import breaks whenever the importing file's package
    // position changes, whether or not the target resolves to a scanned
    // file. Best-effort affected path.
    if import.is_relative && new_dir != current_dir {
        let affected = candidate.unwrap_or_else(|| {
            let base = paths::pop_components(current_dir, import.level.saturating_sub(1));
            base.to_string()
        });
        return Some(ImportWarning {
            source_file: record.path.clone(),
            line: import.line,
            kind: ImportWarningKind::RelativeImport,
            affected_path: affected,
            detail: format!(
                "relative import (level {}) breaks when moving from {}/ to {}/",
                import.level,
                display_dir(current_dir),
                display_dir(new_dir)
            ),
        });
    }

    None
}

/// Resolve an import to a candidate repository file.
///
/// Relative imports pop `level - 1` directory components off the importer's
/// directory (level 1 = same directory, level 2 = parent, saturating at the
/// root) and then append the first module segment. Absolute imports are only
/// matched against the importer's own directory, the directory-relative
/// resolution this analysis is about.
fn resolve_candidate(import: &ImportStatement, current_dir: &str) -> Option<String> {
    let segment = import.root_segment();
    if segment.is_empty() {
        return None;
    }
    let base = if import.is_relative {
        paths::pop_components(current_dir, import.level.saturating_sub(1))
    } else {
        current_dir
    };
    Some(paths::join(base, &format!("{segment}.py")))
}

fn display_dir(dir: &str) -> &str {
    if dir.is_empty() {
        "."
    } else {
        dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use restack_foundation::{FileCategory, RiskLevel};

    fn py(path: &str, imports: Vec<ImportStatement>) -> FileRecord {
        FileRecord {
            is_python: true,
            imports,
            ..FileRecord::plain(path, 100)
        }
    }

    fn mv(source: &str, target: &str) -> Proposal {
        Proposal::move_file(source, target, "test", RiskLevel::Low, FileCategory::Src)
    }

    /// Scenario: `a.py` does `from .b import x`; both a.py and b.py move to
    /// different target directories.
    #[test]
    fn relative_import_with_both_ends_moving_is_cross_move() {
        let records = vec![
            py("a.py", vec![ImportStatement::relative("b", 1, 3)]),
            py("b.py", vec![]),
        ];
        let proposals = vec![mv("a.py", "scripts/a.py"), mv("b.py", "src/b.py")];

        let warnings = analyze(&proposals, &records, RepoType::PythonDominant);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, ImportWarningKind::CrossMoveDependency);
        assert_eq!(warnings[0].source_file, "a.py");
        assert_eq!(warnings[0].affected_path, "b.py");
        assert_eq!(warnings[0].line, 3);
    }

    #[test]
    fn relative_import_warns_when_importer_moves() {
        let records = vec![py(
            "pkg/tool.py",
            vec![ImportStatement::relative("helpers", 1, 2)],
        )];
        let proposals = vec![mv("pkg/tool.py", "src/tool.py")];

        let warnings = analyze(&proposals, &records, RepoType::PythonDominant);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, ImportWarningKind::RelativeImport);
        // Best-effort resolution against the current directory.
        assert_eq!(warnings[0].affected_path, "pkg/helpers.py");
    }

    #[test]
    fn same_directory_import_warns_when_importer_moves_away() {
        let records = vec![
            py("tool.py", vec![ImportStatement::absolute("helpers", 1)]),
            py("helpers.py", vec![]),
        ];
        let proposals = vec![mv("tool.py", "scripts/tool.py")];

        let warnings = analyze(&proposals, &records, RepoType::PythonDominant);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, ImportWarningKind::SameDirectoryImport);
        assert_eq!(warnings[0].affected_path, "helpers.py");
    }

    #[test]
    fn same_directory_import_warns_when_imported_file_moves_away() {
        // The importer stays put; the imported file leaves the directory.
        let records = vec![
            py("tool.py", vec![ImportStatement::absolute("helpers", 1)]),
            py("helpers.py", vec![]),
        ];
        let proposals = vec![mv("helpers.py", "src/helpers.py")];

        let warnings = analyze(&proposals, &records, RepoType::PythonDominant);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, ImportWarningKind::SameDirectoryImport);
        assert_eq!(warnings[0].source_file, "tool.py");
    }

    #[test]
    fn both_moving_to_same_directory_is_clean() {
        let records = vec![
            py("tool.py", vec![ImportStatement::absolute("helpers", 1)]),
            py("helpers.py", vec![]),
        ];
        let proposals = vec![mv("tool.py", "src/tool.py"), mv("helpers.py", "src/helpers.py")];

        let warnings = analyze(&proposals, &records, RepoType::PythonDominant);
        assert_eq!(warnings, vec![]);
    }

    #[test]
    fn stdlib_imports_produce_no_warnings() {
        let records = vec![py(
            "tool.py",
            vec![
                ImportStatement::absolute("os", 1),
                ImportStatement::absolute("json", 2),
            ],
        )];
        let proposals = vec![mv("tool.py", "scripts/tool.py")];

        let warnings = analyze(&proposals, &records, RepoType::PythonDominant);
        assert_eq!(warnings, vec![]);
    }

    #[test]
    fn non_python_repo_disables_analysis() {
        let records = vec![
            py("a.py", vec![ImportStatement::relative("b", 1, 1)]),
            py("b.py", vec![]),
        ];
        let proposals = vec![mv("a.py", "src/a.py")];
        assert_eq!(analyze(&proposals, &records, RepoType::NonPython), vec![]);
    }

    #[test]
    fn no_moves_means_no_warnings() {
        let records = vec![py("a.py", vec![ImportStatement::relative("b", 1, 1)])];
        assert_eq!(analyze(&[], &records, RepoType::PythonDominant), vec![]);
    }

    #[test]
    fn multi_level_relative_import_resolves_against_ancestor() {
        // from ..shared import util inside pkg/sub/mod.py resolves against
        // pkg/ (level 2 pops one component).
        let records = vec![
            py(
                "pkg/sub/mod.py",
                vec![ImportStatement::relative("shared", 2, 4)],
            ),
            py("pkg/shared.py", vec![]),
        ];
        let proposals = vec![mv("pkg/sub/mod.py", "src/mod.py"), mv("pkg/shared.py", "docs/shared.py")];

        let warnings = analyze(&proposals, &records, RepoType::PythonDominant);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, ImportWarningKind::CrossMoveDependency);
        assert_eq!(warnings[0].affected_path, "pkg/shared.py");
    }

    #[test]
    fn dotted_module_uses_first_segment() {
        let records = vec![
            py(
                "job.py",
                vec![ImportStatement::absolute("helpers.io", 5)],
            ),
            py("helpers.py", vec![]),
        ];
        let proposals = vec![mv("job.py", "scripts/job.py")];

        let warnings = analyze(&proposals, &records, RepoType::PythonDominant);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].affected_path, "helpers.py");
    }
}

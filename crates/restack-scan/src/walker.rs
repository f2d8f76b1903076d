//! Directory traversal producing the pipeline's `FileRecord` input.

use std::path::Path;

use restack_foundation::{FileRecord, RestackError, RestackResult};
use walkdir::WalkDir;

use crate::python;

/// Directory names excluded by containment: a directory whose name contains
/// one of these (case-insensitive) is skipped with its subtree. Containment
/// catches variants like `venv_new` or `my_venv`.
const IGNORE_DIRS: &[&str] = &[
    ".git",
    ".svn",
    ".hg",
    "__pycache__",
    ".pytest_cache",
    "venv",
    ".venv",
    "node_modules",
    "site-packages",
    ".eggs",
    ".egg-info",
    ".tox",
    ".coverage",
];

/// Build-output directories excluded by exact segment match. Exact match
/// only: `build` must not swallow a source directory named `build_tools`.
const ARTIFACT_DIRS: &[&str] = &[
    ".next",
    "out",
    "_next",
    "dist",
    "build",
    "coverage",
    ".nuxt",
    ".output",
    ".vercel",
    ".netlify",
    "env",
];

/// Binary and editor-artifact file suffixes.
const IGNORE_FILE_SUFFIXES: &[&str] = &[
    ".pyc", ".pyo", ".pyd", ".so", ".dll", ".dylib", ".swp", ".swo", "~",
];

/// Exact artifact file names.
const IGNORE_FILE_NAMES: &[&str] = &[".DS_Store", "Thumbs.db"];

fn is_ignored_dir(name: &str) -> bool {
    if ARTIFACT_DIRS.contains(&name) {
        return true;
    }
    let lower = name.to_ascii_lowercase();
    IGNORE_DIRS.iter().any(|ignored| lower.contains(ignored))
}

fn is_ignored_file(name: &str) -> bool {
    IGNORE_FILE_NAMES.contains(&name)
        || IGNORE_FILE_SUFFIXES
            .iter()
            .any(|suffix| name.ends_with(suffix))
}

/// Path relative to `root`, slash-normalized regardless of platform.
fn relative_slash(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<&str> = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join("/"))
}

/// Walk `root` and produce one [`FileRecord`] per surviving file, sorted
/// lexicographically by relative path. The traversal is read-only; repeated
/// scans of an unchanged tree return identical output.
pub fn scan(root: &Path) -> RestackResult<Vec<FileRecord>> {
    if !root.is_dir() {
        return Err(RestackError::InvalidRepoPath {
            path: root.display().to_string(),
        });
    }

    let mut records = Vec::new();

    let walk = WalkDir::new(root).into_iter().filter_entry(|entry| {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }
        let name = entry.file_name().to_str().unwrap_or("");
        !is_ignored_dir(name)
    });

    for entry in walk {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_str().unwrap_or("");
        if is_ignored_file(name) {
            continue;
        }
        let Some(relative) = relative_slash(root, entry.path()) else {
            tracing::debug!(path = %entry.path().display(), "skipping non-UTF-8 path");
            continue;
        };

        let size_bytes = entry.metadata().map(|m| m.len()).unwrap_or(0);
        let mut record = FileRecord::plain(relative, size_bytes);

        if name.ends_with(".py") {
            record.is_python = true;
            // Unreadable source degrades to a record with empty imports.
            let facts = match std::fs::read_to_string(entry.path()) {
                Ok(content) => python::inspect(&content),
                Err(err) => {
                    tracing::debug!(path = %record.path, error = %err, "failed to read python file");
                    python::PythonFacts::default()
                }
            };
            record.imports = facts.imports;
            record.has_main_block = facts.has_main_block;
            record.is_test = facts.is_test;
            record.has_defs = facts.has_defs;
        }

        let lower = name.to_ascii_lowercase();
        if lower.starts_with("test_") || lower.ends_with("_test.py") {
            record.is_test = true;
        }
        record.looks_executable = record.has_main_block
            || ["run_", "main_", "cli_"]
                .iter()
                .any(|prefix| lower.starts_with(prefix));

        records.push(record);
    }

    records.sort_by(|a, b| a.path.cmp(&b.path));
    tracing::info!(files = records.len(), root = %root.display(), "scan complete");
    Ok(records)
}

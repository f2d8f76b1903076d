//! Rule-based file classification.
//!
//! An explicit ordered list of `(name, predicate, category)` rules, evaluated
//! top to bottom with first match winning. Priority encodes intent:
//! safety-sensitive or narrow patterns (experiments, tests) are checked before
//! broad ones (source). The order is data, so it stays auditable.

use restack_foundation::paths;
use restack_foundation::{FileCategory, FileRecord};

/// Python test framework modules; an import of any of these marks a test
/// file. Matched against the first dotted segment of each import.
const TEST_FRAMEWORK_IMPORTS: &[&str] = &[
    "pytest",
    "unittest",
    "mock",
    "hypothesis",
    "nose",
    "doctest",
];

/// Well-known build/dependency manifest names (case-insensitive).
const CONFIG_FILENAMES: &[&str] = &[
    "setup.py",
    "setup.cfg",
    "pyproject.toml",
    "requirements.txt",
    "requirements-dev.txt",
    "pipfile",
    "poetry.lock",
    ".gitignore",
    ".dockerignore",
    "dockerfile",
    "docker-compose.yml",
    "docker-compose.yaml",
    ".env",
    ".env.example",
    "tox.ini",
    "pytest.ini",
    ".flake8",
    ".pylintrc",
    "mypy.ini",
    "tsconfig.json",
    "package.json",
];

const CONFIG_EXTENSIONS: &[&str] = &[".ini", ".cfg", ".conf", ".yaml", ".yml", ".toml"];

const DATA_EXTENSIONS: &[&str] = &[
    ".csv", ".tsv", ".json", ".xml", ".db", ".sqlite", ".sqlite3", ".pkl", ".parquet",
];

const SCRIPT_NAME_PREFIXES: &[&str] = &["run_", "main_", "cli_"];

const EXPERIMENT_NAME_PREFIXES: &[&str] = &["temp_", "tmp_", "demo_", "prototype_", "untitled"];

const EXPERIMENT_MARKERS: &[&str] = &["experiment", "playground", "scratch"];

type RulePredicate = fn(&FileRecord) -> bool;

/// The rule chain. First match wins; the fallback when nothing matches is
/// `Trash`, so classification is total and never raises.
const RULES: &[(&str, RulePredicate, FileCategory)] = &[
    ("experiments", is_experiment, FileCategory::Experiments),
    ("tests", is_test, FileCategory::Tests),
    ("configs", is_config, FileCategory::Configs),
    ("scripts", is_script, FileCategory::Scripts),
    ("src", is_source, FileCategory::Src),
    ("docs", is_doc, FileCategory::Docs),
    ("markdown", is_markdown, FileCategory::Markdown),
    ("data", is_data, FileCategory::Data),
];

/// Classify one record. Total and deterministic: same input, same category,
/// independent of traversal order and of every other record.
pub fn classify(record: &FileRecord) -> FileCategory {
    for (name, predicate, category) in RULES {
        if predicate(record) {
            tracing::trace!(path = %record.path, rule = name, "classified");
            return *category;
        }
    }
    FileCategory::Trash
}

fn is_experiment(record: &FileRecord) -> bool {
    let name = record.file_name().to_lowercase();
    if EXPERIMENT_NAME_PREFIXES.iter().any(|p| name.starts_with(p)) {
        return true;
    }
    if name.ends_with(".bak") {
        return true;
    }
    if EXPERIMENT_MARKERS.iter().any(|m| name.contains(m)) {
        return true;
    }
    paths::dir_components(&record.path).any(|part| {
        let part = part.to_lowercase();
        EXPERIMENT_MARKERS.iter().any(|m| part.contains(m))
            || part.contains("temp")
            || part.contains("tmp")
    })
}

fn is_test(record: &FileRecord) -> bool {
    let name = record.file_name().to_lowercase();
    if name.starts_with("test_") || name.ends_with("_test.py") {
        return true;
    }
    // Directory parts only; the filename convention is already covered above.
    if paths::dir_components(&record.path).any(|part| part.to_lowercase().contains("test")) {
        return true;
    }
    // Import/AST signals apply to Python files only.
    if record.is_python {
        if record.is_test {
            return true;
        }
        if record
            .imports
            .iter()
            .any(|imp| TEST_FRAMEWORK_IMPORTS.contains(&imp.root_segment()))
        {
            return true;
        }
    }
    false
}

fn is_config(record: &FileRecord) -> bool {
    let name = record.file_name().to_lowercase();
    if CONFIG_FILENAMES.iter().any(|c| *c == name) {
        return true;
    }
    if name == "config.py"
        || name.ends_with("_config.py")
        || name == "settings.py"
        || name.ends_with("_settings.py")
    {
        return true;
    }
    let ext = record.extension().to_lowercase();
    CONFIG_EXTENSIONS.iter().any(|e| *e == ext)
}

fn is_script(record: &FileRecord) -> bool {
    if record.has_main_block {
        return true;
    }
    let name = record.file_name().to_lowercase();
    SCRIPT_NAME_PREFIXES.iter().any(|p| name.starts_with(p))
}

fn is_source(record: &FileRecord) -> bool {
    if paths::dir_components(&record.path).any(|part| part == "src") {
        return true;
    }
    // Import-based signal is meaningless for non-Python files.
    record.is_python && !record.imports.is_empty() && record.has_defs
}

fn is_doc(record: &FileRecord) -> bool {
    let ext = record.extension().to_lowercase();
    let doc_ext = matches!(ext.as_str(), ".md" | ".rst" | ".txt");
    if !doc_ext {
        return false;
    }
    if paths::dir_components(&record.path).any(|part| {
        let part = part.to_lowercase();
        part == "docs" || part == "doc" || part.contains("documentation")
    }) {
        return true;
    }
    // .rst/.txt anywhere read as documentation; bare .md falls through to
    // the markdown rule.
    matches!(ext.as_str(), ".rst" | ".txt")
}

fn is_markdown(record: &FileRecord) -> bool {
    record.extension().eq_ignore_ascii_case(".md")
}

fn is_data(record: &FileRecord) -> bool {
    let ext = record.extension().to_lowercase();
    DATA_EXTENSIONS.iter().any(|e| *e == ext)
}

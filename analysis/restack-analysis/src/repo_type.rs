//! Repository type detection from aggregated per-file language signal.

use std::collections::HashMap;

use restack_foundation::paths;
use restack_foundation::{FileRecord, RepoType};

/// Root-level files that indicate a Python project.
const PYTHON_ROOT_FILES: &[&str] = &[
    "setup.py",
    "setup.cfg",
    "pyproject.toml",
    "requirements.txt",
    "Pipfile",
    "poetry.lock",
    "tox.ini",
    "pytest.ini",
];

/// Root-level files that indicate a frontend toolchain.
const FRONTEND_FILES: &[&str] = &[
    "package.json",
    "package-lock.json",
    "yarn.lock",
    "angular.json",
    "tsconfig.json",
    "webpack.config.js",
    "vite.config.js",
    "next.config.js",
];

const JAVA_FILES: &[&str] = &["pom.xml", "build.gradle", "gradlew"];
const RUBY_FILES: &[&str] = &["Gemfile", "Rakefile"];
const GO_FILES: &[&str] = &["go.mod", "go.sum"];
const DOTNET_EXTENSIONS: &[&str] = &[".csproj", ".sln", ".fsproj", ".vbproj"];

/// Classify the tree by host-language dominance.
///
/// An empty or ambiguous tree resolves to `NonPython`, the conservative
/// default that suppresses all MOVE generation downstream.
pub fn detect(records: &[FileRecord]) -> RepoType {
    let mut extension_counts: HashMap<String, usize> = HashMap::new();
    let mut root_files: Vec<&str> = Vec::new();

    for record in records {
        let ext = record.extension().to_lowercase();
        *extension_counts.entry(ext).or_default() += 1;
        if paths::first_component(&record.path).is_none() {
            root_files.push(record.file_name());
        }
    }

    let total = records.len().max(1);
    let py_count = extension_counts.get(".py").copied().unwrap_or(0);
    let py_percentage = py_count as f64 / total as f64 * 100.0;

    let python_score = python_score(&root_files, py_count);
    let non_python_score = non_python_score(&root_files, &extension_counts);

    tracing::debug!(
        py_percentage = format!("{py_percentage:.1}"),
        python_score,
        non_python_score,
        "repository type signal"
    );

    if python_score >= 3 && py_percentage >= 50.0 {
        RepoType::PythonDominant
    } else if non_python_score >= 2 && py_percentage < 20.0 {
        RepoType::NonPython
    } else if py_percentage >= 30.0 {
        RepoType::Mixed
    } else {
        RepoType::NonPython
    }
}

fn python_score(root_files: &[&str], py_count: usize) -> u32 {
    let mut score = 0;
    score += 2 * root_files
        .iter()
        .filter(|name| PYTHON_ROOT_FILES.contains(*name))
        .count() as u32;
    score += match py_count {
        0 => 0,
        1..=5 => 1,
        6..=10 => 2,
        _ => 3,
    };
    score
}

fn non_python_score(root_files: &[&str], extension_counts: &HashMap<String, usize>) -> u32 {
    let mut score = 0;
    let has_any = |set: &[&str]| root_files.iter().any(|name| set.contains(name));

    if has_any(FRONTEND_FILES) {
        score += 3;
    }
    if has_any(JAVA_FILES) {
        score += 3;
    }
    if has_any(GO_FILES) {
        score += 3;
    }
    if has_any(RUBY_FILES) {
        score += 3;
    }
    if DOTNET_EXTENSIONS
        .iter()
        .any(|ext| extension_counts.contains_key(*ext))
    {
        score += 3;
    }

    let ts_js: usize = [".ts", ".js", ".tsx", ".jsx"]
        .iter()
        .filter_map(|ext| extension_counts.get(*ext))
        .sum();
    if ts_js > 20 {
        score += 2;
    } else if ts_js > 10 {
        score += 1;
    }

    score
}

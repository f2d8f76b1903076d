//! Ecosystem profiles: static per-ecosystem policy threaded explicitly
//! through the pipeline.
//!
//! Profiles are hardcoded and selected automatically from the detected
//! repository type; there is no plugin system and no configuration file.
//! Passing the profile as a value (rather than holding it as global state)
//! keeps two concurrent analyses with different profiles independent.

use crate::repo_type::RepoType;

/// Structural files that never participate in duplicate detection,
/// regardless of profile: their whole point is to appear in many
/// directories.
pub const DUPLICATE_EXEMPT_FILES: &[&str] = &["__init__.py", "__main__.py", "conftest.py"];

/// Filenames whose relocation or duplication is always treated as
/// high-risk: environment files, dependency manifests, container/build
/// manifests. Matched case-insensitively against the basename.
pub const CRITICAL_FILENAMES: &[&str] = &[
    "requirements.txt",
    "requirements-dev.txt",
    ".env",
    "dockerfile",
    "docker-compose.yml",
    "docker-compose.yaml",
    "package.json",
    "package-lock.json",
    "yarn.lock",
    "pipfile",
    "pipfile.lock",
    "setup.py",
    "pyproject.toml",
];

/// Files that belong at the repository root and never receive MOVE
/// proposals.
pub const ROOT_ANCHORED_FILES: &[&str] = &[
    "setup.py",
    "setup.cfg",
    "pyproject.toml",
    "requirements.txt",
    ".gitignore",
    "readme.md",
];

/// Per-ecosystem behavior knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcosystemProfile {
    pub name: &'static str,
    /// Basename substrings whose duplicates are expected in this ecosystem
    /// (e.g. `index.html` in multi-page frontend sites) and therefore
    /// suppressed instead of flagged.
    pub ignored_duplicate_patterns: &'static [&'static str],
}

pub const PYTHON_PROFILE: EcosystemProfile = EcosystemProfile {
    name: "python",
    ignored_duplicate_patterns: &[],
};

pub const FRONTEND_PROFILE: EcosystemProfile = EcosystemProfile {
    name: "frontend",
    ignored_duplicate_patterns: &[
        "index.html",
        "index.tsx",
        "index.ts",
        "index.js",
        "page.tsx",
        "layout.tsx",
        "_app.tsx",
        "_document.tsx",
    ],
};

impl EcosystemProfile {
    /// Automatic profile selection: Python repos get no duplicate
    /// suppression, everything else is assumed frontend-flavored.
    pub fn for_repo_type(repo_type: RepoType) -> &'static EcosystemProfile {
        match repo_type {
            RepoType::PythonDominant => &PYTHON_PROFILE,
            RepoType::NonPython | RepoType::Mixed => &FRONTEND_PROFILE,
        }
    }

    /// True when a duplicate of `file_name` is an expected pattern in this
    /// ecosystem and should not be flagged.
    pub fn suppresses_duplicate(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        self.ignored_duplicate_patterns
            .iter()
            .any(|pattern| lower.contains(pattern))
    }
}

/// True when the basename (case-insensitive) is on the critical list.
pub fn is_critical_filename(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    CRITICAL_FILENAMES.iter().any(|c| *c == lower)
}

/// True when the basename belongs at the repository root.
pub fn is_root_anchored(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    ROOT_ANCHORED_FILES.iter().any(|c| *c == lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_matching_is_case_insensitive() {
        assert!(is_critical_filename("Dockerfile"));
        assert!(is_critical_filename("requirements.txt"));
        assert!(is_critical_filename(".env"));
        assert!(!is_critical_filename("main.py"));
    }

    #[test]
    fn frontend_profile_suppresses_index_variants() {
        assert!(FRONTEND_PROFILE.suppresses_duplicate("index.html"));
        assert!(FRONTEND_PROFILE.suppresses_duplicate("Index.HTML"));
        assert!(!FRONTEND_PROFILE.suppresses_duplicate("utils.py"));
        assert!(!PYTHON_PROFILE.suppresses_duplicate("index.html"));
    }

    #[test]
    fn profile_selection_follows_repo_type() {
        assert_eq!(
            EcosystemProfile::for_repo_type(RepoType::PythonDominant).name,
            "python"
        );
        assert_eq!(
            EcosystemProfile::for_repo_type(RepoType::Mixed).name,
            "frontend"
        );
    }
}

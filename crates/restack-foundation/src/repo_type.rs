//! Repository type classification.

use serde::{Deserialize, Serialize};

/// Classification of a tree by host-language dominance. Gates which proposal
/// kinds downstream stages may generate: MOVE proposals require Python
/// import semantics to be meaningful, so `NonPython` suppresses them
/// entirely and `Mixed` restricts them to Python files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepoType {
    PythonDominant,
    NonPython,
    Mixed,
}

impl RepoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepoType::PythonDominant => "python_dominant",
            RepoType::NonPython => "non_python",
            RepoType::Mixed => "mixed",
        }
    }
}

impl std::fmt::Display for RepoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

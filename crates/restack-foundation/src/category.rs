//! The closed set of structural roles a file can be classified into.

use serde::{Deserialize, Serialize};

/// Exactly one category per file; classification is total and falls back to
/// `Trash` (flagged for manual review) when no rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    Src,
    Tests,
    Configs,
    Scripts,
    Docs,
    Markdown,
    Data,
    Experiments,
    Trash,
}

impl FileCategory {
    pub const ALL: [FileCategory; 9] = [
        FileCategory::Src,
        FileCategory::Tests,
        FileCategory::Configs,
        FileCategory::Scripts,
        FileCategory::Docs,
        FileCategory::Markdown,
        FileCategory::Data,
        FileCategory::Experiments,
        FileCategory::Trash,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Src => "src",
            FileCategory::Tests => "tests",
            FileCategory::Configs => "configs",
            FileCategory::Scripts => "scripts",
            FileCategory::Docs => "docs",
            FileCategory::Markdown => "markdown",
            FileCategory::Data => "data",
            FileCategory::Experiments => "experiments",
            FileCategory::Trash => "trash",
        }
    }

    /// Canonical target directory for MOVE proposals, `None` when the
    /// category never generates moves.
    pub fn canonical_dir(&self) -> Option<&'static str> {
        match self {
            FileCategory::Src => Some("src"),
            FileCategory::Tests => Some("tests"),
            FileCategory::Configs => Some("configs"),
            FileCategory::Scripts => Some("scripts"),
            FileCategory::Docs | FileCategory::Markdown => Some("docs"),
            FileCategory::Data => Some("data"),
            FileCategory::Experiments => Some("experiments"),
            FileCategory::Trash => None,
        }
    }

    /// Top-level directories that already count as a correct placement.
    /// A file whose first path component is in this set yields no MOVE
    /// proposal, which is what makes re-runs on an organized tree a fixed
    /// point.
    pub fn accepted_roots(&self) -> &'static [&'static str] {
        match self {
            FileCategory::Src => &["src"],
            FileCategory::Tests => &["tests", "test"],
            FileCategory::Configs => &["configs", "config"],
            FileCategory::Scripts => &["scripts"],
            FileCategory::Docs => &["docs"],
            FileCategory::Markdown => &["docs", "markdown"],
            FileCategory::Data => &["data"],
            FileCategory::Experiments => &["experiments", "playground"],
            FileCategory::Trash => &[],
        }
    }
}

impl std::fmt::Display for FileCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

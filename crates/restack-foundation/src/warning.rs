//! Advisory import-breakage warnings.

use serde::{Deserialize, Serialize};

/// Why a proposed move is expected to break an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportWarningKind {
    /// A relative import in a file whose package position changes.
    RelativeImport,
    /// An absolute import resolving to a file in the importer's own
    /// directory, where one end of the pair moves away.
    SameDirectoryImport,
    /// Importer and imported file both move, to different directories.
    CrossMoveDependency,
}

impl ImportWarningKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportWarningKind::RelativeImport => "relative-import",
            ImportWarningKind::SameDirectoryImport => "same-directory-import",
            ImportWarningKind::CrossMoveDependency => "cross-move-dependency",
        }
    }
}

/// One advisory signal that a proposed move may break a source-level import.
/// Warnings never suppress the proposal they annotate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportWarning {
    /// File containing the import statement.
    pub source_file: String,
    pub line: u32,
    pub kind: ImportWarningKind,
    /// The file whose move provoked the warning (best-effort resolution for
    /// relative imports that do not resolve to a scanned file).
    pub affected_path: String,
    pub detail: String,
}

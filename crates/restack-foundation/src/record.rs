//! File metadata as produced by the scanner.

use serde::{Deserialize, Serialize};

use crate::paths;

/// A single import statement found in a source file.
///
/// `level` counts the leading dots of a relative import (`from ..pkg import x`
/// has level 2); absolute imports have level 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStatement {
    pub module: String,
    pub line: u32,
    pub is_relative: bool,
    pub level: u32,
}

impl ImportStatement {
    /// An absolute `import module` / `from module import ...` statement.
    pub fn absolute(module: impl Into<String>, line: u32) -> Self {
        Self {
            module: module.into(),
            line,
            is_relative: false,
            level: 0,
        }
    }

    /// A relative `from .module import ...` statement with the given dot count.
    pub fn relative(module: impl Into<String>, level: u32, line: u32) -> Self {
        Self {
            module: module.into(),
            line,
            is_relative: true,
            level,
        }
    }

    /// First dotted segment of the module path (`os.path` -> `os`).
    pub fn root_segment(&self) -> &str {
        self.module.split('.').next().unwrap_or("")
    }
}

/// Metadata for one scanned file. Immutable once produced; the whole
/// pipeline is a pure function over a `Vec<FileRecord>`.
///
/// `path` is relative to the scanned root, slash-normalized, and unique
/// within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    pub size_bytes: u64,
    pub imports: Vec<ImportStatement>,
    /// Contains test functions or test classes.
    pub is_test: bool,
    /// Contains an `if __name__ == "__main__"` block.
    pub has_main_block: bool,
    /// Entry-point naming convention (`run_`, `main_`, `cli_`) or main block.
    pub looks_executable: bool,
    /// Contains function or class definitions.
    pub has_defs: bool,
    pub is_python: bool,
}

impl FileRecord {
    /// A minimal non-Python record; used by the scanner for every file the
    /// language introspection does not apply to.
    pub fn plain(path: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            path: path.into(),
            size_bytes,
            imports: Vec::new(),
            is_test: false,
            has_main_block: false,
            looks_executable: false,
            has_defs: false,
            is_python: false,
        }
    }

    pub fn file_name(&self) -> &str {
        paths::file_name(&self.path)
    }

    pub fn parent_dir(&self) -> &str {
        paths::parent_dir(&self.path)
    }

    pub fn extension(&self) -> &str {
        paths::extension(&self.path)
    }
}

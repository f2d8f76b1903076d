//! Regex patterns and line scanning for Python source metadata.

use once_cell::sync::Lazy;
use regex::Regex;
use restack_foundation::ImportStatement;

/// Matches `import module` and `import module as alias`.
static IMPORT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*import\s+([\w.]+)(?:\s+as\s+\w+)?")
        .expect("Python import regex pattern should be valid")
});

/// Matches `from [dots]module import ...`; group 1 captures the leading dots
/// of a relative import, group 2 the (possibly empty) module path.
static FROM_IMPORT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*from\s+(\.*)([\w.]*)\s+import\s+")
        .expect("Python from-import regex pattern should be valid")
});

/// Matches the `if __name__ == "__main__"` entry-point guard.
static MAIN_BLOCK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^if\s+__name__\s*==\s*["']__main__["']"#)
        .expect("Python main-block regex pattern should be valid")
});

/// Matches function definitions at any indentation.
static FUNCTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ \t]*(?:async\s+)?def\s+([a-zA-Z_][a-zA-Z0-9_]*)\s*\(")
        .expect("Python function regex pattern should be valid")
});

/// Matches class definitions at any indentation.
static CLASS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ \t]*class\s+([a-zA-Z_][a-zA-Z0-9_]*)")
        .expect("Python class regex pattern should be valid")
});

/// Structural facts extracted from one Python source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PythonFacts {
    pub imports: Vec<ImportStatement>,
    pub has_main_block: bool,
    pub is_test: bool,
    pub has_defs: bool,
}

/// Scan Python source line by line.
///
/// A line scan rather than a full parse: imports, the entry-point guard and
/// def/class headers all start a line, which is enough here and keeps broken
/// or partially-written files from aborting the scan.
pub fn inspect(content: &str) -> PythonFacts {
    let mut facts = PythonFacts::default();

    for (index, line) in content.lines().enumerate() {
        let line_no = (index + 1) as u32;

        if let Some(caps) = IMPORT_PATTERN.captures(line) {
            facts.imports.push(ImportStatement::absolute(&caps[1], line_no));
            continue;
        }

        if let Some(caps) = FROM_IMPORT_PATTERN.captures(line) {
            let level = caps[1].len() as u32;
            let module = caps[2].to_string();
            if level > 0 {
                facts.imports.push(ImportStatement::relative(module, level, line_no));
            } else if !module.is_empty() {
                facts.imports.push(ImportStatement::absolute(module, line_no));
            }
            continue;
        }

        if MAIN_BLOCK_PATTERN.is_match(line) {
            facts.has_main_block = true;
            continue;
        }

        if let Some(caps) = FUNCTION_PATTERN.captures(line) {
            facts.has_defs = true;
            if caps[1].starts_with("test_") {
                facts.is_test = true;
            }
            continue;
        }

        if let Some(caps) = CLASS_PATTERN.captures(line) {
            facts.has_defs = true;
            if caps[1].starts_with("Test") {
                facts.is_test = true;
            }
        }
    }

    facts
}

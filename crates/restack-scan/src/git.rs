//! Advisory git state probe.
//!
//! Used only to warn when a proposal touches a file with uncommitted
//! changes. Any failure (no git binary, not a repository, command error)
//! degrades to "no git info" rather than failing the scan.

use std::path::Path;
use std::process::Command;

/// Version-control state of a scanned tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitInfo {
    pub is_repo: bool,
    /// Slash-normalized relative paths with uncommitted changes.
    pub dirty_files: Vec<String>,
}

impl GitInfo {
    pub fn is_dirty(&self, path: &str) -> bool {
        self.dirty_files.iter().any(|dirty| dirty == path)
    }
}

/// Probe `root` for a git repository and its uncommitted files.
pub fn probe(root: &Path) -> GitInfo {
    if !root.join(".git").exists() {
        return GitInfo::default();
    }

    let output = match Command::new("git")
        .arg("-C")
        .arg(root)
        .args(["status", "--porcelain"])
        .output()
    {
        Ok(output) if output.status.success() => output,
        Ok(output) => {
            tracing::debug!(status = %output.status, "git status failed");
            return GitInfo {
                is_repo: true,
                dirty_files: Vec::new(),
            };
        }
        Err(err) => {
            tracing::debug!(error = %err, "could not invoke git");
            return GitInfo {
                is_repo: true,
                dirty_files: Vec::new(),
            };
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout);
    let dirty_files = stdout
        .lines()
        .filter_map(parse_status_line)
        .collect();

    GitInfo {
        is_repo: true,
        dirty_files,
    }
}

/// Parse one `git status --porcelain` line into the affected path.
/// Renames (`R  old -> new`) report the new path.
fn parse_status_line(line: &str) -> Option<String> {
    if line.len() < 4 {
        return None;
    }
    let path = &line[3..];
    let path = match path.split_once(" -> ") {
        Some((_, renamed)) => renamed,
        None => path,
    };
    let path = path.trim().trim_matches('"');
    if path.is_empty() {
        None
    } else {
        Some(path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn non_repo_probe_is_empty() {
        let dir = TempDir::new().unwrap();
        assert_eq!(probe(dir.path()), GitInfo::default());
    }

    #[test]
    fn parses_modified_and_untracked_lines() {
        assert_eq!(parse_status_line(" M src/main.py"), Some("src/main.py".to_string()));
        assert_eq!(parse_status_line("?? notes.txt"), Some("notes.txt".to_string()));
        assert_eq!(parse_status_line(""), None);
    }

    #[test]
    fn rename_reports_new_path() {
        assert_eq!(
            parse_status_line("R  old.py -> new.py"),
            Some("new.py".to_string())
        );
    }

    #[test]
    fn dirty_lookup_matches_exact_path() {
        let info = GitInfo {
            is_repo: true,
            dirty_files: vec!["src/main.py".to_string()],
        };
        assert!(info.is_dirty("src/main.py"));
        assert!(!info.is_dirty("main.py"));
    }
}

//! Append-only execution history.
//!
//! Every executed or rolled-back operation lands in `.restack-history.json`
//! at the repository root. The file is the audit trail and the input to
//! rollback; entries are only ever appended.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use restack_foundation::{RestackError, RestackResult, RiskLevel};
use serde::{Deserialize, Serialize};

pub const HISTORY_FILE: &str = ".restack-history.json";

/// One executed (or attempted) operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    /// RFC 3339 timestamp of the attempt.
    pub timestamp: String,
    /// "MOVE" or "ROLLBACK".
    pub action: String,
    pub source: String,
    pub target: String,
    pub success: bool,
    pub skipped: bool,
    pub message: String,
    pub risk: RiskLevel,
}

impl HistoryEntry {
    pub fn new(
        action: &str,
        source: impl Into<String>,
        target: impl Into<String>,
        success: bool,
        message: impl Into<String>,
        risk: RiskLevel,
    ) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            action: action.to_string(),
            source: source.into(),
            target: target.into(),
            success,
            skipped: false,
            message: message.into(),
            risk,
        }
    }
}

fn history_path(repo_path: &Path) -> PathBuf {
    repo_path.join(HISTORY_FILE)
}

/// Load the history log; a missing file is an empty history.
pub fn load(repo_path: &Path) -> RestackResult<Vec<HistoryEntry>> {
    let path = history_path(repo_path);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(&path)?;
    serde_json::from_str(&content).map_err(|err| {
        RestackError::history(format!("corrupt history file {}: {err}", path.display()))
    })
}

/// Append entries to the history log, creating it on first use.
pub fn append(repo_path: &Path, entries: &[HistoryEntry]) -> RestackResult<()> {
    if entries.is_empty() {
        return Ok(());
    }
    let mut history = load(repo_path)?;
    history.extend_from_slice(entries);
    let serialized = serde_json::to_string_pretty(&history)?;
    fs::write(history_path(repo_path), serialized)?;
    tracing::info!(
        appended = entries.len(),
        total = history.len(),
        "history updated"
    );
    Ok(())
}

/// Successful MOVE entries, oldest first. Rollback candidates.
pub fn successful_moves(history: &[HistoryEntry]) -> Vec<&HistoryEntry> {
    history
        .iter()
        .filter(|entry| entry.action == "MOVE" && entry.success && !entry.skipped)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn entry(action: &str, success: bool) -> HistoryEntry {
        HistoryEntry::new(action, "a.py", "src/a.py", success, "msg", RiskLevel::Low)
    }

    #[test]
    fn missing_history_is_empty() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load(dir.path()).unwrap(), Vec::new());
    }

    #[test]
    fn append_accumulates_across_calls() {
        let dir = TempDir::new().unwrap();
        append(dir.path(), &[entry("MOVE", true)]).unwrap();
        append(dir.path(), &[entry("ROLLBACK", true)]).unwrap();

        let history = load(dir.path()).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].action, "MOVE");
        assert_eq!(history[1].action, "ROLLBACK");
    }

    #[test]
    fn corrupt_history_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(HISTORY_FILE), "not json").unwrap();
        assert!(load(dir.path()).is_err());
    }

    #[test]
    fn successful_moves_filters_failures_and_rollbacks() {
        let history = vec![
            entry("MOVE", true),
            entry("MOVE", false),
            entry("ROLLBACK", true),
            entry("MOVE", true),
        ];
        let moves = successful_moves(&history);
        assert_eq!(moves.len(), 2);
    }
}

//! Applies MOVE proposals and rolls them back.
//!
//! Dry-run by default; real filesystem changes only with `--execute`. Only
//! MOVE proposals are replayed, FLAGs are advisory and recorded as skipped.

use std::fs;
use std::path::{Path, PathBuf};

use restack_foundation::{ActionType, Proposal, RestackResult, RiskLevel};

use crate::history::{self, HistoryEntry};

pub struct Executor {
    repo_path: PathBuf,
    dry_run: bool,
}

impl Executor {
    pub fn new(repo_path: &Path, dry_run: bool) -> Self {
        Self {
            repo_path: repo_path.to_path_buf(),
            dry_run,
        }
    }

    /// Apply every MOVE proposal in order. Each attempt produces a history
    /// entry; with `--execute` the entries are persisted afterwards.
    pub fn apply(&self, proposals: &[Proposal]) -> RestackResult<Vec<HistoryEntry>> {
        let mut entries = Vec::new();

        for proposal in proposals {
            if proposal.action != ActionType::Move {
                let mut entry = HistoryEntry::new(
                    &proposal.action.as_str().to_uppercase(),
                    &proposal.source,
                    proposal.target.clone().unwrap_or_default(),
                    false,
                    format!("unsupported action: {}", proposal.action.as_str()),
                    proposal.risk,
                );
                entry.skipped = true;
                entries.push(entry);
                continue;
            }
            let Some(target) = proposal.target.as_deref() else {
                entries.push(HistoryEntry::new(
                    "MOVE",
                    &proposal.source,
                    "",
                    false,
                    "move proposal has no target",
                    proposal.risk,
                ));
                continue;
            };
            entries.push(self.attempt_move("MOVE", &proposal.source, target, proposal.risk));
        }

        if !self.dry_run {
            history::append(&self.repo_path, &entries)?;
        }
        Ok(entries)
    }

    /// Undo the last `count` successful MOVEs, most recent first. Validation
    /// failure aborts the remaining rollbacks; everything attempted so far
    /// is still recorded.
    pub fn rollback(&self, count: usize) -> RestackResult<Vec<HistoryEntry>> {
        let log = history::load(&self.repo_path)?;
        let moves = history::successful_moves(&log);
        if moves.is_empty() {
            tracing::info!("no successful moves in history, nothing to roll back");
            return Ok(Vec::new());
        }

        let take = count.min(moves.len());
        let mut entries = Vec::new();

        // LIFO: undo the most recent move first.
        for original in moves.iter().rev().take(take) {
            let entry =
                self.attempt_move("ROLLBACK", &original.target, &original.source, RiskLevel::High);
            let failed = !entry.success;
            entries.push(entry);
            if failed {
                tracing::error!("aborting rollback after validation failure");
                break;
            }
        }

        if !self.dry_run {
            history::append(&self.repo_path, &entries)?;
        }
        Ok(entries)
    }

    fn attempt_move(
        &self,
        action: &str,
        source: &str,
        target: &str,
        risk: RiskLevel,
    ) -> HistoryEntry {
        if let Some(error) = self.validate_move(source, target) {
            tracing::warn!(source, target, error, "validation failed");
            return HistoryEntry::new(
                action,
                source,
                target,
                false,
                format!("validation failed: {error}"),
                risk,
            );
        }

        if self.dry_run {
            let message = format!("[DRY-RUN] would move {source} -> {target}");
            tracing::info!("{message}");
            return HistoryEntry::new(action, source, target, true, message, risk);
        }

        match self.execute_move(source, target) {
            Ok(()) => {
                let message = format!("moved {source} -> {target}");
                tracing::info!("{message}");
                HistoryEntry::new(action, source, target, true, message, risk)
            }
            Err(err) => {
                let message = format!("move failed: {err}");
                tracing::error!(source, target, "{message}");
                HistoryEntry::new(action, source, target, false, message, risk)
            }
        }
    }

    /// Pre-flight checks for one move. Returns the failure reason, if any.
    fn validate_move(&self, source: &str, target: &str) -> Option<String> {
        let source_full = self.repo_path.join(source);
        let target_full = self.repo_path.join(target);

        if !source_full.exists() {
            return Some(format!("source does not exist: {source}"));
        }
        if !source_full.is_file() {
            return Some(format!("source is not a file: {source}"));
        }
        if target_full.exists() {
            return Some(format!("target already exists: {target}"));
        }
        if let Some(parent) = target_full.parent() {
            if parent.exists() && !parent.is_dir() {
                return Some(format!(
                    "target parent exists but is not a directory: {target}"
                ));
            }
        }
        None
    }

    fn execute_move(&self, source: &str, target: &str) -> std::io::Result<()> {
        let source_full = self.repo_path.join(source);
        let target_full = self.repo_path.join(target);
        if let Some(parent) = target_full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::rename(source_full, target_full)
    }
}

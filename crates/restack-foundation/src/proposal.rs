//! Proposals: suggested structural changes, never auto-applied.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::FileCategory;

/// The kind of change a proposal suggests. `Delete` is reserved for a
/// future cleanup pass; the reasoner never produces it today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Move,
    Flag,
    Delete,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Move => "move",
            ActionType::Flag => "flag",
            ActionType::Delete => "delete",
        }
    }
}

/// Risk attached to a proposal. Ordering is meaningful: `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A group of >= 2 files sharing a normalized basename across the tree.
/// Member paths keep the input scan order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateSet {
    pub normalized_name: String,
    pub paths: Vec<String>,
}

/// One suggested structural change with risk and justification.
///
/// The sequence emitted by the reasoner preserves generation order
/// (duplicate flags first, then category-grouped moves); renderers group for
/// display but never reorder the underlying list, which keeps output
/// diffable across runs with identical input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub action: ActionType,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub reason: String,
    pub risk: RiskLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<FileCategory>,
    /// Diagnostic context; a BTreeMap so serialization order is stable.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl Proposal {
    pub fn move_file(
        source: impl Into<String>,
        target: impl Into<String>,
        reason: impl Into<String>,
        risk: RiskLevel,
        category: FileCategory,
    ) -> Self {
        Self {
            action: ActionType::Move,
            source: source.into(),
            target: Some(target.into()),
            reason: reason.into(),
            risk,
            category: Some(category),
            extra: BTreeMap::new(),
        }
    }

    pub fn flag(source: impl Into<String>, reason: impl Into<String>, risk: RiskLevel) -> Self {
        Self {
            action: ActionType::Flag,
            source: source.into(),
            target: None,
            reason: reason.into(),
            risk,
            category: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_category(mut self, category: FileCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn is_move(&self) -> bool {
        self.action == ActionType::Move
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn risk_levels_are_ordered() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
    }

    #[test]
    fn move_proposal_round_trips_through_json() {
        let p = Proposal::move_file(
            "utils.py",
            "src/utils.py",
            "Python module with imports",
            RiskLevel::Medium,
            FileCategory::Src,
        )
        .with_extra("current_location", "root");

        let json = serde_json::to_string(&p).unwrap();
        let back: Proposal = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn flag_omits_target_in_json() {
        let p = Proposal::flag("a/x.py", "needs review", RiskLevel::Low);
        let json = serde_json::to_string(&p).unwrap();
        assert!(!json.contains("\"target\""));
    }
}

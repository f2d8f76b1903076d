//! The explainable confidence verdict.

use serde::{Deserialize, Serialize};

/// Whether the run is a simulation or will touch the filesystem. Execute
/// mode costs one confidence level as an added-caution margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    DryRun,
    Execute,
}

/// Overall confidence that the proposed batch is safe to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    /// Ordering: `Low < Medium < High`, so capping is `min`.
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "MEDIUM")]
    Medium,
    #[serde(rename = "HIGH")]
    High,
}

impl ConfidenceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "HIGH",
            ConfidenceLevel::Medium => "MEDIUM",
            ConfidenceLevel::Low => "LOW",
        }
    }

    /// One level down, saturating at `Low`.
    pub fn downgraded(&self) -> ConfidenceLevel {
        match self {
            ConfidenceLevel::High => ConfidenceLevel::Medium,
            ConfidenceLevel::Medium | ConfidenceLevel::Low => ConfidenceLevel::Low,
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a single factor did to the verdict. `None` records a positive
/// observation that fired no cap; it is kept so the factor list reads as a
/// complete account of the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Contribution {
    None,
    CapMedium,
    CapLow,
    DowngradeOneLevel,
}

/// One named factor and its contribution to the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factor {
    pub name: String,
    pub contribution: Contribution,
}

impl Factor {
    pub fn new(name: impl Into<String>, contribution: Contribution) -> Self {
        Self {
            name: name.into(),
            contribution,
        }
    }
}

/// The verdict plus the ordered factor list it was computed from. There are
/// no hidden adjustments: [`ConfidenceScore::verdict_from_factors`] replays
/// the factor list and must reproduce `verdict` exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceScore {
    pub verdict: ConfidenceLevel,
    pub factors: Vec<Factor>,
}

impl ConfidenceScore {
    /// Recompute a verdict from a factor list alone, applying contributions
    /// in order: caps are `min`, the downgrade steps one level down from
    /// whatever the caps left.
    pub fn verdict_from_factors(factors: &[Factor]) -> ConfidenceLevel {
        let mut verdict = ConfidenceLevel::High;
        for factor in factors {
            verdict = match factor.contribution {
                Contribution::None => verdict,
                Contribution::CapMedium => verdict.min(ConfidenceLevel::Medium),
                Contribution::CapLow => verdict.min(ConfidenceLevel::Low),
                Contribution::DowngradeOneLevel => verdict.downgraded(),
            };
        }
        verdict
    }
}

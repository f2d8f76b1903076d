//! Text and JSON rendering of an analysis report.

use std::collections::BTreeMap;

use restack_analysis::AnalysisReport;
use restack_foundation::{
    ActionType, ConfidenceLevel, Contribution, RestackResult, RiskLevel,
};

const RULE: &str = "============================================================";

/// Render the full report as human-readable text: proposals grouped by
/// category, flags, import warnings, a before/after tree preview, summary
/// counts, and the confidence block with its factor list.
pub fn render_text(report: &AnalysisReport) -> String {
    let mut out = Vec::new();

    out.push(RULE.to_string());
    out.push("REPOSITORY STRUCTURE PROPOSALS".to_string());
    out.push(RULE.to_string());
    out.push(format!("Repository type: {}", report.repo_type));
    out.push(format!("Ecosystem profile: {}", report.profile));
    out.push(String::new());

    render_moves(report, &mut out);
    render_flags(report, &mut out);
    render_warnings(report, &mut out);
    if let Some(preview) = crate::treediff::render_preview(&report.proposals) {
        out.push(preview);
        out.push(String::new());
    }
    render_summary(report, &mut out);
    render_confidence(report, &mut out);

    out.join("\n")
}

fn render_moves(report: &AnalysisReport, out: &mut Vec<String>) {
    let mut by_category: BTreeMap<String, Vec<&restack_foundation::Proposal>> = BTreeMap::new();
    for proposal in report.proposals.iter().filter(|p| p.is_move()) {
        let key = proposal
            .category
            .map(|c| c.as_str())
            .unwrap_or("other")
            .to_string();
        by_category.entry(key).or_default().push(proposal);
    }

    if by_category.is_empty() {
        out.push("No moves proposed; the tree already matches its layout.".to_string());
        out.push(String::new());
        return;
    }

    let mut number = 1;
    for (category, proposals) in &by_category {
        out.push(format!("--- {category} ---"));
        for proposal in proposals {
            let target = proposal.target.as_deref().unwrap_or("?");
            out.push(format!(
                "{number:3}. MOVE {} -> {}  [{}]",
                proposal.source, target, proposal.risk
            ));
            out.push(format!("     {}", proposal.reason));
            number += 1;
        }
        out.push(String::new());
    }
}

fn render_flags(report: &AnalysisReport, out: &mut Vec<String>) {
    let flags: Vec<_> = report
        .proposals
        .iter()
        .filter(|p| p.action == ActionType::Flag)
        .collect();
    if flags.is_empty() {
        return;
    }

    out.push("--- flagged for review ---".to_string());
    for proposal in flags {
        out.push(format!("FLAG {}  [{}]", proposal.source, proposal.risk));
        out.push(format!("     {}", proposal.reason));
        for (key, value) in &proposal.extra {
            out.push(format!("     {key}: {value}"));
        }
    }
    out.push(String::new());
}

fn render_warnings(report: &AnalysisReport, out: &mut Vec<String>) {
    if report.warnings.is_empty() {
        return;
    }
    out.push("--- import warnings ---".to_string());
    for warning in &report.warnings {
        out.push(format!(
            "{}:{} [{}] affects {}",
            warning.source_file,
            warning.line,
            warning.kind.as_str(),
            warning.affected_path
        ));
        if !warning.detail.is_empty() {
            out.push(format!("     {}", warning.detail));
        }
    }
    out.push(String::new());
}

fn render_summary(report: &AnalysisReport, out: &mut Vec<String>) {
    let moves = report.proposals.iter().filter(|p| p.is_move()).count();
    let flags = report.proposals.len() - moves;
    let count_risk = |risk: RiskLevel| {
        report
            .proposals
            .iter()
            .filter(|p| p.is_move() && p.risk == risk)
            .count()
    };

    out.push("Summary".to_string());
    out.push(format!("  Files to be moved:   {moves}"));
    out.push(format!("  Files flagged:       {flags}"));
    out.push(format!("  High-risk moves:     {}", count_risk(RiskLevel::High)));
    out.push(format!("  Medium-risk moves:   {}", count_risk(RiskLevel::Medium)));
    out.push(format!("  Low-risk moves:      {}", count_risk(RiskLevel::Low)));
    out.push(format!("  Import warnings:     {}", report.warnings.len()));
    out.push(String::new());
}

fn render_confidence(report: &AnalysisReport, out: &mut Vec<String>) {
    out.push(RULE.to_string());
    out.push(format!("CONFIDENCE: {}", report.confidence.verdict));
    out.push(RULE.to_string());

    let positives: Vec<_> = report
        .confidence
        .factors
        .iter()
        .filter(|f| f.contribution == Contribution::None)
        .collect();
    let risks: Vec<_> = report
        .confidence
        .factors
        .iter()
        .filter(|f| f.contribution != Contribution::None)
        .collect();

    if !positives.is_empty() {
        out.push("Positive factors:".to_string());
        for factor in positives {
            out.push(format!("  + {}", factor.name));
        }
    }
    if !risks.is_empty() {
        out.push("Risk factors:".to_string());
        for factor in risks {
            out.push(format!("  ! {}", factor.name));
        }
    }

    out.push(match report.confidence.verdict {
        ConfidenceLevel::High => "Interpretation: changes appear safe to apply.".to_string(),
        ConfidenceLevel::Medium => {
            "Interpretation: review changes carefully before applying.".to_string()
        }
        ConfidenceLevel::Low => {
            "Interpretation: high risk, prefer smaller batches or manual review.".to_string()
        }
    });
    out.push(RULE.to_string());
}

/// Render the report as a single pretty-printed JSON document.
pub fn render_json(report: &AnalysisReport) -> RestackResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

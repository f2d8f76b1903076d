//! Before/after directory tree preview for MOVE proposals.
//!
//! Pure simulation over the proposal list: the "after" tree is the affected
//! files with every MOVE source swapped for its target, nothing is read from
//! or written to disk. Only affected files appear, so the preview stays
//! readable in large repositories.

use std::collections::{BTreeMap, HashMap};

use restack_foundation::Proposal;

/// Cap on files per tree; larger batches are truncated with a notice.
const MAX_PREVIEW_FILES: usize = 50;

const RULE: &str = "============================================================";

#[derive(Default)]
struct TreeNode {
    is_file: bool,
    children: BTreeMap<String, TreeNode>,
}

impl TreeNode {
    fn insert(&mut self, path: &str) {
        let mut node = self;
        let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        let last = parts.len().saturating_sub(1);
        for (i, part) in parts.iter().enumerate() {
            node = node.children.entry((*part).to_string()).or_default();
            if i == last {
                node.is_file = true;
            }
        }
    }

    fn render_into(&self, prefix: &str, lines: &mut Vec<String>) {
        // Directories sort before files; each group is alphabetical.
        let mut entries: Vec<(&String, &TreeNode)> = self.children.iter().collect();
        entries.sort_by_key(|(name, node)| (node.is_file, (*name).clone()));

        let count = entries.len();
        for (i, (name, child)) in entries.into_iter().enumerate() {
            let is_last = i + 1 == count;
            let connector = if is_last { "└── " } else { "├── " };
            let suffix = if child.is_file { "" } else { "/" };
            lines.push(format!("{prefix}{connector}{name}{suffix}"));
            if !child.is_file {
                let extension = if is_last { "    " } else { "│   " };
                child.render_into(&format!("{prefix}{extension}"), lines);
            }
        }
    }
}

fn render_tree(paths: &[&str]) -> Vec<String> {
    let mut root = TreeNode::default();
    for path in paths.iter().take(MAX_PREVIEW_FILES) {
        root.insert(path);
    }
    let mut lines = vec![".".to_string()];
    root.render_into("", &mut lines);
    if paths.len() > MAX_PREVIEW_FILES {
        lines.push(format!(
            "... showing {MAX_PREVIEW_FILES} of {} affected files",
            paths.len()
        ));
    }
    lines
}

/// Render the structure preview, or `None` when there is no MOVE to
/// preview (flags alone change no paths).
pub fn render_preview(proposals: &[Proposal]) -> Option<String> {
    if !proposals.iter().any(Proposal::is_move) {
        return None;
    }

    let move_map: HashMap<&str, &str> = proposals
        .iter()
        .filter(|p| p.is_move())
        .filter_map(|p| Some((p.source.as_str(), p.target.as_deref()?)))
        .collect();

    let mut before: Vec<&str> = proposals.iter().map(|p| p.source.as_str()).collect();
    before.sort_unstable();
    before.dedup();

    let mut after: Vec<&str> = before
        .iter()
        .map(|source| move_map.get(source).copied().unwrap_or(source))
        .collect();
    after.sort_unstable();
    after.dedup();

    let mut out = Vec::new();
    out.push(RULE.to_string());
    out.push("DIRECTORY STRUCTURE PREVIEW".to_string());
    out.push(RULE.to_string());
    out.push(String::new());
    out.push("BEFORE (current):".to_string());
    out.extend(render_tree(&before));
    out.push(String::new());
    out.push("AFTER (if proposals applied):".to_string());
    out.extend(render_tree(&after));
    out.push(String::new());
    out.push(RULE.to_string());
    Some(out.join("\n"))
}

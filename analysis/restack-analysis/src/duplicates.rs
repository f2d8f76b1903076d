//! Duplicate-basename detection across the whole tree.

use std::collections::HashMap;

use restack_foundation::profile::DUPLICATE_EXEMPT_FILES;
use restack_foundation::{DuplicateSet, EcosystemProfile, FileRecord};

/// Group files sharing a normalized basename into duplicate sets.
///
/// Normalization is lower-casing of the final path segment; directories are
/// irrelevant. Structural names (`__init__.py` and friends) and
/// profile-suppressed patterns never form a set. A set needs at least two
/// members; member order and set order follow the input scan order, so the
/// output is deterministic for a stable scan.
pub fn group(records: &[FileRecord], profile: &EcosystemProfile) -> Vec<DuplicateSet> {
    let mut order: Vec<String> = Vec::new();
    let mut by_name: HashMap<String, Vec<&str>> = HashMap::new();

    for record in records {
        let name = record.file_name();
        if DUPLICATE_EXEMPT_FILES.contains(&name) {
            continue;
        }
        if profile.suppresses_duplicate(name) {
            tracing::trace!(name, profile = profile.name, "duplicate suppressed by profile");
            continue;
        }
        let normalized = name.to_lowercase();
        let entry = by_name.entry(normalized.clone()).or_default();
        if entry.is_empty() {
            order.push(normalized);
        }
        entry.push(&record.path);
    }

    order
        .into_iter()
        .filter_map(|normalized| {
            let paths = &by_name[&normalized];
            (paths.len() >= 2).then(|| DuplicateSet {
                normalized_name: normalized.clone(),
                paths: paths.iter().map(|p| p.to_string()).collect(),
            })
        })
        .collect()
}

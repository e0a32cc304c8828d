//! Cyclic "find next" over the extraction tree.

use crate::core::tree::{NodeId, Tree};

/// First node after `start` (depth-first, wrapping around) whose key or any
/// translation contains `text`, case-insensitively.
///
/// Without a start node the walk begins at the first top-level item. `start`
/// itself is checked last, so repeated calls cycle through all hits.
pub fn find_next(tree: &Tree, start: Option<NodeId>, text: &str) -> Option<NodeId> {
    let search = text.trim().to_lowercase();
    if search.is_empty() {
        return None;
    }
    let first = *tree.root_items().first()?;
    let step = |current: Option<NodeId>| {
        current
            .and_then(|id| tree.walk_next(id, true))
            .unwrap_or(first)
    };

    let begin = step(start);
    let mut current = begin;
    loop {
        if tree.node(current).matches_filter(&search) {
            return Some(current);
        }
        current = step(Some(current));
        if current == begin {
            return None;
        }
    }
}

/// Every matching node in depth-first order.
pub fn find_all(tree: &Tree, text: &str) -> Vec<NodeId> {
    let search = text.trim().to_lowercase();
    if search.is_empty() {
        return Vec::new();
    }
    tree.descendants(tree.root())
        .into_iter()
        .filter(|id| tree.node(*id).matches_filter(&search))
        .collect()
}

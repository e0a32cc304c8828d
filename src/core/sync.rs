//! Carries UI-only state (expanded / selected) from a previous tree into a
//! freshly built one.
//!
//! Nodes correspond when they have the same key text under corresponding
//! parents. Content is not compared: a file that changed but kept its name
//! still matches.

use crate::core::tree::{NodeId, Tree};

/// Copy state from `old_siblings` onto `new_siblings`, recursing into matches.
///
/// Unmatched new nodes keep their defaults; unmatched old nodes are dropped.
pub fn transfer_state(
    new_tree: &mut Tree,
    new_siblings: &[NodeId],
    old_tree: &Tree,
    old_siblings: &[NodeId],
) {
    for new_id in new_siblings {
        let key = &new_tree.node(*new_id).key;
        let Some(old_id) = old_siblings
            .iter()
            .copied()
            .find(|old| old_tree.node(*old).key == *key)
        else {
            continue;
        };

        let old = old_tree.node(old_id);
        let node = new_tree.node_mut(*new_id);
        node.is_expanded = old.is_expanded;
        node.is_selected = old.is_selected;

        let new_children = new_tree.children(*new_id).to_vec();
        transfer_state(new_tree, &new_children, old_tree, old.children());
    }
}

/// Transfer state for the whole tree and return the selected node, if any
/// selection survived.
pub fn transfer_tree_state(new_tree: &mut Tree, old_tree: &Tree) -> Option<NodeId> {
    let new_roots = new_tree.root_items().to_vec();
    transfer_state(new_tree, &new_roots, old_tree, old_tree.root_items());
    new_tree.selected()
}

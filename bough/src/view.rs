//! Per-node view data derived from the graph and the current state.
//!
//! Nothing here is stored: each pass recomputes the flags from scratch.

use crate::graph::{NodeGraph, NodeId};
use crate::key::{KeySet, TreeKey};
use crate::key_set::child_keys;
use crate::state::EngineState;

/// Derived flags for one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeView {
    pub id: NodeId,
    pub key: Option<TreeKey>,
    pub parent: Option<NodeId>,
    /// Nesting depth (0 = top level).
    pub depth: u16,
    /// Key is in the selected set.
    pub selected: bool,
    /// Key is in the open set and the node has children.
    pub open: bool,
    /// The node is a leaf.
    pub no_child: bool,
    /// Some but not all descendants are selected.
    pub is_half_checked: bool,
    /// Every ancestor is open.
    pub visible: bool,
}

/// Whether some, but not all, of `node`'s descendants are selected.
///
/// Counts the selected keys that occur among the descendant keys and
/// compares against the number of descendants. Leaves are never
/// half-checked. Cost is linear in the subtree size.
pub fn is_half_checked(graph: &NodeGraph, node: NodeId, selected_keys: &KeySet) -> bool {
    let descendants = child_keys(graph, node);
    let checked = selected_keys
        .iter()
        .filter(|k| descendants.contains(&Some(*k)))
        .count();
    checked > 0 && checked != descendants.len()
}

fn is_open(graph: &NodeGraph, node: NodeId, open_keys: &KeySet) -> bool {
    graph.children(node).is_some() && graph.key(node).is_some_and(|k| open_keys.contains(k))
}

/// Derive a view for every node, in preorder.
pub fn derive_views(graph: &NodeGraph, state: &EngineState) -> Vec<NodeView> {
    let mut views: Vec<NodeView> = Vec::with_capacity(graph.len());
    for id in graph.ids() {
        let Some(node) = graph.get(id) else {
            continue;
        };
        let selected = node
            .key
            .as_ref()
            .is_some_and(|k| state.selected_keys.contains(k));
        // Parents precede children in preorder, so their view already exists.
        let visible = match node.parent {
            None => true,
            Some(parent) => views
                .get(parent.index())
                .is_some_and(|p| p.visible && p.open),
        };
        views.push(NodeView {
            id,
            key: node.key.clone(),
            parent: node.parent,
            depth: node.depth,
            selected,
            open: is_open(graph, id, &state.open_keys),
            no_child: node.children.is_none(),
            is_half_checked: is_half_checked(graph, id, &state.selected_keys),
            visible,
        });
    }
    views
}

/// Only the views of visible nodes, in display order.
pub fn visible_views(graph: &NodeGraph, state: &EngineState) -> Vec<NodeView> {
    derive_views(graph, state)
        .into_iter()
        .filter(|v| v.visible)
        .collect()
}

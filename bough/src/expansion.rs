//! Expand/collapse rules.

use log::debug;

use crate::graph::{NodeGraph, NodeId};
use crate::key::{KeySet, TreeKey};
use crate::key_set::flatten_descendant_keys;

/// Result of a committed expand/collapse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionChange {
    /// The open keys after the toggle.
    pub open_keys: KeySet,
    /// Key of the toggled node.
    pub key: TreeKey,
    /// Whether the node is now open.
    pub expanded: bool,
}

/// Flip `node` between open and closed.
///
/// Returns `None` for leaves, keyless nodes and unknown ids; those clicks
/// change nothing. No other node is affected.
pub fn toggle_open(graph: &NodeGraph, open_keys: &KeySet, node: NodeId) -> Option<ExpansionChange> {
    graph.children(node)?;
    let key = graph.key(node)?.clone();

    let mut open_keys = open_keys.clone();
    let expanded = if open_keys.remove(&key) {
        false
    } else {
        open_keys.insert(key.clone());
        true
    };
    debug!("Toggled node {} ({}): expanded={}", node, key, expanded);

    Some(ExpansionChange {
        open_keys,
        key,
        expanded,
    })
}

/// Every key in the tree, leaves included, as used by expand-all.
pub fn all_keys(graph: &NodeGraph) -> KeySet {
    flatten_descendant_keys(graph, graph.roots())
        .into_iter()
        .flatten()
        .cloned()
        .collect()
}

//! Selection rules.
//!
//! Selection is tracked by key. Which keys change on a click depends on the
//! [`SelectionPolicy`], derived from the `multiple` and `check_strictly`
//! switches.

use log::debug;

use crate::graph::{NodeGraph, NodeId};
use crate::key::{KeySet, TreeKey};
use crate::key_set::{ancestor_keys, ancestor_promotion_candidates, child_keys};

/// How a click changes the selected keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// At most one key is selected (`multiple = false`).
    #[default]
    Exclusive,
    /// Keys toggle on their own (`multiple = true`).
    Independent,
    /// Checkbox style (`multiple = true`, `check_strictly = true`).
    ///
    /// Selecting adds all descendants and promotes covered ancestors;
    /// deselecting removes all descendants and the whole ancestor chain.
    Strict,
}

impl SelectionPolicy {
    /// Policy for the given switches. `multiple = false` wins over
    /// `check_strictly`.
    pub fn from_flags(multiple: bool, check_strictly: bool) -> Self {
        match (multiple, check_strictly) {
            (false, _) => SelectionPolicy::Exclusive,
            (true, false) => SelectionPolicy::Independent,
            (true, true) => SelectionPolicy::Strict,
        }
    }
}

/// Result of a committed selection toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    /// The selected keys after the toggle.
    pub selected_keys: KeySet,
    /// Key of the clicked node.
    pub key: TreeKey,
    /// Whether the clicked node is now selected.
    pub selected: bool,
}

/// Toggle the selection of `node` under `policy`.
///
/// Returns `None` for keyless nodes and unknown ids.
pub fn toggle_selection(
    graph: &NodeGraph,
    selected_keys: &KeySet,
    node: NodeId,
    policy: SelectionPolicy,
) -> Option<SelectionChange> {
    let key = graph.key(node)?.clone();
    let already_selected = selected_keys.contains(&key);

    let mut keys = selected_keys.clone();
    if already_selected {
        keys.remove(&key);
    } else {
        keys.insert(key.clone());
    }

    match policy {
        SelectionPolicy::Exclusive => {
            keys = if already_selected {
                KeySet::new()
            } else {
                KeySet::from_iter([key.clone()])
            };
        }
        SelectionPolicy::Independent => {}
        SelectionPolicy::Strict if !already_selected => {
            keys.extend(child_keys(graph, node).into_iter().flatten().cloned());
            let promoted = ancestor_promotion_candidates(graph, node, &keys);
            keys.extend(promoted);
        }
        SelectionPolicy::Strict => {
            let descendants = child_keys(graph, node);
            keys.retain(|k| !descendants.contains(&Some(k)));
            let ancestors = ancestor_keys(graph, graph.parent(node));
            keys.retain(|k| !ancestors.contains(&k));
        }
    }

    debug!(
        "Toggled selection of {} ({}) under {:?}: selected={}, {} keys",
        node,
        key,
        policy,
        !already_selected,
        keys.len()
    );

    Some(SelectionChange {
        selected_keys: keys,
        key,
        selected: !already_selected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_from_flags() {
        assert_eq!(SelectionPolicy::from_flags(false, true), SelectionPolicy::Exclusive);
        assert_eq!(SelectionPolicy::from_flags(false, false), SelectionPolicy::Exclusive);
        assert_eq!(SelectionPolicy::from_flags(true, false), SelectionPolicy::Independent);
        assert_eq!(SelectionPolicy::from_flags(true, true), SelectionPolicy::Strict);
    }
}

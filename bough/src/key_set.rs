//! Key-set utilities over a [`NodeGraph`].
//!
//! These are the building blocks of strict-mode selection and half-checked
//! derivation. All of them are pure.

use crate::graph::{NodeGraph, NodeId};
use crate::key::{KeySet, TreeKey};

/// Keys of `nodes` and all their descendants, depth-first preorder.
///
/// A keyless node contributes `None` so it still counts toward the total.
pub fn flatten_descendant_keys<'g>(graph: &'g NodeGraph, nodes: &[NodeId]) -> Vec<Option<&'g TreeKey>> {
    let mut out = Vec::new();
    collect_keys(graph, nodes, &mut out);
    out
}

fn collect_keys<'g>(graph: &'g NodeGraph, nodes: &[NodeId], out: &mut Vec<Option<&'g TreeKey>>) {
    for &id in nodes {
        out.push(graph.key(id));
        if let Some(children) = graph.children(id) {
            collect_keys(graph, children, out);
        }
    }
}

/// Keys below `node`, i.e. [`flatten_descendant_keys`] over its children.
///
/// Empty for leaves.
pub fn child_keys(graph: &NodeGraph, node: NodeId) -> Vec<Option<&TreeKey>> {
    graph
        .children(node)
        .map(|children| flatten_descendant_keys(graph, children))
        .unwrap_or_default()
}

/// `node`'s own key followed by every ancestor's key, nearest first.
///
/// Keyless nodes along the way are skipped.
pub fn ancestor_keys(graph: &NodeGraph, node: Option<NodeId>) -> Vec<&TreeKey> {
    let mut out = Vec::new();
    let mut current = node;
    while let Some(id) = current {
        if let Some(key) = graph.key(id) {
            out.push(key);
        }
        current = graph.parent(id);
    }
    out
}

/// Containment test by substring search over the joined string forms.
///
/// `candidate` is joined with `,` and each required key must appear in that
/// string. This is not set containment: `{"11"}` is reported to contain
/// `"1"`. Callers depend on this exact behavior. A keyless entry in
/// `required` is never found.
pub fn is_subset_by_string_containment(candidate: &KeySet, required: &[Option<&TreeKey>]) -> bool {
    if candidate.len() < required.len() {
        return false;
    }
    let haystack = candidate.joined();
    required.iter().all(|key| match key {
        Some(key) => haystack.contains(&key.to_string()),
        None => false,
    })
}

/// Keys to promote after selecting `node` under strict mode.
///
/// Walks from `node` up through each ancestor. A level with a key and
/// children whose descendants are covered by the snapshot proposes its own
/// key. When that level hangs directly off a top-level node, the snapshot
/// absorbs everything proposed so far and the top-level node is proposed
/// too if its descendants are now covered.
///
/// The snapshot starts as `selected` and only grows in that top-level case,
/// so a promotion never unlocks the next one up except there.
pub fn ancestor_promotion_candidates(graph: &NodeGraph, node: NodeId, selected: &KeySet) -> Vec<TreeKey> {
    let mut snapshot = selected.clone();
    let mut out = Vec::new();
    let mut current = Some(node);

    while let Some(id) = current {
        let parent = graph.parent(id);
        if let (Some(key), Some(_)) = (graph.key(id), graph.children(id))
            && is_subset_by_string_containment(&snapshot, &child_keys(graph, id))
        {
            out.push(key.clone());
            if let Some(parent) = parent
                && graph.parent(parent).is_none()
            {
                snapshot.extend(out.iter().cloned());
                if is_subset_by_string_containment(&snapshot, &child_keys(graph, parent))
                    && let Some(parent_key) = graph.key(parent)
                {
                    out.push(parent_key.clone());
                }
            }
        }
        current = parent;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::TreeNode;

    #[test]
    fn test_keyless_required_never_contained() {
        let candidate: KeySet = ["a"].into_iter().collect();
        assert!(!is_subset_by_string_containment(&candidate, &[None]));
    }

    #[test]
    fn test_candidate_shorter_than_required() {
        let candidate: KeySet = ["ab"].into_iter().collect();
        let a = TreeKey::from("a");
        let b = TreeKey::from("b");
        assert!(!is_subset_by_string_containment(&candidate, &[Some(&a), Some(&b)]));
    }

    #[test]
    fn test_ancestor_keys_skips_keyless() {
        let items = vec![TreeNode::new("r", "R").with_children(vec![
            TreeNode::keyless("mid").with_children(vec![TreeNode::new("leaf", "Leaf")]),
        ])];
        let graph = NodeGraph::build(&items, 16).unwrap();
        let leaf = graph.find(&"leaf".into()).unwrap();
        let keys: Vec<_> = ancestor_keys(&graph, Some(leaf)).into_iter().cloned().collect();
        assert_eq!(keys, vec![TreeKey::from("leaf"), TreeKey::from("r")]);
    }
}

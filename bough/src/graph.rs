//! Index-based node graph.
//!
//! Every build walks the items once in preorder and records, per node, its
//! key, parent and children by [`NodeId`]. Ancestor walks use these links,
//! so the caller's items are never written to.

use std::collections::HashSet;
use std::fmt;

use log::trace;

use crate::error::TreeError;
use crate::item::TreeItem;
use crate::key::TreeKey;

/// Position of a node in the graph's preorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Preorder index of the node.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Per-node record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    /// The item's key, if any.
    pub key: Option<TreeKey>,
    /// Parent node (None at the top level).
    pub parent: Option<NodeId>,
    /// Child nodes, or None for a leaf.
    pub children: Option<Vec<NodeId>>,
    /// Nesting depth (0 = top level).
    pub depth: u16,
    /// Position among its siblings.
    pub position: usize,
}

/// Parent/child links for one snapshot of the tree data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeGraph {
    nodes: Vec<GraphNode>,
    roots: Vec<NodeId>,
}

impl NodeGraph {
    /// Build the graph for `items`.
    ///
    /// Fails with [`TreeError::DepthExceeded`] when nesting goes deeper than
    /// `max_depth` levels.
    pub fn build<T: TreeItem>(items: &[T], max_depth: usize) -> Result<Self, TreeError> {
        let mut graph = NodeGraph::default();
        graph.roots = graph.collect(items, None, 0, max_depth)?;
        trace!(
            "Built node graph: {} nodes, {} roots",
            graph.nodes.len(),
            graph.roots.len()
        );
        Ok(graph)
    }

    fn collect<T: TreeItem>(
        &mut self,
        items: &[T],
        parent: Option<NodeId>,
        depth: usize,
        max_depth: usize,
    ) -> Result<Vec<NodeId>, TreeError> {
        if depth >= max_depth && !items.is_empty() {
            return Err(TreeError::DepthExceeded { limit: max_depth });
        }

        let mut ids = Vec::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            let id = NodeId(self.nodes.len());
            self.nodes.push(GraphNode {
                key: item.key(),
                parent,
                children: None,
                depth: u16::try_from(depth).unwrap_or(u16::MAX),
                position,
            });
            if let Some(children) = item.children() {
                let child_ids = self.collect(children, Some(id), depth + 1, max_depth)?;
                self.nodes[id.0].children = Some(child_ids);
            }
            ids.push(id);
        }
        Ok(ids)
    }

    /// Reject duplicate and missing keys.
    pub fn validate_keys(&self) -> Result<(), TreeError> {
        let mut seen = HashSet::new();
        for id in self.ids() {
            match &self.nodes[id.0].key {
                Some(key) => {
                    if !seen.insert(key) {
                        return Err(TreeError::DuplicateKey(key.clone()));
                    }
                }
                None => {
                    return Err(TreeError::MissingKey {
                        path: self.path_string(id),
                    });
                }
            }
        }
        Ok(())
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level nodes.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// All node ids in preorder.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Look up a node record.
    pub fn get(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(id.0)
    }

    /// Key of a node.
    pub fn key(&self, id: NodeId) -> Option<&TreeKey> {
        self.get(id).and_then(|n| n.key.as_ref())
    }

    /// Parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Children of a node (None for leaves and unknown ids).
    pub fn children(&self, id: NodeId) -> Option<&[NodeId]> {
        self.get(id).and_then(|n| n.children.as_deref())
    }

    /// First node carrying `key`, in preorder.
    pub fn find(&self, key: &TreeKey) -> Option<NodeId> {
        self.ids().find(|&id| self.key(id) == Some(key))
    }

    /// Sibling positions from the top level down to `id`.
    pub fn path(&self, id: NodeId) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = self.get(id).map(|_| id);
        while let Some(node_id) = current {
            let node = &self.nodes[node_id.0];
            path.push(node.position);
            current = node.parent;
        }
        path.reverse();
        path
    }

    fn path_string(&self, id: NodeId) -> String {
        self.path(id)
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Map a node id back to the caller's item.
    ///
    /// `items` must be the slice the graph was built from.
    pub fn resolve<'a, T: TreeItem>(&self, items: &'a [T], id: NodeId) -> Option<&'a T> {
        let path = self.path(id);
        let (first, rest) = path.split_first()?;
        let mut item = items.get(*first)?;
        for &position in rest {
            item = item.children()?.get(position)?;
        }
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::TreeNode;

    fn sample() -> Vec<TreeNode> {
        vec![
            TreeNode::new("a", "A").with_children(vec![
                TreeNode::new("a1", "A1"),
                TreeNode::new("a2", "A2").with_children(vec![TreeNode::new("a2x", "A2X")]),
            ]),
            TreeNode::new("b", "B"),
        ]
    }

    #[test]
    fn test_preorder_ids_and_parents() {
        let graph = NodeGraph::build(&sample(), 16).unwrap();
        let keys: Vec<_> = graph.ids().map(|id| graph.key(id).unwrap().to_string()).collect();
        assert_eq!(keys, ["a", "a1", "a2", "a2x", "b"]);

        let a2x = graph.find(&"a2x".into()).unwrap();
        let a2 = graph.parent(a2x).unwrap();
        assert_eq!(graph.key(a2), Some(&TreeKey::from("a2")));
        assert_eq!(graph.get(a2x).unwrap().depth, 2);
        assert_eq!(graph.roots().len(), 2);
    }

    #[test]
    fn test_resolve_returns_original_item() {
        let items = sample();
        let graph = NodeGraph::build(&items, 16).unwrap();
        let id = graph.find(&"a2x".into()).unwrap();
        assert_eq!(graph.path(id), vec![0, 1, 0]);
        assert_eq!(graph.resolve(&items, id).unwrap().label, "A2X");
    }

    #[test]
    fn test_depth_guard() {
        let result = NodeGraph::build(&sample(), 2);
        assert!(matches!(result, Err(TreeError::DepthExceeded { limit: 2 })));
    }

    #[test]
    fn test_depth_guard_ignores_empty_levels() {
        assert!(NodeGraph::build::<TreeNode>(&[], 0).unwrap().is_empty());

        let empty_branch = vec![TreeNode::new("a", "A").with_children(vec![])];
        let graph = NodeGraph::build(&empty_branch, 1).unwrap();
        assert_eq!(graph.children(graph.roots()[0]), Some(&[][..]));
    }

    #[test]
    fn test_validate_keys() {
        let dup = vec![TreeNode::new("a", "A"), TreeNode::new("a", "again")];
        let graph = NodeGraph::build(&dup, 16).unwrap();
        assert!(matches!(graph.validate_keys(), Err(TreeError::DuplicateKey(_))));

        let missing = vec![TreeNode::new("a", "A").with_children(vec![TreeNode::keyless("?")])];
        let graph = NodeGraph::build(&missing, 16).unwrap();
        match graph.validate_keys() {
            Err(TreeError::MissingKey { path }) => assert_eq!(path, "0/0"),
            other => panic!("unexpected: {:?}", other),
        }
    }
}

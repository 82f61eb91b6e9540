//! TreeItem trait for items that can be displayed in a Tree.

use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::TreeError;
use crate::key::TreeKey;

/// Trait for items that can be displayed in a Tree.
///
/// Implement this trait to plug your own hierarchical data into the engine.
/// The engine only ever reads keys and children; everything else on the
/// item is yours.
///
/// # Example
///
/// ```
/// use bough::{TreeItem, TreeKey};
///
/// #[derive(Clone, Debug)]
/// struct Dir {
///     path: String,
///     entries: Option<Vec<Dir>>,
/// }
///
/// impl TreeItem for Dir {
///     fn key(&self) -> Option<TreeKey> {
///         Some(TreeKey::from(self.path.as_str()))
///     }
///
///     fn children(&self) -> Option<&[Self]> {
///         self.entries.as_deref()
///     }
/// }
/// ```
pub trait TreeItem: Send + Sync + Clone + 'static {
    /// Identifier used in the open/selected key sets.
    ///
    /// Should be unique across the tree. A node without a key can never be
    /// opened or selected.
    fn key(&self) -> Option<TreeKey>;

    /// Child items, or `None` for a leaf.
    ///
    /// `Some(&[])` is a branch that happens to be empty: it can still be
    /// toggled open.
    fn children(&self) -> Option<&[Self]>;
}

/// The bundled tree item: a key, a label, optional children and any extra
/// fields the caller wants to carry along.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<TreeKey>,
    #[serde(default)]
    pub label: String,
    #[serde(
        default,
        deserialize_with = "lenient_children",
        skip_serializing_if = "Option::is_none"
    )]
    pub children: Option<Vec<TreeNode>>,
    /// Fields the engine does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TreeNode {
    /// Create a leaf node.
    pub fn new(key: impl Into<TreeKey>, label: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            label: label.into(),
            ..Default::default()
        }
    }

    /// Create a leaf node without a key.
    pub fn keyless(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    /// Turn this node into a branch with the given children.
    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = Some(children);
        self
    }

    /// Attach an extra field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    /// Whether the caller marked this node `disabled`.
    ///
    /// Purely presentational; disabled nodes still toggle.
    pub fn is_disabled(&self) -> bool {
        self.extra
            .get("disabled")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

impl TreeItem for TreeNode {
    fn key(&self) -> Option<TreeKey> {
        self.key.clone()
    }

    fn children(&self) -> Option<&[Self]> {
        self.children.as_deref()
    }
}

/// Parse a JSON array of nodes.
pub fn load_nodes(json: &str) -> Result<Vec<TreeNode>, TreeError> {
    Ok(serde_json::from_str(json)?)
}

/// `children` that is not an array of nodes makes the node a leaf.
fn lenient_children<'de, D>(deserializer: D) -> Result<Option<Vec<TreeNode>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => match serde_json::from_value(Value::Array(items)) {
            Ok(children) => Ok(Some(children)),
            Err(e) => {
                warn!("Ignoring malformed children: {}", e);
                Ok(None)
            }
        },
        Some(other) => {
            warn!("Ignoring non-array children: {}", other);
            Ok(None)
        }
    }
}

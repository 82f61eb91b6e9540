//! The JSON document the demo loads.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::info;
use serde::Deserialize;

use bough::{ExternalKeys, KeySet, Tree, TreeConfig, TreeNode};

use crate::error::DemoError;

/// `{ "config": {...}, "data": [...] }`, optionally with controlled
/// `openKeys` / `selectedKeys`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Document {
    pub config: TreeConfig,
    pub data: Vec<TreeNode>,
    pub open_keys: Option<KeySet>,
    pub selected_keys: Option<KeySet>,
}

/// A bare array of nodes is accepted too.
#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentFile {
    Nodes(Vec<TreeNode>),
    Full(Document),
}

impl Document {
    /// Parse a document from JSON text.
    pub fn parse(json: &str) -> Result<Self, DemoError> {
        let doc = match serde_json::from_str(json)? {
            DocumentFile::Nodes(data) => Document {
                data,
                ..Default::default()
            },
            DocumentFile::Full(doc) => doc,
        };
        Ok(doc)
    }

    /// Read and parse a document file.
    pub fn load(path: &Path) -> Result<Self, DemoError> {
        let json = fs::read_to_string(path).map_err(|source| DemoError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let doc = Self::parse(&json)?;
        info!("Loaded {} with {} top-level nodes", path.display(), doc.data.len());
        Ok(doc)
    }

    /// Build the tree, seeding controlled key lists if present.
    pub fn into_tree(self) -> Result<Tree<TreeNode>, DemoError> {
        let mut external = ExternalKeys::new();
        if let Some(keys) = self.open_keys {
            external = external.with_open_keys(Arc::new(keys));
        }
        if let Some(keys) = self.selected_keys {
            external = external.with_selected_keys(Arc::new(keys));
        }
        Ok(Tree::controlled(self.data, self.config, &external)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_document() {
        let doc = Document::parse(
            r#"{
                "config": {"multiple": true, "checkStrictly": true, "defaultExpandAll": true},
                "data": [{"key": "a", "label": "A", "children": [{"key": "b", "label": "B"}]}],
                "openKeys": ["a"]
            }"#,
        )
        .unwrap();
        assert!(doc.config.multiple);
        assert!(doc.config.check_strictly);
        assert_eq!(doc.data.len(), 1);

        let tree = doc.into_tree().unwrap();
        assert!(tree.config().default_expand_all);
        assert!(tree.is_open(&"a".into()));
        assert!(tree.selected_keys().is_empty());
    }

    #[test]
    fn test_parse_bare_array() {
        let doc = Document::parse(r#"[{"key": 1, "label": "one"}]"#).unwrap();
        assert_eq!(doc.config, TreeConfig::default());
        assert_eq!(doc.data[0].label, "one");
    }

    #[test]
    fn test_bundled_sample() {
        let doc = Document::parse(include_str!("../data/project.json")).unwrap();
        let tree = doc.into_tree().unwrap();
        assert_eq!(tree.len(), 13);
        assert!(tree.is_open(&"src".into()));
        assert!(tree.find(&bough::TreeKey::from(42_i64)).is_some());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Document::parse("{not json"),
            Err(DemoError::Document(_))
        ));
    }
}

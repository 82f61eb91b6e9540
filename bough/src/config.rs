//! Tree configuration.

use serde::{Deserialize, Serialize};

use crate::selection::SelectionPolicy;

/// Default nesting bound for the node graph builder.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Per-tree configuration.
///
/// Only `multiple`, `check_strictly` and `default_expand_all` drive engine
/// behavior. The presentation flags are handed to the renderer untouched.
///
/// Field names are camelCase in JSON (`checkStrictly`, `defaultExpandAll`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TreeConfig {
    /// Strict (checkbox-style) cascading. Only applies with `multiple`.
    pub check_strictly: bool,

    /// Allow more than one selected key.
    pub multiple: bool,

    /// Open every node on mount.
    pub default_expand_all: bool,

    /// Presentation: expand parents of opened nodes.
    pub auto_expand_parent: bool,

    /// Presentation: draw connecting lines.
    pub show_line: bool,

    /// Presentation: animate the switcher icon.
    pub icon_animation: bool,

    /// Presentation: highlight selected titles.
    pub is_selected: bool,

    /// Reject data with duplicate or missing keys.
    ///
    /// Off by default: duplicates then alias each other's state and keyless
    /// nodes are inert.
    pub validate_keys: bool,

    /// Maximum nesting depth accepted by the graph builder.
    pub max_depth: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            check_strictly: false,
            multiple: false,
            default_expand_all: false,
            auto_expand_parent: false,
            show_line: false,
            icon_animation: true,
            is_selected: true,
            validate_keys: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl TreeConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow multiple selected keys.
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Enable strict cascading.
    pub fn check_strictly(mut self) -> Self {
        self.check_strictly = true;
        self
    }

    /// Checkbox mode: `multiple` plus `check_strictly`.
    pub fn checkable(self) -> Self {
        self.multiple().check_strictly()
    }

    /// Open every node on mount.
    pub fn default_expand_all(mut self) -> Self {
        self.default_expand_all = true;
        self
    }

    /// Draw connecting lines.
    pub fn show_line(mut self) -> Self {
        self.show_line = true;
        self
    }

    /// Set whether the switcher icon animates.
    pub fn icon_animation(mut self, enabled: bool) -> Self {
        self.icon_animation = enabled;
        self
    }

    /// Set whether selected titles are highlighted.
    pub fn is_selected(mut self, enabled: bool) -> Self {
        self.is_selected = enabled;
        self
    }

    /// Expand parents of opened nodes.
    pub fn auto_expand_parent(mut self) -> Self {
        self.auto_expand_parent = true;
        self
    }

    /// Reject duplicate or missing keys at construction.
    pub fn validate_keys(mut self) -> Self {
        self.validate_keys = true;
        self
    }

    /// Set the nesting bound.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// The selection policy implied by `multiple` and `check_strictly`.
    pub fn selection_policy(&self) -> SelectionPolicy {
        SelectionPolicy::from_flags(self.multiple, self.check_strictly)
    }

    /// Flags for the rendering collaborator.
    pub fn presentation(&self) -> Presentation {
        Presentation {
            auto_expand_parent: self.auto_expand_parent,
            show_line: self.show_line,
            icon_animation: self.icon_animation,
            is_selected: self.is_selected,
            multiple: self.multiple,
            check_strictly: self.check_strictly,
        }
    }
}

/// Presentation-only flags passed to renderers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Presentation {
    pub auto_expand_parent: bool,
    pub show_line: bool,
    pub icon_animation: bool,
    pub is_selected: bool,
    pub multiple: bool,
    pub check_strictly: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TreeConfig::default();
        assert!(!config.multiple);
        assert!(config.icon_animation);
        assert!(config.is_selected);
        assert_eq!(config.selection_policy(), SelectionPolicy::Exclusive);
    }

    #[test]
    fn test_json_uses_camel_case_names() {
        let config: TreeConfig = serde_json::from_str(
            r#"{"defaultExpandAll": true, "showLine": true, "iconAnimation": false, "maxDepth": 8}"#,
        )
        .unwrap();
        assert!(config.default_expand_all);
        assert!(config.show_line);
        assert!(!config.icon_animation);
        assert_eq!(config.max_depth, 8);

        let json = serde_json::to_value(TreeConfig::new().checkable()).unwrap();
        assert_eq!(json["checkStrictly"], true);
        assert!(json.get("check_strictly").is_none());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: TreeConfig =
            serde_json::from_str(r#"{"multiple": true, "checkStrictly": true}"#).unwrap();
        assert_eq!(config.selection_policy(), SelectionPolicy::Strict);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert!(config.icon_animation);
    }
}

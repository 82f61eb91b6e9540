//! Rendering collaborator contract.
//!
//! The engine decides state, renderers decide markup. For every visible
//! node a renderer receives the item, its derived [`NodeView`], the title
//! data and the presentation flags.

use crate::config::Presentation;
use crate::item::{TreeItem, TreeNode};
use crate::key::KeySet;
use crate::view::NodeView;

/// State handed to a renderer for one node's title.
#[derive(Debug, Clone, Copy)]
pub struct RenderTitleNode<'a> {
    pub selected: bool,
    pub no_child: bool,
    pub is_half_checked: bool,
    pub open_keys: &'a KeySet,
    pub selected_keys: &'a KeySet,
}

/// Something that turns tree nodes into output (lines, elements, ...).
pub trait TreeRenderer<T: TreeItem> {
    type Output;

    /// Render one node.
    fn render_node(
        &self,
        item: &T,
        view: &NodeView,
        title: &RenderTitleNode<'_>,
        presentation: &Presentation,
    ) -> Self::Output;
}

/// Plain text renderer: one line per node.
///
/// ```text
/// ▾ [-] src
///   ▸ [x] bin
///     [ ] lib.rs
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl TextRenderer {
    fn indent(depth: u16, show_line: bool) -> String {
        let unit = if show_line { "│ " } else { "  " };
        unit.repeat(usize::from(depth))
    }

    fn switcher(view: &NodeView, presentation: &Presentation) -> &'static str {
        match (view.no_child, view.open, presentation.icon_animation) {
            (true, _, _) if presentation.show_line => "─ ",
            (true, _, _) => "  ",
            (false, true, true) => "▾ ",
            (false, false, true) => "▸ ",
            (false, true, false) => "- ",
            (false, false, false) => "+ ",
        }
    }

    fn checkbox(title: &RenderTitleNode<'_>) -> &'static str {
        if title.selected {
            "[x] "
        } else if title.is_half_checked {
            "[-] "
        } else {
            "[ ] "
        }
    }
}

impl TreeRenderer<TreeNode> for TextRenderer {
    type Output = String;

    fn render_node(
        &self,
        item: &TreeNode,
        view: &NodeView,
        title: &RenderTitleNode<'_>,
        presentation: &Presentation,
    ) -> String {
        let mut line = Self::indent(view.depth, presentation.show_line);
        line.push_str(Self::switcher(view, presentation));
        if presentation.multiple {
            line.push_str(Self::checkbox(title));
        }
        if title.selected && presentation.is_selected {
            line.push('*');
            line.push_str(&item.label);
            line.push('*');
        } else {
            line.push_str(&item.label);
        }
        if item.is_disabled() {
            line.push_str(" (disabled)");
        }
        line
    }
}

//! State engine for a selectable, expandable tree control.
//!
//! The engine tracks which nodes are open and which are selected, applies
//! the selection policy (exclusive, independent or strict checkbox-style
//! cascading) and derives per-node view flags such as half-checked status.
//! Drawing is left to a [`TreeRenderer`].

pub mod config;
pub mod error;
pub mod events;
pub mod expansion;
pub mod graph;
pub mod item;
pub mod key;
pub mod key_set;
pub mod reconcile;
pub mod render;
pub mod selection;
pub mod state;
pub mod view;

pub use config::{Presentation, TreeConfig};
pub use error::TreeError;
pub use events::{ClickEvent, ClickTarget, ExpandEvent, Modifiers, Position, SelectEvent};
pub use graph::{NodeGraph, NodeId};
pub use item::{TreeItem, TreeNode, load_nodes};
pub use key::{KeySet, TreeKey};
pub use reconcile::ExternalKeys;
pub use render::{RenderTitleNode, TextRenderer, TreeRenderer};
pub use selection::SelectionPolicy;
pub use state::{EngineState, Tree, TreeId};
pub use view::NodeView;

pub mod prelude {
    pub use crate::config::TreeConfig;
    pub use crate::events::{ClickEvent, Modifiers, Position};
    pub use crate::item::{TreeItem, TreeNode};
    pub use crate::key::{KeySet, TreeKey};
    pub use crate::reconcile::ExternalKeys;
    pub use crate::render::{TextRenderer, TreeRenderer};
    pub use crate::state::Tree;
}

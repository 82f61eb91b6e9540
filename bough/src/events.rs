//! Interaction events and callback payloads.

use crate::key::{KeySet, TreeKey};

/// Modifier keys state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Control key held
    pub ctrl: bool,
    /// Shift key held
    pub shift: bool,
    /// Alt key held
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
    };
}

/// Which part of a node row was clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The expand/collapse switcher
    Switcher,
    /// The title
    Title,
}

/// Position in terminal cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    /// Column (0-indexed)
    pub x: u16,
    /// Row (0-indexed)
    pub y: u16,
}

impl Position {
    /// Create a new position
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// The interaction that triggered a state change.
///
/// The engine never inspects it; it is handed back to callbacks as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    /// Part of the row that was hit
    pub target: ClickTarget,
    /// Position where click occurred (for mouse)
    pub position: Position,
    /// Modifier keys held during click
    pub modifiers: Modifiers,
}

impl ClickEvent {
    /// A click on the switcher
    pub fn switcher(position: Position, modifiers: Modifiers) -> Self {
        Self {
            target: ClickTarget::Switcher,
            position,
            modifiers,
        }
    }

    /// A click on the title
    pub fn title(position: Position, modifiers: Modifiers) -> Self {
        Self {
            target: ClickTarget::Title,
            position,
            modifiers,
        }
    }
}

/// Payload of the expand callback.
#[derive(Debug)]
pub struct ExpandEvent<'a, T> {
    /// Key of the toggled node.
    pub key: &'a TreeKey,
    /// Whether the node is now open.
    pub expanded: bool,
    /// The toggled item.
    pub node: &'a T,
    /// The originating click.
    pub origin: &'a ClickEvent,
}

/// Payload of the selection callback.
#[derive(Debug)]
pub struct SelectEvent<'a, T> {
    /// All selected keys after the change.
    pub selected_keys: &'a KeySet,
    /// Key of the clicked node.
    pub key: &'a TreeKey,
    /// Whether the clicked node is now selected.
    pub selected: bool,
    /// The clicked item.
    pub node: &'a T,
    /// The originating click.
    pub origin: &'a ClickEvent,
}

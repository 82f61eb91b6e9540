//! Cursor, scrolling and key handling on top of a [`Tree`].

use log::{debug, info};
use unicode_width::UnicodeWidthStr;

use bough::{ClickEvent, Modifiers, NodeView, Position, TextRenderer, Tree, TreeNode};

use crate::input::Action;

/// Width of one indent level and of the switcher, in cells.
const UNIT_WIDTH: u16 = 2;

/// One screen worth of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub lines: Vec<String>,
    /// Row drawn as the cursor.
    pub highlight: Option<usize>,
}

pub struct App {
    tree: Tree<TreeNode>,
    /// Index into the visible nodes.
    cursor: usize,
    /// First visible node shown on screen.
    offset: usize,
    redraw: bool,
    quit: bool,
}

impl App {
    pub fn new(tree: Tree<TreeNode>) -> Self {
        let tree = tree
            .on_expand(|event| {
                let verb = if event.expanded { "Opened" } else { "Closed" };
                info!("{} {} ({})", verb, event.key, event.node.label);
            })
            .on_selected(|event| {
                info!(
                    "{} {}; selection is now [{}]",
                    if event.selected { "Selected" } else { "Deselected" },
                    event.key,
                    event.selected_keys.joined()
                );
            });
        tree.mount();
        Self {
            tree,
            cursor: 0,
            offset: 0,
            redraw: true,
            quit: false,
        }
    }

    pub fn tree(&self) -> &Tree<TreeNode> {
        &self.tree
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether anything changed since the last call.
    pub fn take_redraw(&mut self) -> bool {
        let redraw = self.redraw || self.tree.is_dirty();
        self.redraw = false;
        self.tree.clear_dirty();
        redraw
    }

    fn current(&self, visible: &[NodeView]) -> Option<NodeView> {
        visible.get(self.cursor).cloned()
    }

    fn screen_row(&self) -> u16 {
        u16::try_from(self.cursor.saturating_sub(self.offset)).unwrap_or(u16::MAX)
    }

    fn switcher_click(&self, view: &NodeView) -> ClickEvent {
        let x = view.depth.saturating_mul(UNIT_WIDTH);
        ClickEvent::switcher(Position::new(x, self.screen_row()), Modifiers::NONE)
    }

    fn title_click(&self, view: &NodeView) -> ClickEvent {
        let x = view.depth.saturating_add(1).saturating_mul(UNIT_WIDTH);
        ClickEvent::title(Position::new(x, self.screen_row()), Modifiers::NONE)
    }

    /// Apply one action. `body_height` is the number of tree rows on screen.
    pub fn handle(&mut self, action: Action, body_height: usize) {
        let visible = self.tree.visible_views();
        self.redraw = true;

        match action {
            Action::Up => self.cursor = self.cursor.saturating_sub(1),
            Action::Down => {
                if self.cursor + 1 < visible.len() {
                    self.cursor += 1;
                }
            }
            Action::Open => {
                if let Some(view) = self.current(&visible) {
                    if !view.no_child && !view.open {
                        self.tree.toggle_expansion(view.id, &self.switcher_click(&view));
                    } else if view.open
                        && visible.get(self.cursor + 1).is_some_and(|v| v.parent == Some(view.id))
                    {
                        self.cursor += 1;
                    }
                }
            }
            Action::Close => {
                if let Some(view) = self.current(&visible) {
                    if view.open {
                        self.tree.toggle_expansion(view.id, &self.switcher_click(&view));
                    } else if let Some(parent) = view.parent
                        && let Some(row) = visible.iter().position(|v| v.id == parent)
                    {
                        self.cursor = row;
                    }
                }
            }
            Action::ToggleOpen => {
                if let Some(view) = self.current(&visible) {
                    self.tree.toggle_expansion(view.id, &self.switcher_click(&view));
                }
            }
            Action::ToggleSelect => {
                if let Some(view) = self.current(&visible) {
                    self.tree.toggle_selection(view.id, &self.title_click(&view));
                }
            }
            Action::Click { position, modifiers } => {
                let row = usize::from(position.y);
                if row >= body_height {
                    return;
                }
                let Some(view) = visible.get(self.offset + row) else {
                    return;
                };
                self.cursor = self.offset + row;
                let switcher_start = view.depth.saturating_mul(UNIT_WIDTH);
                if position.x >= switcher_start && position.x < switcher_start.saturating_add(UNIT_WIDTH) {
                    self.tree
                        .toggle_expansion(view.id, &ClickEvent::switcher(position, modifiers));
                } else {
                    self.tree
                        .toggle_selection(view.id, &ClickEvent::title(position, modifiers));
                }
            }
            Action::Resize => {}
            Action::Quit => {
                debug!("Quit requested");
                self.quit = true;
            }
        }

        let count = self.tree.visible_views().len();
        self.cursor = self.cursor.min(count.saturating_sub(1));
    }

    /// Lay out the tree rows plus a status line for a `width` x `height`
    /// screen.
    pub fn frame(&mut self, width: u16, height: u16) -> Frame {
        let width = usize::from(width);
        let body = usize::from(height.saturating_sub(1));

        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if body > 0 && self.cursor >= self.offset + body {
            self.offset = self.cursor + 1 - body;
        }

        let rendered = self.tree.render_with(&TextRenderer);
        let mut lines: Vec<String> = rendered
            .iter()
            .skip(self.offset)
            .take(body)
            .map(|line| clip(line, width))
            .collect();
        let highlight = (!lines.is_empty()).then(|| self.cursor - self.offset);

        let status = format!(
            "{} selected | {} open | space select, enter toggle, q quit",
            self.tree.selected_keys().len(),
            self.tree.open_keys().len()
        );
        lines.push(clip(&status, width));

        Frame { lines, highlight }
    }
}

/// Cut `s` to `max_width` cells, ending with `…` when shortened.
pub fn clip(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let Some(room) = max_width.checked_sub(1) else {
        return String::new();
    };
    // Longest char-aligned prefix that leaves a cell for the ellipsis.
    let end = s
        .char_indices()
        .map(|(start, ch)| start + ch.len_utf8())
        .take_while(|&end| s[..end].width() <= room)
        .last()
        .unwrap_or(0);
    format!("{}…", &s[..end])
}

#[cfg(test)]
mod tests {
    use bough::TreeConfig;

    use super::*;

    fn app() -> App {
        let data = vec![
            TreeNode::new("src", "src").with_children(vec![
                TreeNode::new("main", "main"),
                TreeNode::new("lib", "lib"),
            ]),
            TreeNode::new("docs", "docs"),
        ];
        App::new(Tree::new(data, TreeConfig::new().checkable()).unwrap())
    }

    fn body(frame: &Frame) -> &[String] {
        &frame.lines[..frame.lines.len() - 1]
    }

    #[test]
    fn test_initial_frame() {
        let mut app = app();
        let frame = app.frame(60, 10);
        assert_eq!(body(&frame), ["▸ [ ] src", "  [ ] docs"]);
        assert_eq!(frame.highlight, Some(0));
        assert!(frame.lines[2].starts_with("0 selected | 0 open"));
    }

    #[test]
    fn test_open_select_and_step_out() {
        let mut app = app();
        app.handle(Action::Open, 9);
        app.handle(Action::Down, 9);
        app.handle(Action::ToggleSelect, 9);

        let frame = app.frame(60, 10);
        assert_eq!(
            body(&frame),
            ["▾ [-] src", "    [x] *main*", "    [ ] lib", "  [ ] docs"]
        );
        assert_eq!(frame.highlight, Some(1));

        app.handle(Action::Close, 9);
        assert_eq!(app.frame(60, 10).highlight, Some(0));
        app.handle(Action::Close, 9);
        assert!(!app.tree().is_open(&"src".into()));
    }

    #[test]
    fn test_open_on_open_node_steps_in() {
        let mut app = app();
        app.handle(Action::Open, 9);
        app.handle(Action::Open, 9);
        assert_eq!(app.frame(60, 10).highlight, Some(1));
    }

    #[test]
    fn test_mouse_click_targets() {
        let mut app = app();
        let click = |x, y| Action::Click {
            position: Position::new(x, y),
            modifiers: Modifiers::NONE,
        };

        app.handle(click(0, 0), 9);
        assert!(app.tree().is_open(&"src".into()));

        app.handle(click(6, 3), 9);
        assert!(app.tree().is_selected(&"docs".into()));
        assert_eq!(app.frame(60, 10).highlight, Some(3));

        // Below the last row.
        app.handle(click(0, 7), 9);
        assert_eq!(app.tree().selected_keys().len(), 1);
    }

    #[test]
    fn test_cursor_stops_at_last_row() {
        let mut app = app();
        app.handle(Action::Open, 9);
        for _ in 0..3 {
            app.handle(Action::Down, 9);
        }
        app.handle(Action::Down, 9);
        assert_eq!(app.frame(60, 10).highlight, Some(3));
    }

    #[test]
    fn test_scrolls_to_cursor() {
        let mut app = app();
        app.handle(Action::Open, 2);
        app.handle(Action::Down, 2);
        app.handle(Action::Down, 2);

        let frame = app.frame(60, 3);
        assert_eq!(body(&frame), ["    [ ] main", "    [ ] lib"]);
        assert_eq!(frame.highlight, Some(1));
    }

    #[test]
    fn test_redraw_tracking() {
        let mut app = app();
        assert!(app.take_redraw());
        assert!(!app.take_redraw());
        app.handle(Action::Up, 9);
        assert!(app.take_redraw());
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        app.handle(Action::Quit, 9);
        assert!(app.should_quit());
    }

    #[test]
    fn test_clip() {
        assert_eq!(clip("abcdef", 10), "abcdef");
        assert_eq!(clip("abcdef", 4), "abc…");
        assert_eq!(clip("日本語", 5), "日本…");
        assert_eq!(clip("日本語", 2), "…");
        assert_eq!(clip("abc", 0), "");
    }
}

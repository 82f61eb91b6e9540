//! Convert crossterm events to demo actions.

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use log::trace;

use bough::{Modifiers, Position};

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    /// Open the node under the cursor, or step into it when already open.
    Open,
    /// Close the node under the cursor, or step out to its parent.
    Close,
    /// Flip the node under the cursor.
    ToggleOpen,
    ToggleSelect,
    Click {
        position: Position,
        modifiers: Modifiers,
    },
    Resize,
    Quit,
}

fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        shift: mods.contains(KeyModifiers::SHIFT),
        alt: mods.contains(KeyModifiers::ALT),
    }
}

fn convert_key_event(event: KeyEvent) -> Option<Action> {
    if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    match event.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::Down),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::Open),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::Close),
        KeyCode::Enter => Some(Action::ToggleOpen),
        KeyCode::Char(' ') => Some(Action::ToggleSelect),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

fn convert_mouse_event(event: MouseEvent) -> Option<Action> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Action::Click {
            position: Position::new(event.column, event.row),
            modifiers: convert_modifiers(event.modifiers),
        }),
        MouseEventKind::ScrollUp => Some(Action::Up),
        MouseEventKind::ScrollDown => Some(Action::Down),
        _ => None,
    }
}

/// Convert a crossterm event, dropping the ones the demo ignores.
pub fn convert_event(event: CrosstermEvent) -> Option<Action> {
    match event {
        CrosstermEvent::Key(key_event) => {
            trace!(
                "Key event: code={:?}, modifiers={:?}, kind={:?}",
                key_event.code, key_event.modifiers, key_event.kind
            );
            // Only handle key press events, not release or repeat
            if key_event.kind != KeyEventKind::Press {
                return None;
            }
            convert_key_event(key_event)
        }
        CrosstermEvent::Mouse(mouse_event) => convert_mouse_event(mouse_event),
        CrosstermEvent::Resize(_, _) => Some(Action::Resize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> CrosstermEvent {
        CrosstermEvent::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_keys() {
        assert_eq!(convert_event(press(KeyCode::Char(' '), KeyModifiers::NONE)), Some(Action::ToggleSelect));
        assert_eq!(convert_event(press(KeyCode::Enter, KeyModifiers::NONE)), Some(Action::ToggleOpen));
        assert_eq!(convert_event(press(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(Action::Quit));
        assert_eq!(convert_event(press(KeyCode::Char('x'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_release_ignored() {
        let mut event = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(convert_event(CrosstermEvent::Key(event)), None);
    }

    #[test]
    fn test_left_click() {
        let event = CrosstermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 4,
            row: 2,
            modifiers: KeyModifiers::SHIFT,
        });
        assert_eq!(
            convert_event(event),
            Some(Action::Click {
                position: Position::new(4, 2),
                modifiers: Modifiers {
                    shift: true,
                    ..Modifiers::NONE
                },
            })
        );
    }
}

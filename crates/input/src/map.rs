//! Key and mouse mapping from terminal events to game input.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Map keyboard input to game actions.
///
/// Arrows, WASD and hjkl slide the tiles; `r` restarts a finished game.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char('k') | KeyCode::Char('K') => {
            Some(GameAction::MoveUp)
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('j') | KeyCode::Char('J') => {
            Some(GameAction::MoveDown)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('h') | KeyCode::Char('H') => {
            Some(GameAction::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('l') | KeyCode::Char('L') => {
            Some(GameAction::MoveRight)
        }

        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Pointer input in terminal cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Pointer moved (with or without a button held).
    Moved { x: u16, y: u16 },
    /// Left button pressed.
    Clicked { x: u16, y: u16 },
}

impl PointerEvent {
    pub fn position(&self) -> (u16, u16) {
        match *self {
            PointerEvent::Moved { x, y } | PointerEvent::Clicked { x, y } => (x, y),
        }
    }
}

/// Reduce a mouse event to a pointer event. Scrolls, releases and other
/// buttons are ignored.
pub fn handle_mouse_event(mouse: MouseEvent) -> Option<PointerEvent> {
    let (x, y) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(PointerEvent::Clicked { x, y }),
        MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(PointerEvent::Moved { x, y }),
        _ => None,
    }
}

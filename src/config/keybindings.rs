//! Keyboard bindings for the terminal demo.

use crate::model::key_action::KeyAction;
use crate::model::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to demo actions.
///
/// Arrow keys and vim-style `h j k l` drive the D-pad; everything else is
/// a demo control.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<(KeyCode, KeyModifiers), KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Release events never map to an action; modifier state is compared
    /// exactly except that SHIFT is ignored for character keys, whose case
    /// already carries it.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let modifiers = match key.code {
            KeyCode::Char(_) => key.modifiers.difference(KeyModifiers::SHIFT),
            _ => key.modifiers,
        };
        self.bindings.get(&(key.code, modifiers)).copied()
    }

    /// Bind `code` (with `modifiers`) to `action`, replacing any previous binding.
    pub fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert((code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };
        let none = KeyModifiers::NONE;

        for (code, direction) in [
            (KeyCode::Left, Direction::Left),
            (KeyCode::Right, Direction::Right),
            (KeyCode::Up, Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Char('h'), Direction::Left),
            (KeyCode::Char('l'), Direction::Right),
            (KeyCode::Char('k'), Direction::Up),
            (KeyCode::Char('j'), Direction::Down),
        ] {
            keys.bind(code, none, KeyAction::Move(direction));
        }

        keys.bind(KeyCode::Enter, none, KeyAction::Activate);
        keys.bind(KeyCode::Char(' '), none, KeyAction::Activate);

        keys.bind(KeyCode::Char('g'), none, KeyAction::SelectFirst);
        keys.bind(KeyCode::Home, none, KeyAction::SelectFirst);
        keys.bind(KeyCode::Char('G'), none, KeyAction::SelectLast);
        keys.bind(KeyCode::End, none, KeyAction::SelectLast);

        keys.bind(KeyCode::Char('o'), none, KeyAction::ToggleOrientation);
        keys.bind(KeyCode::Char('s'), none, KeyAction::CycleStrategy);

        keys.bind(KeyCode::Char('q'), none, KeyAction::Quit);
        keys.bind(KeyCode::Esc, none, KeyAction::Quit);
        keys.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        keys
    }
}

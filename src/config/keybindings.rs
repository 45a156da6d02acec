//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::KeyEvent;
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Viewport actions share keys with the editor (arrows, `+`, `-`, `0`); the
/// caller decides by focus whether such a binding applies, see
/// [`KeyAction::is_viewport_action`].
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use crossterm::event::{KeyCode, KeyModifiers};

        let mut bindings = HashMap::new();

        // Application controls
        bindings.insert(
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
            KeyAction::Quit,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            KeyAction::Quit,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE),
            KeyAction::CycleFocus,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
            KeyAction::Export,
        );

        // Options
        bindings.insert(
            KeyEvent::new(KeyCode::F(2), KeyModifiers::NONE),
            KeyAction::NextAlgorithm,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::F(2), KeyModifiers::SHIFT),
            KeyAction::PrevAlgorithm,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::F(3), KeyModifiers::NONE),
            KeyAction::ToggleFormat,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::F(4), KeyModifiers::NONE),
            KeyAction::ToggleRaw,
        );

        // Divider
        bindings.insert(
            KeyEvent::new(KeyCode::Left, KeyModifiers::ALT),
            KeyAction::DividerLeft,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Right, KeyModifiers::ALT),
            KeyAction::DividerRight,
        );

        // Viewport zoom; '+' arrives with SHIFT on most layouts
        bindings.insert(
            KeyEvent::new(KeyCode::Char('+'), KeyModifiers::NONE),
            KeyAction::ZoomIn,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('+'), KeyModifiers::SHIFT),
            KeyAction::ZoomIn,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('='), KeyModifiers::NONE),
            KeyAction::ZoomIn,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('-'), KeyModifiers::NONE),
            KeyAction::ZoomOut,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('0'), KeyModifiers::NONE),
            KeyAction::ResetZoom,
        );

        // Viewport pan
        bindings.insert(
            KeyEvent::new(KeyCode::Left, KeyModifiers::NONE),
            KeyAction::PanLeft,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Right, KeyModifiers::NONE),
            KeyAction::PanRight,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
            KeyAction::PanUp,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            KeyAction::PanDown,
        );

        Self { bindings }
    }
}

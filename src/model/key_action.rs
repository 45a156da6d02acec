//! Domain-level keyboard actions independent of key bindings.

/// Actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
/// Plain character input in the editor is not an action; it goes straight
/// to the editor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application. Default: Ctrl+q
    Quit,
    /// Move keyboard focus between editor and output pane. Default: Tab
    CycleFocus,

    // Options
    /// Select the next algorithm. Default: F2
    NextAlgorithm,
    /// Select the previous algorithm. Default: Shift+F2
    PrevAlgorithm,
    /// Switch between svg and png. Default: F3
    ToggleFormat,
    /// Toggle raw (textual) output. Default: F4
    ToggleRaw,

    /// Write the current artifact to the export directory. Default: Ctrl+s
    Export,

    // Split panes
    /// Move the divider left. Default: Alt+Left
    DividerLeft,
    /// Move the divider right. Default: Alt+Right
    DividerRight,

    // Viewport (output pane focus only)
    /// Default: +
    ZoomIn,
    /// Default: -
    ZoomOut,
    /// Re-fit and re-center the graph. Default: 0
    ResetZoom,
    /// Default: Left
    PanLeft,
    /// Default: Right
    PanRight,
    /// Default: Up
    PanUp,
    /// Default: Down
    PanDown,
}

impl KeyAction {
    /// Actions that only make sense while the output pane has focus.
    ///
    /// With the editor focused the same keys edit text instead.
    pub fn is_viewport_action(self) -> bool {
        matches!(
            self,
            KeyAction::ZoomIn
                | KeyAction::ZoomOut
                | KeyAction::ResetZoom
                | KeyAction::PanLeft
                | KeyAction::PanRight
                | KeyAction::PanUp
                | KeyAction::PanDown
        )
    }
}

//! Two horizontally split panes with a draggable divider.
//!
//! The only contract the update pipeline relies on is the resize
//! notification emitted when a drag ends.

/// Default editor share in percent.
pub const DEFAULT_EDITOR_PERCENT: u16 = 25;
/// Neither pane may shrink below this share.
pub const MIN_PANE_PERCENT: u16 = 10;
/// Keyboard nudge size in percent.
pub const NUDGE_PERCENT: u16 = 5;

/// Editor/output split with a draggable divider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPanes {
    editor_percent: u16,
    dragging: bool,
}

impl Default for SplitPanes {
    fn default() -> Self {
        Self::new(DEFAULT_EDITOR_PERCENT)
    }
}

impl SplitPanes {
    /// Split with the editor taking `editor_percent`, clamped to the limits.
    pub fn new(editor_percent: u16) -> Self {
        Self {
            editor_percent: clamp_percent(editor_percent),
            dragging: false,
        }
    }

    /// Editor share in percent.
    pub fn editor_percent(&self) -> u16 {
        self.editor_percent
    }

    /// Output share in percent.
    pub fn output_percent(&self) -> u16 {
        100 - self.editor_percent
    }

    /// Whether a mouse drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Start dragging the divider.
    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    /// Move the divider to column `x` of a body `width` columns wide.
    pub fn drag_to(&mut self, x: u16, width: u16) {
        if !self.dragging || width == 0 {
            return;
        }
        let percent = (u32::from(x) * 100 / u32::from(width)).min(100) as u16;
        self.editor_percent = clamp_percent(percent);
    }

    /// Shift the divider by `delta` percent as one complete drag.
    pub fn nudge(&mut self, delta: i16) {
        self.begin_drag();
        let moved = (i32::from(self.editor_percent) + i32::from(delta)).clamp(0, 100) as u16;
        self.editor_percent = clamp_percent(moved);
    }

    /// Release the divider. Returns `true` when a drag was in progress,
    /// which is the "pane resized" notification.
    pub fn end_drag(&mut self) -> bool {
        std::mem::replace(&mut self.dragging, false)
    }

    /// Column of the divider within a body `width` columns wide.
    pub fn divider_column(&self, width: u16) -> u16 {
        (u32::from(width) * u32::from(self.editor_percent) / 100) as u16
    }
}

fn clamp_percent(percent: u16) -> u16 {
    percent.clamp(MIN_PANE_PERCENT, 100 - MIN_PANE_PERCENT)
}

//! Application state and transitions.
//!
//! AppState is the root state type. It holds the editor text, the current
//! options, the latest result and the pipeline status shown to the user.
//! The output pane itself is owned by the render dispatcher.

use crate::model::{Options, ResultModel};
use crate::state::editor::EditorBuffer;
use crate::state::split::SplitPanes;

// ===== AppState =====

/// Application state. Pure data, no side effects.
///
/// # State Machine
///
/// The update pipeline moves between three states:
///
/// - **Idle**: the latest cycle succeeded (or nothing has run yet)
/// - **Computing**: a cycle is in flight; the busy indicator is on
/// - **Error**: the latest cycle failed; the error slot holds its message
///
/// Idle/Error → Computing on every recompute trigger, Computing → Idle or
/// Error when the cycle completes.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Grammar or regular expression text being edited.
    pub editor: EditorBuffer,

    /// Options as currently selected by the user. Mutated only by the
    /// update coordinator so every change goes through the pipeline.
    pub options: Options,

    /// Latest computation result tagged with the options it used.
    pub results: ResultModel,

    pipeline: PipelineState,

    /// Busy indicator, set for the duration of a compute cycle.
    busy: bool,

    /// Last error message. Shown only while the pipeline is in `Error`.
    error_slot: Option<String>,

    /// Which pane receives keyboard input.
    pub focus: FocusPane,

    /// Divider position between editor and output.
    pub split: SplitPanes,

    /// Transient status bar message (e.g. export location).
    pub notice: Option<String>,
}

impl AppState {
    /// Idle state holding `editor` and `options`.
    pub fn new(editor: EditorBuffer, options: Options) -> Self {
        Self {
            editor,
            options,
            ..Self::default()
        }
    }

    /// Current pipeline state.
    pub fn pipeline(&self) -> PipelineState {
        self.pipeline
    }

    /// Whether a compute cycle is running.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Error text to display, if the pipeline is in the error state.
    pub fn error_message(&self) -> Option<&str> {
        match self.pipeline {
            PipelineState::Error => self.error_slot.as_deref(),
            _ => None,
        }
    }

    /// Enter `Computing`: busy on, error marker off.
    pub fn begin_computing(&mut self) {
        self.pipeline = PipelineState::Computing;
        self.busy = true;
    }

    /// Leave `Computing` without choosing the next state yet.
    pub fn end_computing(&mut self) {
        self.busy = false;
    }

    /// Enter `Idle` after a successful cycle.
    pub fn mark_idle(&mut self) {
        self.pipeline = PipelineState::Idle;
    }

    /// Enter `Error`, replacing any previously displayed message.
    pub fn mark_error(&mut self, message: impl Into<String>) {
        self.pipeline = PipelineState::Error;
        self.error_slot = Some(message.into());
    }

    /// Move focus to the other pane.
    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPane::Editor => FocusPane::Output,
            FocusPane::Output => FocusPane::Editor,
        };
    }
}

// ===== PipelineState =====

/// Status of the update pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    /// Waiting for input.
    #[default]
    Idle,
    /// A compute cycle is running.
    Computing,
    /// The last cycle failed; the error slot shows why.
    Error,
}

impl PipelineState {
    /// Short label for the header bar.
    pub fn label(&self) -> &'static str {
        match self {
            PipelineState::Idle => "ready",
            PipelineState::Computing => "working",
            PipelineState::Error => "error",
        }
    }
}

// ===== FocusPane =====

/// Which pane currently has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPane {
    /// Text input goes to the editor.
    #[default]
    Editor,
    /// Zoom and pan keys drive the output viewport.
    Output,
}

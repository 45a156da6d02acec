//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI. The
//! coordinator is the only place where the engine and the render dispatcher
//! are driven.

pub mod app_state;
pub mod coordinator;
pub mod editor;
pub mod split;

// Re-export for convenience
pub use app_state::{AppState, FocusPane, PipelineState};
pub use coordinator::{PumpReport, Signal, UpdateCoordinator};
pub use editor::{Cursor, EditorBuffer};
pub use split::SplitPanes;

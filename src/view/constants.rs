//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

/// Height of the header bar in lines.
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the status bar in lines.
///
/// Single line for status text and keyboard hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Height of the error slot below the editor, borders included.
pub const ERROR_SLOT_HEIGHT: u16 = 5;

/// Rows taken by the zoom control strip at the top of the output pane.
pub const CONTROL_STRIP_HEIGHT: u16 = 1;

/// Points per terminal column when mapping the output pane to viewport units.
///
/// Graphviz sizes are in points; a terminal cell is roughly twice as tall
/// as it is wide.
pub const CELL_WIDTH_POINTS: f64 = 8.0;

/// Points per terminal row.
pub const CELL_HEIGHT_POINTS: f64 = 16.0;

/// Columns moved by one pan key press.
pub const PAN_STEP_CELLS: f64 = 4.0;

/// Columns on either side of the divider that start a mouse drag.
pub const DIVIDER_GRAB_TOLERANCE: u16 = 1;

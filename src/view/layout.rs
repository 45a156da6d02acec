//! Split pane layout rendering.
//!
//! Pure layout logic: area calculation for header, editor, error slot,
//! output pane and status bar, plus the widgets drawn into them.

use crate::render::RenderDispatcher;
use crate::state::{AppState, FocusPane, SplitPanes};
use crate::view::constants::{ERROR_SLOT_HEIGHT, HEADER_HEIGHT, STATUS_BAR_HEIGHT};
use crate::view::output_pane::{canvas_extent, split_canvas, OutputPaneView};
use crate::view::styles::PaneStyles;
use crate::viewport::Extent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Screen regions of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaneAreas {
    /// Title bar with options and pipeline state.
    pub header: Rect,
    /// Editor column plus output pane; the divider lives here.
    pub body: Rect,
    /// Grammar editor.
    pub editor: Rect,
    /// Present only while an error is displayed.
    pub error: Option<Rect>,
    /// Output pane, right of the divider.
    pub output: Rect,
    /// Status bar with hints or the current notice.
    pub status: Rect,
}

impl PaneAreas {
    /// Absolute column of the divider between the two panes.
    pub fn divider_x(&self) -> u16 {
        self.output.x
    }
}

/// Split `frame_area` into header, body and status bar, then the body into
/// the editor column and the output pane at the divider.
///
/// The error slot takes rows from the editor column only, so showing an
/// error never changes the output pane size.
pub fn calculate_areas(frame_area: Rect, split: &SplitPanes, show_error: bool) -> PaneAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(frame_area);

    let body = vertical[1];
    let editor_width = split.divider_column(body.width);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(editor_width), Constraint::Min(0)])
        .split(body);

    let (editor, error) = if show_error {
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(ERROR_SLOT_HEIGHT)])
            .split(horizontal[0]);
        (left[0], Some(left[1]))
    } else {
        (horizontal[0], None)
    };

    PaneAreas {
        header: vertical[0],
        body,
        editor,
        error,
        output: horizontal[1],
        status: vertical[2],
    }
}

/// Viewport container size for an output pane drawn in `output`.
pub fn output_container(output: Rect, control_icons: bool) -> Extent {
    let inner = Block::default().borders(Borders::ALL).inner(output);
    let (_, canvas) = split_canvas(inner, control_icons);
    canvas_extent(canvas)
}

/// Render every pane into `frame`.
pub fn render_layout(
    frame: &mut Frame,
    areas: &PaneAreas,
    state: &AppState,
    dispatcher: &RenderDispatcher,
    styles: &PaneStyles,
) {
    render_header(frame, areas.header, state, styles);
    render_editor(frame, areas.editor, state, styles);

    if let (Some(area), Some(message)) = (areas.error, state.error_message()) {
        render_error_slot(frame, area, message, styles);
    }

    let output = OutputPaneView::new(
        dispatcher.pane(),
        dispatcher.viewport(),
        styles,
        state.focus == FocusPane::Output,
    );
    frame.render_widget(output, areas.output);

    render_status_bar(frame, areas.status, state, styles);
}

/// Header: current options and pipeline state.
fn render_header(frame: &mut Frame, area: Rect, state: &AppState, styles: &PaneStyles) {
    let options = &state.options;
    let raw = if options.raw_mode { "raw" } else { "presented" };
    let header_text = format!(
        "gramviz | {} | {} | {} | {}",
        options.algorithm,
        options.format,
        raw,
        state.pipeline().label()
    );

    let paragraph = Paragraph::new(Line::from(header_text)).style(styles.header(state.pipeline()));
    frame.render_widget(paragraph, area);
}

/// Editor pane with the cursor kept in view.
fn render_editor(frame: &mut Frame, area: Rect, state: &AppState, styles: &PaneStyles) {
    let focused = state.focus == FocusPane::Editor;
    let block = Block::default()
        .title(" Grammar ")
        .borders(Borders::ALL)
        .border_style(styles.border(focused));
    let inner = block.inner(area);

    let cursor = state.editor.cursor();
    let cursor_x = state.editor.display_column();
    let scroll_y = cursor.line.saturating_sub(usize::from(inner.height.saturating_sub(1)));
    let scroll_x = cursor_x.saturating_sub(usize::from(inner.width.saturating_sub(1)));

    let lines: Vec<Line> = state
        .editor
        .lines()
        .iter()
        .map(|l| Line::from(l.as_str()))
        .collect();
    let scroll = (
        u16::try_from(scroll_y).unwrap_or(u16::MAX),
        u16::try_from(scroll_x).unwrap_or(u16::MAX),
    );
    frame.render_widget(Paragraph::new(lines).block(block).scroll(scroll), area);

    if focused && inner.width > 0 && inner.height > 0 {
        // Both offsets are below the inner size after scrolling.
        let x = inner.x + u16::try_from(cursor_x - scroll_x).unwrap_or(0);
        let y = inner.y + u16::try_from(cursor.line - scroll_y).unwrap_or(0);
        frame.set_cursor_position(Position::new(x, y));
    }
}

fn render_error_slot(frame: &mut Frame, area: Rect, message: &str, styles: &PaneStyles) {
    let block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .border_style(styles.error());
    let paragraph = Paragraph::new(message)
        .style(styles.error())
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(paragraph, area);
}

/// Keyboard hints for the focused pane.
fn build_keyboard_hints(focus: FocusPane) -> &'static str {
    match focus {
        FocusPane::Editor => {
            "Ctrl+Q quit | Tab focus | F2 algorithm | F3 format | F4 raw | Ctrl+S export | Alt+←/→ resize"
        }
        FocusPane::Output => {
            "Ctrl+Q quit | Tab focus | +/- zoom | 0 reset | arrows pan | Ctrl+S export"
        }
    }
}

/// Status bar: the last notice if any, keyboard hints otherwise.
fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, styles: &PaneStyles) {
    let status_text = match &state.notice {
        Some(notice) => notice.as_str(),
        None => build_keyboard_hints(state.focus),
    };

    let paragraph = Paragraph::new(Line::from(status_text)).style(styles.status());
    frame.render_widget(paragraph, area);
}

// ===== Tests =====

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;

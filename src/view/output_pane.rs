//! Output pane widget.
//!
//! Reconciles the terminal with [`OutputPaneState`]: blank, literal text,
//! a framed graph description placed by the viewport transform, or a raster
//! image summary.

use crate::model::{KeyAction, OutputFormat};
use crate::render::{DisplayedImage, ImageArtifact, OutputPaneState};
use crate::view::constants::{CELL_HEIGHT_POINTS, CELL_WIDTH_POINTS, CONTROL_STRIP_HEIGHT};
use crate::view::styles::PaneStyles;
use crate::viewport::{Extent, Transform, ViewportController};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Output pane widget.
pub struct OutputPaneView<'a> {
    pane: &'a OutputPaneState,
    viewport: &'a ViewportController,
    styles: &'a PaneStyles,
    focused: bool,
}

impl<'a> OutputPaneView<'a> {
    /// Widget over the dispatcher's pane and viewport.
    pub fn new(
        pane: &'a OutputPaneState,
        viewport: &'a ViewportController,
        styles: &'a PaneStyles,
        focused: bool,
    ) -> Self {
        Self {
            pane,
            viewport,
            styles,
            focused,
        }
    }

    fn title(&self) -> &'static str {
        match self.pane {
            OutputPaneState::Empty => " Output ",
            OutputPaneState::TextDisplayed(_) => " Output (text) ",
            OutputPaneState::ImageDisplayed(image) => match image.format {
                OutputFormat::Svg => " Output (svg) ",
                OutputFormat::Png => " Output (png) ",
            },
        }
    }
}

impl<'a> Widget for OutputPaneView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(self.title())
            .borders(Borders::ALL)
            .border_style(self.styles.border(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        match self.pane {
            OutputPaneState::Empty => {}
            OutputPaneState::TextDisplayed(text) => {
                Paragraph::new(text.as_str()).render(inner, buf);
            }
            OutputPaneState::ImageDisplayed(image) => match &image.artifact {
                ImageArtifact::Svg(_) => render_graph(image, self.viewport, inner, buf),
                ImageArtifact::Raster(raster) => {
                    let size = raster.size();
                    let lines = vec![
                        Line::from(format!("PNG image {} x {} px", size.width, size.height)),
                        Line::from(format!("{} bytes", raster.bytes().len())),
                        Line::from("Ctrl+S exports the image"),
                    ];
                    Paragraph::new(lines).render(inner, buf);
                }
            },
        }
    }
}

/// Split the pane interior into the control strip row and the canvas.
///
/// Without control icons the whole interior is canvas.
pub fn split_canvas(inner: Rect, control_icons: bool) -> (Option<Rect>, Rect) {
    if !control_icons || inner.height <= CONTROL_STRIP_HEIGHT {
        return (None, inner);
    }
    let strip = Rect::new(inner.x, inner.y, inner.width, CONTROL_STRIP_HEIGHT);
    let canvas = Rect::new(
        inner.x,
        inner.y + CONTROL_STRIP_HEIGHT,
        inner.width,
        inner.height - CONTROL_STRIP_HEIGHT,
    );
    (Some(strip), canvas)
}

/// Control strip buttons as (label, first column, action).
const CONTROL_BUTTONS: [(&str, u16, KeyAction); 3] = [
    ("[+]", 0, KeyAction::ZoomIn),
    ("[-]", 4, KeyAction::ZoomOut),
    ("[0]", 8, KeyAction::ResetZoom),
];

/// Action of the control strip button under (`column`, `row`), for an
/// output pane drawn in `output`.
pub fn control_hit(output: Rect, column: u16, row: u16) -> Option<KeyAction> {
    let inner = Block::default().borders(Borders::ALL).inner(output);
    let (strip, _) = split_canvas(inner, true);
    let strip = strip?;
    if row != strip.y || column < strip.x {
        return None;
    }
    let offset = column - strip.x;
    CONTROL_BUTTONS
        .iter()
        .find(|(label, start, _)| offset >= *start && offset < start + label.len() as u16)
        .map(|(_, _, action)| *action)
}

/// Container size of a canvas in viewport units.
pub fn canvas_extent(canvas: Rect) -> Extent {
    Extent::new(
        f64::from(canvas.width) * CELL_WIDTH_POINTS,
        f64::from(canvas.height) * CELL_HEIGHT_POINTS,
    )
}

fn render_graph(image: &DisplayedImage, viewport: &ViewportController, inner: Rect, buf: &mut Buffer) {
    let (strip, canvas) = split_canvas(inner, viewport.options().control_icons_enabled);
    let transform = viewport.transform().unwrap_or_default();

    if let Some(strip) = strip {
        let buttons: Vec<&str> = CONTROL_BUTTONS.iter().map(|(label, _, _)| *label).collect();
        let label = format!("{}  zoom {:.0}%", buttons.join(" "), transform.zoom * 100.0);
        Paragraph::new(label).render(strip, buf);
    }

    let Some(frame) = project_content(transform, image.artifact.size(), canvas) else {
        return;
    };

    let block = Block::default().borders(frame.borders);
    let content_area = block.inner(frame.area);
    block.render(frame.area, buf);
    Paragraph::new(image.description.as_str())
        .scroll(frame.scroll)
        .render(content_area, buf);
}

/// Where the transformed content lands inside a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectedFrame {
    /// Visible part of the content box.
    pub area: Rect,
    /// Sides of the box that are not clipped away.
    pub borders: Borders,
    /// (rows, columns) of content hidden above and left of the canvas.
    pub scroll: (u16, u16),
}

/// Map content placed by `transform` to terminal cells, clipped to `canvas`.
///
/// Returns `None` when nothing of the content is visible.
pub fn project_content(transform: Transform, content: Extent, canvas: Rect) -> Option<ProjectedFrame> {
    if canvas.width == 0 || canvas.height == 0 {
        return None;
    }

    let left = i64::from(canvas.x) + (transform.pan_x / CELL_WIDTH_POINTS).round() as i64;
    let top = i64::from(canvas.y) + (transform.pan_y / CELL_HEIGHT_POINTS).round() as i64;
    let width = ((content.width * transform.zoom) / CELL_WIDTH_POINTS).round().max(1.0) as i64;
    let height = ((content.height * transform.zoom) / CELL_HEIGHT_POINTS).round().max(1.0) as i64;
    let (right, bottom) = (left + width, top + height);

    let (canvas_left, canvas_top) = (i64::from(canvas.left()), i64::from(canvas.top()));
    let (canvas_right, canvas_bottom) = (i64::from(canvas.right()), i64::from(canvas.bottom()));

    let clip_left = left.max(canvas_left);
    let clip_top = top.max(canvas_top);
    let clip_right = right.min(canvas_right);
    let clip_bottom = bottom.min(canvas_bottom);
    if clip_left >= clip_right || clip_top >= clip_bottom {
        return None;
    }

    let mut borders = Borders::NONE;
    if left >= canvas_left {
        borders |= Borders::LEFT;
    }
    if top >= canvas_top {
        borders |= Borders::TOP;
    }
    if right <= canvas_right {
        borders |= Borders::RIGHT;
    }
    if bottom <= canvas_bottom {
        borders |= Borders::BOTTOM;
    }

    // The first content row/column sits behind the (possibly hidden) border.
    let hidden_rows = if borders.contains(Borders::TOP) {
        0
    } else {
        clip_top - top - 1
    };
    let hidden_columns = if borders.contains(Borders::LEFT) {
        0
    } else {
        clip_left - left - 1
    };

    // All values are inside the canvas, which is made of u16 coordinates.
    let to_u16 = |v: i64| u16::try_from(v.max(0)).unwrap_or(u16::MAX);
    Some(ProjectedFrame {
        area: Rect::new(
            to_u16(clip_left),
            to_u16(clip_top),
            to_u16(clip_right - clip_left),
            to_u16(clip_bottom - clip_top),
        ),
        borders,
        scroll: (to_u16(hidden_rows), to_u16(hidden_columns)),
    })
}

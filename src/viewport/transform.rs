//! Fit, center, zoom and pan arithmetic.

use crate::viewport::ViewportOptions;

/// Width and height in an arbitrary shared unit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    /// Horizontal size.
    pub width: f64,
    /// Vertical size.
    pub height: f64,
}

impl Extent {
    /// Empty extent, the container size before the first layout.
    pub const ZERO: Extent = Extent {
        width: 0.0,
        height: 0.0,
    };

    /// Extent of `width` by `height`.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both sides strictly positive and finite.
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Scale and translation of the content inside its container.
///
/// `pan_x`/`pan_y` are the container coordinates of the content origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Scale factor applied to the content.
    pub zoom: f64,
    /// Horizontal offset of the content origin.
    pub pan_x: f64,
    /// Vertical offset of the content origin.
    pub pan_y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

impl Transform {
    /// Transform applied on create and on every resize.
    pub fn initial(content: Extent, container: Extent, options: &ViewportOptions) -> Self {
        let measurable = content.is_usable() && container.is_usable();

        let zoom = if options.fit && measurable {
            let fit = (container.width / content.width).min(container.height / content.height);
            clamp_zoom(fit, options)
        } else {
            1.0
        };

        let (pan_x, pan_y) = if options.center && measurable {
            (
                (container.width - content.width * zoom) / 2.0,
                (container.height - content.height * zoom) / 2.0,
            )
        } else {
            (0.0, 0.0)
        };

        Self { zoom, pan_x, pan_y }
    }

    /// Zoom by `factor` keeping the container center fixed.
    pub fn zoomed(self, factor: f64, container: Extent, options: &ViewportOptions) -> Self {
        let zoom = clamp_zoom(self.zoom * factor, options);
        let ratio = zoom / self.zoom;
        let cx = container.width / 2.0;
        let cy = container.height / 2.0;
        Self {
            zoom,
            pan_x: cx - (cx - self.pan_x) * ratio,
            pan_y: cy - (cy - self.pan_y) * ratio,
        }
    }

    /// Translated by `dx`, `dy` with the zoom unchanged.
    pub fn panned(self, dx: f64, dy: f64) -> Self {
        Self {
            pan_x: self.pan_x + dx,
            pan_y: self.pan_y + dy,
            ..self
        }
    }
}

/// Inverted bounds resolve to `max_zoom` instead of panicking.
fn clamp_zoom(zoom: f64, options: &ViewportOptions) -> f64 {
    zoom.max(options.min_zoom).min(options.max_zoom)
}

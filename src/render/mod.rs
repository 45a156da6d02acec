//! Output-pane rendering.
//!
//! - [`presentation`] decides which of the three presentation modes applies
//! - [`dispatcher`] owns the output pane and its viewport and reconciles
//!   them to that decision
//! - [`graphviz`] is the graph-rendering collaborator used by the binary
//! - [`probe`] reads intrinsic dimensions out of rendered images

pub mod dispatcher;
pub mod export;
pub mod graphviz;
pub mod presentation;
pub mod probe;

pub use dispatcher::{DisplayedImage, ImageArtifact, OutputPaneState, PaneKind, RenderDispatcher};
pub use export::export_artifact;
pub use graphviz::GraphvizRenderer;
pub use presentation::{Presentation, PresentationRules};

use crate::model::RenderError;
use crate::viewport::Extent;

/// Rendered SVG document plus its intrinsic size.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgFragment {
    markup: String,
    size: Extent,
}

impl SvgFragment {
    /// Validate `markup` as an SVG document and probe its size.
    pub fn parse(markup: impl Into<String>) -> Result<Self, RenderError> {
        let markup = markup.into();
        let size = probe::svg_size(&markup)?;
        Ok(Self { markup, size })
    }

    /// SVG document text.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Intrinsic size in points.
    pub fn size(&self) -> Extent {
        self.size
    }
}

/// Rendered PNG image plus its pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    bytes: Vec<u8>,
    size: Extent,
}

impl RasterImage {
    /// Validate `bytes` as PNG and read its size from the header.
    pub fn from_png(bytes: Vec<u8>) -> Result<Self, RenderError> {
        let size = probe::png_size(&bytes)?;
        Ok(Self { bytes, size })
    }

    /// Encoded PNG bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size in pixels.
    pub fn size(&self) -> Extent {
        self.size
    }
}

/// Graph-rendering collaborator: turns a graph description into an image.
pub trait GraphRenderer {
    /// Render `description` as SVG.
    fn render_svg(&self, description: &str) -> Result<SvgFragment, RenderError>;

    /// Render `description` as PNG.
    fn render_raster(&self, description: &str) -> Result<RasterImage, RenderError>;
}

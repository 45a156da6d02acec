//! Reconciles the output pane with the latest result.
//!
//! The dispatcher exclusively owns the output pane state and the viewport
//! controller. Every render tears the previous artifact down (releasing its
//! viewport) before anything new is attached, so the pane never holds more
//! than one artifact and at most one viewport is live.

use crate::model::{ComputationResult, Options, OutputFormat, RenderError};
use crate::render::presentation::{Presentation, PresentationRules};
use crate::render::{GraphRenderer, RasterImage, SvgFragment};
use crate::viewport::{Extent, ViewportController, ViewportHandle, ViewportOptions};
use tracing::debug;

/// Image artifact attached to the pane.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageArtifact {
    /// Vector graph with a live viewport.
    Svg(SvgFragment),
    /// PNG image.
    Raster(RasterImage),
}

impl ImageArtifact {
    /// Intrinsic size of the image.
    pub fn size(&self) -> Extent {
        match self {
            ImageArtifact::Svg(fragment) => fragment.size(),
            ImageArtifact::Raster(image) => image.size(),
        }
    }
}

/// A displayed image and the description it was rendered from.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedImage {
    /// Format the image was rendered in.
    pub format: OutputFormat,
    /// Graph description the image was rendered from.
    pub description: String,
    /// The rendered image.
    pub artifact: ImageArtifact,
    /// Present for SVG only; raster images are attached without pan/zoom.
    pub viewport: Option<ViewportHandle>,
}

/// What the output pane currently shows. Exactly one variant at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OutputPaneState {
    /// Nothing to show: no result yet, or the last cycle failed.
    #[default]
    Empty,
    /// Literal text output.
    TextDisplayed(String),
    /// Rendered graph image.
    ImageDisplayed(DisplayedImage),
}

/// Shape of the pane contents, ignoring artifact data and viewport identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneKind {
    /// [`OutputPaneState::Empty`].
    Empty,
    /// [`OutputPaneState::TextDisplayed`].
    Text,
    /// [`OutputPaneState::ImageDisplayed`] in the given format.
    Image(OutputFormat),
}

impl OutputPaneState {
    /// Shape of the pane contents.
    pub fn kind(&self) -> PaneKind {
        match self {
            OutputPaneState::Empty => PaneKind::Empty,
            OutputPaneState::TextDisplayed(_) => PaneKind::Text,
            OutputPaneState::ImageDisplayed(image) => PaneKind::Image(image.format),
        }
    }

    /// Viewport handle of a displayed SVG.
    pub fn viewport(&self) -> Option<ViewportHandle> {
        match self {
            OutputPaneState::ImageDisplayed(image) => image.viewport,
            _ => None,
        }
    }

    /// Equal contents, disregarding which viewport handle wraps them.
    ///
    /// Two renders of the same result produce equivalent panes even though
    /// each one creates a fresh viewport.
    pub fn same_artifact(&self, other: &OutputPaneState) -> bool {
        match (self, other) {
            (OutputPaneState::Empty, OutputPaneState::Empty) => true,
            (OutputPaneState::TextDisplayed(a), OutputPaneState::TextDisplayed(b)) => a == b,
            (OutputPaneState::ImageDisplayed(a), OutputPaneState::ImageDisplayed(b)) => {
                a.format == b.format
                    && a.description == b.description
                    && a.artifact == b.artifact
                    && a.viewport.is_some() == b.viewport.is_some()
            }
            _ => false,
        }
    }
}

/// Owner of the output pane and its viewport.
pub struct RenderDispatcher {
    renderer: Box<dyn GraphRenderer>,
    rules: PresentationRules,
    viewport: ViewportController,
    pane: OutputPaneState,
}

impl RenderDispatcher {
    /// Dispatcher with an empty pane and no live viewport.
    pub fn new(
        renderer: Box<dyn GraphRenderer>,
        rules: PresentationRules,
        viewport_options: ViewportOptions,
    ) -> Self {
        Self {
            renderer,
            rules,
            viewport: ViewportController::new(viewport_options),
            pane: OutputPaneState::Empty,
        }
    }

    /// What the pane currently shows.
    pub fn pane(&self) -> &OutputPaneState {
        &self.pane
    }

    /// Rules deciding between text and image.
    pub fn rules(&self) -> &PresentationRules {
        &self.rules
    }

    /// Viewport controller, for drawing and inspection.
    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    /// Mutable access for interactive zoom and pan.
    pub fn viewport_mut(&mut self) -> &mut ViewportController {
        &mut self.viewport
    }

    /// Tear down whatever the pane shows, releasing its viewport.
    pub fn clear(&mut self) {
        let previous = std::mem::take(&mut self.pane);
        if let Some(handle) = previous.viewport() {
            self.viewport.destroy(handle);
        }
    }

    /// Rebuild the pane for `result` under `options`.
    ///
    /// The pane is cleared first in every case. On a render failure it stays
    /// empty and the error is returned to the caller.
    pub fn render(
        &mut self,
        result: Option<&ComputationResult>,
        options: &Options,
    ) -> Result<(), RenderError> {
        self.clear();

        match self.rules.decide(result, options) {
            Presentation::Nothing => {
                debug!("Output pane cleared");
            }
            Presentation::Text(payload) => {
                debug!(bytes = payload.len(), "Rendering text output");
                self.pane = OutputPaneState::TextDisplayed(payload.to_string());
            }
            Presentation::Svg(description) => {
                let fragment = self.renderer.render_svg(description)?;
                let handle = self.viewport.create(fragment.size());
                debug!(%handle, "Rendering SVG output");
                self.pane = OutputPaneState::ImageDisplayed(DisplayedImage {
                    format: OutputFormat::Svg,
                    description: description.to_string(),
                    artifact: ImageArtifact::Svg(fragment),
                    viewport: Some(handle),
                });
            }
            Presentation::Raster(description) => {
                let image = self.renderer.render_raster(description)?;
                debug!(bytes = image.bytes().len(), "Rendering raster output");
                self.pane = OutputPaneState::ImageDisplayed(DisplayedImage {
                    format: OutputFormat::Png,
                    description: description.to_string(),
                    artifact: ImageArtifact::Raster(image),
                    viewport: None,
                });
            }
        }
        Ok(())
    }

    /// Forward a container resize to the live viewport, if any.
    pub fn resize(&mut self, container: Extent) -> bool {
        self.viewport.resize(container)
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;

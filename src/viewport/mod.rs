//! Pan/zoom viewport around a rendered graph.
//!
//! The [`ViewportController`] owns at most one live viewport at a time. A
//! viewport is created once per rendered graph fragment, re-fitted when the
//! containing pane changes size, and destroyed before any other artifact
//! replaces the graph.
//!
//! Geometry is unit-agnostic: content and container extents only need to
//! share a unit. The terminal front end converts cells to points before
//! calling in here.

mod transform;

pub use transform::{Extent, Transform};

use std::fmt;
use tracing::{debug, warn};

/// Behaviour switches for a viewport, mirroring the pan/zoom widget options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportOptions {
    /// Whether zoom requests are honoured.
    pub zoom_enabled: bool,
    /// Whether pan requests are honoured.
    pub pan_enabled: bool,
    /// Whether the zoom in/out/reset control strip is shown.
    pub control_icons_enabled: bool,
    /// Scale the content to fit the container on create and resize.
    pub fit: bool,
    /// Center the content in the container on create and resize.
    pub center: bool,
    /// Lower zoom bound. Must not exceed `max_zoom`.
    pub min_zoom: f64,
    /// Upper zoom bound.
    pub max_zoom: f64,
    /// Multiplicative factor applied by one zoom step.
    pub zoom_step: f64,
}

impl Default for ViewportOptions {
    fn default() -> Self {
        Self {
            zoom_enabled: true,
            pan_enabled: true,
            control_icons_enabled: true,
            fit: true,
            center: true,
            min_zoom: 0.1,
            max_zoom: 10.0,
            zoom_step: 1.25,
        }
    }
}

/// Identity of a viewport. Never reused within a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewportHandle(u64);

impl ViewportHandle {
    /// Numeric id, unique per controller.
    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ViewportHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "viewport#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct LiveViewport {
    handle: ViewportHandle,
    content: Extent,
    transform: Transform,
}

/// Lifecycle owner of the single pan/zoom viewport.
#[derive(Debug, Clone)]
pub struct ViewportController {
    options: ViewportOptions,
    container: Extent,
    live: Option<LiveViewport>,
    next_id: u64,
    created: u64,
    destroyed: u64,
}

impl ViewportController {
    /// Controller with no live viewport and an empty container.
    pub fn new(options: ViewportOptions) -> Self {
        Self {
            options,
            container: Extent::ZERO,
            live: None,
            next_id: 1,
            created: 0,
            destroyed: 0,
        }
    }

    /// Behaviour switches the controller was built with.
    pub fn options(&self) -> &ViewportOptions {
        &self.options
    }

    /// Last container size passed to [`ViewportController::resize`].
    pub fn container(&self) -> Extent {
        self.container
    }

    /// Wrap freshly attached content, fitting and centering it against the
    /// last known container size.
    ///
    /// A still-live viewport is destroyed first so that at most one exists.
    pub fn create(&mut self, content: Extent) -> ViewportHandle {
        if let Some(stale) = self.live.as_ref().map(|live| live.handle) {
            warn!(handle = %stale, "Creating viewport while another is live; destroying it");
            self.destroy(stale);
        }

        let handle = ViewportHandle(self.next_id);
        self.next_id += 1;
        self.created += 1;

        let transform = Transform::initial(content, self.container, &self.options);
        debug!(%handle, zoom = transform.zoom, "Viewport created");
        self.live = Some(LiveViewport {
            handle,
            content,
            transform,
        });
        handle
    }

    /// Record a new container size and re-fit the live viewport, if any.
    ///
    /// Returns whether a live viewport was re-fitted.
    pub fn resize(&mut self, container: Extent) -> bool {
        self.container = container;
        let options = self.options;
        match self.live.as_mut() {
            Some(live) => {
                live.transform = Transform::initial(live.content, container, &options);
                debug!(handle = %live.handle, zoom = live.transform.zoom, "Viewport resized");
                true
            }
            None => false,
        }
    }

    /// Release `handle`. Returns `false` when it is not the live viewport.
    pub fn destroy(&mut self, handle: ViewportHandle) -> bool {
        match &self.live {
            Some(live) if live.handle == handle => {
                self.live = None;
                self.destroyed += 1;
                debug!(%handle, "Viewport destroyed");
                true
            }
            _ => {
                warn!(%handle, "Destroy requested for a viewport that is not live");
                false
            }
        }
    }

    /// Handle of the live viewport, if any.
    pub fn live_handle(&self) -> Option<ViewportHandle> {
        self.live.as_ref().map(|live| live.handle)
    }

    /// Current transform of the live viewport.
    pub fn transform(&self) -> Option<Transform> {
        self.live.as_ref().map(|live| live.transform)
    }

    /// Zoom in by one step. Returns whether anything changed.
    pub fn zoom_in(&mut self) -> bool {
        let step = self.options.zoom_step;
        self.zoom_by(step)
    }

    /// Zoom out by one step. Returns whether anything changed.
    pub fn zoom_out(&mut self) -> bool {
        let step = self.options.zoom_step;
        self.zoom_by(1.0 / step)
    }

    fn zoom_by(&mut self, factor: f64) -> bool {
        if !self.options.zoom_enabled {
            return false;
        }
        let container = self.container;
        let options = self.options;
        match self.live.as_mut() {
            Some(live) => {
                live.transform = live.transform.zoomed(factor, container, &options);
                true
            }
            None => false,
        }
    }

    /// Translate the live content by `(dx, dy)` container units.
    pub fn pan(&mut self, dx: f64, dy: f64) -> bool {
        if !self.options.pan_enabled {
            return false;
        }
        match self.live.as_mut() {
            Some(live) => {
                live.transform = live.transform.panned(dx, dy);
                true
            }
            None => false,
        }
    }

    /// Re-fit and re-center the live viewport.
    pub fn reset(&mut self) -> bool {
        let container = self.container;
        self.resize(container)
    }

    /// Number of viewports created over the controller's lifetime.
    pub fn created_count(&self) -> u64 {
        self.created
    }

    /// Number of viewports destroyed over the controller's lifetime.
    pub fn destroyed_count(&self) -> u64 {
        self.destroyed
    }
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(ViewportOptions::default())
    }
}

#[cfg(test)]
#[path = "viewport_tests.rs"]
mod tests;

//! Shared collaborators for integration tests.
//!
//! The real engine and Graphviz are external programs; these doubles stand
//! in for them through the public `Engine` and `GraphRenderer` traits.

#![allow(dead_code)] // Not every test binary uses every helper

use gramviz::engine::Engine;
use gramviz::model::{Algorithm, EngineError, Options, RenderError};
use gramviz::render::{
    GraphRenderer, OutputPaneState, PresentationRules, RasterImage, RenderDispatcher, SvgFragment,
};
use gramviz::state::{AppState, EditorBuffer, PumpReport, Signal, UpdateCoordinator};
use gramviz::viewport::{Extent, ViewportOptions};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Which engine entry point was called, with what.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Lex(String),
    Parse {
        text: String,
        algorithm: String,
        raw_mode: bool,
    },
}

/// Engine double with per-text scripted failures.
///
/// Succeeds with `lex:<text>` / `parse:<algorithm>:<raw>:<text>` unless the
/// text was registered with [`ScriptedEngine::reject`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedEngine {
    calls: Rc<RefCell<Vec<Call>>>,
    failures: Rc<RefCell<HashMap<String, String>>>,
    fixed: Rc<RefCell<Option<String>>>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with `message` whenever the text is exactly `text`.
    pub fn reject(&self, text: &str, message: &str) {
        self.failures
            .borrow_mut()
            .insert(text.to_string(), message.to_string());
    }

    /// Answer every successful call with `payload`.
    pub fn respond_with(&self, payload: &str) {
        *self.fixed.borrow_mut() = Some(payload.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn answer(&self, text: &str, echo: String) -> Result<String, EngineError> {
        if let Some(message) = self.failures.borrow().get(text) {
            return Err(EngineError::new(message.clone()));
        }
        Ok(self.fixed.borrow().clone().unwrap_or(echo))
    }
}

impl Engine for ScriptedEngine {
    fn lex(&self, text: &str) -> Result<String, EngineError> {
        self.calls.borrow_mut().push(Call::Lex(text.to_string()));
        self.answer(text, format!("lex:{text}"))
    }

    fn parse(&self, text: &str, algorithm: &Algorithm, raw_mode: bool) -> Result<String, EngineError> {
        self.calls.borrow_mut().push(Call::Parse {
            text: text.to_string(),
            algorithm: algorithm.to_string(),
            raw_mode,
        });
        self.answer(text, format!("parse:{algorithm}:{raw_mode}:{text}"))
    }
}

/// Renderer double: image width follows the description length.
#[derive(Debug, Clone, Default)]
pub struct SizedRenderer {
    reject_containing: Option<String>,
}

impl SizedRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every description containing `marker`.
    pub fn rejecting(marker: &str) -> Self {
        Self {
            reject_containing: Some(marker.to_string()),
        }
    }

    fn check(&self, description: &str) -> Result<(), RenderError> {
        match &self.reject_containing {
            Some(marker) if description.contains(marker.as_str()) => Err(RenderError::Rejected {
                message: format!("syntax error near '{marker}'"),
            }),
            _ => Ok(()),
        }
    }
}

impl GraphRenderer for SizedRenderer {
    fn render_svg(&self, description: &str) -> Result<SvgFragment, RenderError> {
        self.check(description)?;
        let width = 20 + description.len();
        SvgFragment::parse(format!(
            r#"<?xml version="1.0"?><svg xmlns="http://www.w3.org/2000/svg" width="{width}pt" height="40pt"><g/></svg>"#
        ))
    }

    fn render_raster(&self, description: &str) -> Result<RasterImage, RenderError> {
        self.check(description)?;
        let width = u32::try_from(20 + description.len()).unwrap_or(u32::MAX);
        RasterImage::from_png(png_bytes(width, 40))
    }
}

/// PNG signature plus an IHDR chunk header, enough for size probing.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
    bytes
}

/// Coordinator, state and dispatcher wired together without a terminal.
pub struct Pipeline {
    pub state: AppState,
    pub coordinator: UpdateCoordinator,
    pub dispatcher: RenderDispatcher,
    pub engine: ScriptedEngine,
}

impl Pipeline {
    pub fn new(text: &str, options: Options) -> Self {
        Self::with_renderer(text, options, SizedRenderer::new())
    }

    pub fn with_renderer(text: &str, options: Options, renderer: SizedRenderer) -> Self {
        let mut dispatcher = RenderDispatcher::new(
            Box::new(renderer),
            PresentationRules::default(),
            ViewportOptions::default(),
        );
        dispatcher.resize(Extent::new(640.0, 480.0));
        Self {
            state: AppState::new(EditorBuffer::from_text(text), options),
            coordinator: UpdateCoordinator::new(),
            dispatcher,
            engine: ScriptedEngine::new(),
        }
    }

    pub fn send(&mut self, signal: Signal) -> PumpReport {
        self.coordinator.submit(signal);
        self.pump()
    }

    pub fn pump(&mut self) -> PumpReport {
        self.coordinator
            .pump(&mut self.state, &self.engine, &mut self.dispatcher)
    }

    /// Replace the editor text and queue the edit notification.
    pub fn edit(&mut self, text: &str) {
        self.state.editor = EditorBuffer::from_text(text);
        self.coordinator.submit(Signal::InputChanged);
    }

    pub fn pane(&self) -> &OutputPaneState {
        self.dispatcher.pane()
    }

    /// Viewports created minus destroyed.
    pub fn live_viewports(&self) -> u64 {
        let viewport = self.dispatcher.viewport();
        viewport.created_count() - viewport.destroyed_count()
    }
}

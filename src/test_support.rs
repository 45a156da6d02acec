//! Scriptable collaborators for unit tests.
//!
//! `FakeEngine` records every call and answers with a configurable outcome;
//! `FakeRenderer` produces tiny but valid SVG/PNG artifacts whose width is
//! derived from the description length, so different descriptions yield
//! distinguishable artifacts.

use crate::engine::Engine;
use crate::model::{Algorithm, EngineError, RenderError};
use crate::render::{GraphRenderer, RasterImage, SvgFragment};
use std::cell::RefCell;
use std::rc::Rc;

/// Marker that makes `FakeRenderer` reject a description.
pub const MALFORMED_MARKER: &str = "@malformed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineInvocation {
    Lex { text: String },
    Parse { text: String, algorithm: String, raw_mode: bool },
}

/// Engine double. Clones share the call log and the scripted outcome.
#[derive(Debug, Clone)]
pub struct FakeEngine {
    calls: Rc<RefCell<Vec<EngineInvocation>>>,
    outcome: Rc<RefCell<Option<Result<String, EngineError>>>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self {
            calls: Rc::new(RefCell::new(Vec::new())),
            outcome: Rc::new(RefCell::new(None)),
        }
    }

    /// Answer every following call with `payload`.
    pub fn respond_with(&self, payload: &str) {
        *self.outcome.borrow_mut() = Some(Ok(payload.to_string()));
    }

    /// Fail every following call with `message`.
    pub fn fail_with(&self, message: &str) {
        *self.outcome.borrow_mut() = Some(Err(EngineError::new(message)));
    }

    pub fn calls(&self) -> Vec<EngineInvocation> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn answer(&self, echo: String) -> Result<String, EngineError> {
        match &*self.outcome.borrow() {
            Some(outcome) => outcome.clone(),
            None => Ok(echo),
        }
    }
}

impl Default for FakeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for FakeEngine {
    fn lex(&self, text: &str) -> Result<String, EngineError> {
        self.calls.borrow_mut().push(EngineInvocation::Lex {
            text: text.to_string(),
        });
        self.answer(format!("lex:{text}"))
    }

    fn parse(&self, text: &str, algorithm: &Algorithm, raw_mode: bool) -> Result<String, EngineError> {
        self.calls.borrow_mut().push(EngineInvocation::Parse {
            text: text.to_string(),
            algorithm: algorithm.to_string(),
            raw_mode,
        });
        self.answer(format!("parse:{algorithm}:{text}"))
    }
}

/// Renderer double producing minimal valid images.
#[derive(Debug, Clone, Default)]
pub struct FakeRenderer {
    renders: Rc<RefCell<usize>>,
}

impl FakeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render_count(&self) -> usize {
        *self.renders.borrow()
    }

    fn check(&self, description: &str) -> Result<(), RenderError> {
        *self.renders.borrow_mut() += 1;
        if description.contains(MALFORMED_MARKER) {
            return Err(RenderError::Rejected {
                message: "syntax error in line 1".to_string(),
            });
        }
        Ok(())
    }
}

impl GraphRenderer for FakeRenderer {
    fn render_svg(&self, description: &str) -> Result<SvgFragment, RenderError> {
        self.check(description)?;
        let width = 10 + description.len();
        SvgFragment::parse(format!(r#"<svg width="{width}pt" height="50pt"></svg>"#))
    }

    fn render_raster(&self, description: &str) -> Result<RasterImage, RenderError> {
        self.check(description)?;
        let width = u32::try_from(10 + description.len()).unwrap_or(u32::MAX);
        RasterImage::from_png(png_bytes(width, 50))
    }
}

/// Smallest byte sequence `RasterImage::from_png` accepts.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
    bytes
}

//! Presentation rules: which artifact a result turns into.

use crate::model::{Algorithm, ComputationResult, Options, OutputFormat};
use std::collections::HashSet;

/// What the output pane should show, borrowing the payload from the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation<'a> {
    /// No result yet, or the last cycle failed.
    Nothing,
    /// Literal text, no markup interpretation.
    Text(&'a str),
    /// Graph description to render as SVG inside a pan/zoom viewport.
    Svg(&'a str),
    /// Graph description to render as a raster image.
    Raster(&'a str),
}

/// Algorithms whose output is inherently textual.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationRules {
    textual: HashSet<Algorithm>,
}

impl PresentationRules {
    /// Rules treating every algorithm in `textual` as text-only.
    pub fn new(textual: impl IntoIterator<Item = Algorithm>) -> Self {
        Self {
            textual: textual.into_iter().collect(),
        }
    }

    /// Whether `algorithm` is always shown as text.
    pub fn is_textual(&self, algorithm: &Algorithm) -> bool {
        self.textual.contains(algorithm)
    }

    /// Decide the presentation for `result` under `options`.
    ///
    /// Evaluated in order: failure or absence shows nothing; raw mode or a
    /// textual algorithm shows text; otherwise the format picks SVG or raster.
    /// Empty payloads are not special-cased.
    pub fn decide<'a>(
        &self,
        result: Option<&'a ComputationResult>,
        options: &Options,
    ) -> Presentation<'a> {
        let payload = match result {
            Some(ComputationResult::Success(payload)) => payload.as_str(),
            Some(ComputationResult::Failure(_)) | None => return Presentation::Nothing,
        };

        if options.raw_mode || self.is_textual(&options.algorithm) {
            return Presentation::Text(payload);
        }

        match options.format {
            OutputFormat::Svg => Presentation::Svg(payload),
            OutputFormat::Png => Presentation::Raster(payload),
        }
    }
}

impl Default for PresentationRules {
    fn default() -> Self {
        Self::new([Algorithm::ll1()])
    }
}

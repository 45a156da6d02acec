//! Error types for gramviz.
//!
//! Errors are split by how far they are allowed to travel.
//!
//! # Error Hierarchy
//!
//! - [`PipelineError`] - Non-fatal failures of one edit→compute→render cycle
//!   - [`EngineError`] - The engine rejected the input or algorithm combination
//!   - [`RenderError`] - The graph renderer could not turn engine output into an image
//! - [`AppError`] - Fatal failures that end the program
//!   - [`ConfigError`](crate::config::ConfigError) - Unreadable or invalid config file
//!   - [`LoggingError`](crate::logging::LoggingError) - Log file could not be set up
//!   - [`InputError`] - Initial grammar file could not be read
//!   - `std::io::Error` - Terminal failures
//!
//! # Recovery Strategy
//!
//! Pipeline errors stop at the update coordinator: they become the `Error`
//! pipeline state, their message goes to the error slot and the output pane
//! is cleared. Nothing is retried; the next edit triggers a fresh cycle.
//! Everything else propagates to `main` and terminates the program after the
//! terminal has been restored.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error for failures that end the program.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing could not be initialised.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// The initial grammar file could not be read.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// Terminal or TUI rendering error.
    ///
    /// Without a working terminal the TUI cannot function, so this is fatal.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when loading the initial editor content.
#[derive(Debug, Error)]
pub enum InputError {
    /// The grammar file given on the command line does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use gramviz::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.g"),
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.g"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path as given by the user.
        path: PathBuf,
    },

    /// Any other I/O failure while reading the file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The engine rejected the input or the algorithm combination.
///
/// The message is supplied by the engine and is opaque: it is shown to the
/// user verbatim in the error slot, so `Display` prints it unchanged.
///
/// # Examples
///
/// ```
/// use gramviz::model::error::EngineError;
///
/// let err = EngineError::new("unexpected token");
/// assert_eq!(err.to_string(), "unexpected token");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct EngineError {
    message: String,
}

impl EngineError {
    /// Wrap an engine diagnostic.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The diagnostic exactly as the engine produced it.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The graph renderer failed to produce an image from a graph description.
///
/// Surfaced to the user exactly like an [`EngineError`], but it signals a
/// contract mismatch between engine output and renderer input rather than a
/// user mistake, so it is logged separately.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The renderer program could not be started.
    #[error("Failed to run renderer '{program}': {reason}")]
    Spawn {
        /// Program that was attempted.
        program: String,
        /// OS-level reason.
        reason: String,
    },

    /// The renderer ran but rejected the graph description.
    ///
    /// **Why `message` is `String`**: it is the renderer's diagnostic output,
    /// which has no structure worth preserving.
    #[error("Renderer rejected graph description: {message}")]
    Rejected {
        /// Renderer diagnostic.
        message: String,
    },

    /// Rendered SVG has no usable root `<svg>` element.
    #[error("Malformed SVG output: {0}")]
    MalformedSvg(String),

    /// Rendered raster bytes are not a PNG image.
    #[error("Malformed raster output: {0}")]
    MalformedRaster(String),
}

/// Any failure of a single compute/render cycle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The engine failed.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The engine succeeded but its output could not be rendered.
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl PipelineError {
    /// Text shown in the error slot.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Whether the renderer, not the engine, failed.
    pub fn is_render(&self) -> bool {
        matches!(self, PipelineError::Render(_))
    }
}

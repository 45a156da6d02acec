//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod key_action;
pub mod options;
pub mod result;

// Re-export for convenience
pub use error::{AppError, EngineError, InputError, PipelineError, RenderError};
pub use key_action::KeyAction;
pub use options::{Algorithm, InvalidAlgorithm, InvalidFormat, OptionChange, Options, OutputFormat};
pub use result::{ComputationResult, ResultModel, TaggedResult};

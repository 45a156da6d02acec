//! Facade over the external parser/lexer-generator engine.
//!
//! The engine is a black box exposing two pure entry points. This module
//! defines that contract as the [`Engine`] trait and the routing rule that
//! picks an entry point for a given options snapshot.

pub mod command;

pub use command::{CommandEngine, DEFAULT_ENGINE_PROGRAM};

use crate::model::{Algorithm, EngineError, Options};

/// Contract of the compute engine.
///
/// Both calls are treated as blocking and side-effect free. A failure carries
/// an engine-supplied diagnostic that is shown to the user unchanged.
pub trait Engine {
    /// Build the lexer automaton for `text` (one regular expression per line)
    /// and return its graph description.
    fn lex(&self, text: &str) -> Result<String, EngineError>;

    /// Analyse the grammar in `text` with `algorithm`.
    ///
    /// With `raw_mode` set the engine returns preformatted text (its table
    /// view) instead of a graph description.
    fn parse(&self, text: &str, algorithm: &Algorithm, raw_mode: bool)
        -> Result<String, EngineError>;
}

/// Which engine entry point a snapshot routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCall {
    /// [`Engine::lex`].
    Lex,
    /// [`Engine::parse`].
    Parse,
}

/// `dfa` goes to `lex`, everything else to `parse`, regardless of raw mode
/// or format.
pub fn route(options: &Options) -> EngineCall {
    if options.algorithm.is_lexer() {
        EngineCall::Lex
    } else {
        EngineCall::Parse
    }
}

/// Run one computation for `text` under `options`.
pub fn compute(engine: &dyn Engine, text: &str, options: &Options) -> Result<String, EngineError> {
    match route(options) {
        EngineCall::Lex => engine.lex(text),
        EngineCall::Parse => engine.parse(text, &options.algorithm, options.raw_mode),
    }
}

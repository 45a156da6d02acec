//! The latest computation result and the options it was computed under.

use crate::model::error::PipelineError;
use crate::model::options::Options;

/// Outcome of one compute cycle.
///
/// The payload is a graph description or a human-readable trace depending
/// on the options used; only the presentation rules interpret it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComputationResult {
    /// Engine payload.
    Success(String),
    /// Engine or renderer failure.
    Failure(PipelineError),
}

impl ComputationResult {
    /// Whether the computation succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, ComputationResult::Success(_))
    }

    /// Payload of a success.
    pub fn payload(&self) -> Option<&str> {
        match self {
            ComputationResult::Success(payload) => Some(payload),
            ComputationResult::Failure(_) => None,
        }
    }

    /// Error of a failure.
    pub fn error(&self) -> Option<&PipelineError> {
        match self {
            ComputationResult::Success(_) => None,
            ComputationResult::Failure(err) => Some(err),
        }
    }
}

impl From<Result<String, PipelineError>> for ComputationResult {
    fn from(outcome: Result<String, PipelineError>) -> Self {
        match outcome {
            Ok(payload) => ComputationResult::Success(payload),
            Err(err) => ComputationResult::Failure(err),
        }
    }
}

/// Result paired with the exact options snapshot that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedResult {
    /// What the engine returned.
    pub result: ComputationResult,
    /// Options the engine was called with.
    pub computed_with: Options,
}

/// Single mutable slot holding the latest result. No history is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultModel {
    slot: Option<TaggedResult>,
}

impl ResultModel {
    /// Empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the slot wholesale with a fresh result.
    pub fn store(&mut self, result: ComputationResult, computed_with: Options) {
        self.slot = Some(TaggedResult {
            result,
            computed_with,
        });
    }

    /// `None` until the first computation completes.
    pub fn latest(&self) -> Option<&TaggedResult> {
        self.slot.as_ref()
    }

    /// Result part of the slot, without its options tag.
    pub fn result(&self) -> Option<&ComputationResult> {
        self.slot.as_ref().map(|tagged| &tagged.result)
    }
}

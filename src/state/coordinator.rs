//! Serialized edit → compute → render pipeline.
//!
//! Every trigger (startup, text edit, option change, pane resize) is queued
//! as a [`Signal`] and applied by [`UpdateCoordinator::pump`]. Cycles never
//! overlap: a pump drains the whole queue, applies all option changes in
//! arrival order and then runs at most one compute cycle against the latest
//! text and options. Results therefore always correspond to the most recent
//! inputs, and an outdated snapshot can never overwrite a newer one.

use crate::engine::{self, Engine};
use crate::model::{ComputationResult, OptionChange, Options, PipelineError};
use crate::render::RenderDispatcher;
use crate::state::AppState;
use crate::viewport::Extent;
use std::collections::VecDeque;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// One pipeline trigger.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// Initial population of the output pane.
    Startup,
    /// The editor text changed.
    InputChanged,
    /// The user edited one option.
    OptionChanged(OptionChange),
    /// The output pane container changed size.
    PaneResized(Extent),
}

/// What a pump actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PumpReport {
    /// Signals consumed from the queue.
    pub signals: usize,
    /// A compute cycle ran (engine invoked once).
    pub recomputed: bool,
    /// The existing result was re-rendered without recomputing.
    pub rerendered: bool,
    /// The live viewport was re-fitted to a new container.
    pub resized: bool,
}

impl PumpReport {
    /// Whether the pane needs redrawing.
    pub fn changed(&self) -> bool {
        self.recomputed || self.rerendered || self.resized
    }
}

/// Serializes signals into compute and render cycles.
#[derive(Debug, Default)]
pub struct UpdateCoordinator {
    queue: VecDeque<Signal>,
    engine_invocations: u64,
}

impl UpdateCoordinator {
    /// Coordinator with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `signal` for the next [`UpdateCoordinator::pump`].
    pub fn submit(&mut self, signal: Signal) {
        debug!(?signal, "Signal queued");
        self.queue.push_back(signal);
    }

    /// Signals waiting in the queue.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Whether the next pump will call the engine.
    pub fn has_pending_recompute(&self) -> bool {
        self.queue.iter().any(|signal| match signal {
            Signal::Startup | Signal::InputChanged => true,
            Signal::OptionChanged(change) => change.requires_recompute(),
            Signal::PaneResized(_) => false,
        })
    }

    /// Total number of engine calls made so far.
    pub fn engine_invocations(&self) -> u64 {
        self.engine_invocations
    }

    /// Drain the queue and bring the output pane up to date.
    pub fn pump(
        &mut self,
        state: &mut AppState,
        engine: &dyn Engine,
        dispatcher: &mut RenderDispatcher,
    ) -> PumpReport {
        let mut report = PumpReport::default();
        let mut recompute = false;
        let mut rerender = false;
        let mut container = None;

        while let Some(signal) = self.queue.pop_front() {
            report.signals += 1;
            match signal {
                Signal::Startup | Signal::InputChanged => recompute = true,
                Signal::OptionChanged(change) => {
                    // Setting an option to its current value still counts as
                    // a change request.
                    state.options.apply(&change);
                    if change.requires_recompute() {
                        recompute = true;
                    } else {
                        rerender = true;
                    }
                }
                Signal::PaneResized(extent) => container = Some(extent),
            }
        }

        if let Some(extent) = container {
            report.resized = dispatcher.resize(extent);
        }

        if recompute {
            self.run_cycle(state, engine, dispatcher);
            report.recomputed = true;
        } else if rerender {
            render_latest(state, dispatcher);
            report.rerendered = true;
        }

        report
    }

    /// Compute with a snapshot of the current inputs, store, render.
    fn run_cycle(&mut self, state: &mut AppState, engine: &dyn Engine, dispatcher: &mut RenderDispatcher) {
        let started = Instant::now();
        state.begin_computing();

        let snapshot = state.options.clone();
        let text = state.editor.text();
        debug!(
            algorithm = %snapshot.algorithm,
            raw_mode = snapshot.raw_mode,
            bytes = text.len(),
            "Compute cycle started"
        );

        self.engine_invocations += 1;
        let outcome = engine::compute(engine, &text, &snapshot).map_err(PipelineError::from);
        if let Err(err) = &outcome {
            warn!(algorithm = %snapshot.algorithm, error = %err, "Engine rejected input");
        }

        state.results.store(ComputationResult::from(outcome), snapshot);
        state.end_computing();
        render_latest(state, dispatcher);

        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            state = state.pipeline().label(),
            "Compute cycle finished"
        );
    }
}

/// Options to render the stored result with.
///
/// Everything the engine consumed comes from the result's own tag; only the
/// purely presentational format follows the current selection.
fn render_options(computed_with: &Options, current: &Options) -> Options {
    Options {
        format: current.format,
        ..computed_with.clone()
    }
}

/// Re-render the stored result and settle the pipeline state.
fn render_latest(state: &mut AppState, dispatcher: &mut RenderDispatcher) {
    let Some(tagged) = state.results.latest() else {
        dispatcher.clear();
        return;
    };
    let result = tagged.result.clone();
    let options = render_options(&tagged.computed_with, &state.options);

    let rendered = dispatcher.render(Some(&result), &options);
    match (&result, rendered) {
        (ComputationResult::Failure(err), _) => state.mark_error(err.message()),
        (ComputationResult::Success(_), Ok(())) => state.mark_idle(),
        (ComputationResult::Success(_), Err(err)) => {
            error!(format = %options.format, error = %err, "Graph rendering failed");
            state.mark_error(PipelineError::from(err).message());
        }
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;

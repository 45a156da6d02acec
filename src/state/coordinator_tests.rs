//! Tests for UpdateCoordinator.

use super::*;
use crate::model::{Algorithm, OutputFormat};
use crate::render::{OutputPaneState, PaneKind, PresentationRules};
use crate::state::{EditorBuffer, PipelineState};
use crate::test_support::{EngineInvocation, FakeEngine, FakeRenderer, MALFORMED_MARKER};
use crate::viewport::ViewportOptions;

struct Harness {
    state: AppState,
    coordinator: UpdateCoordinator,
    engine: FakeEngine,
    renderer: FakeRenderer,
    dispatcher: RenderDispatcher,
}

impl Harness {
    fn new(text: &str, options: Options) -> Self {
        let renderer = FakeRenderer::new();
        let dispatcher = RenderDispatcher::new(
            Box::new(renderer.clone()),
            PresentationRules::default(),
            ViewportOptions::default(),
        );
        Self {
            state: AppState::new(EditorBuffer::from_text(text), options),
            coordinator: UpdateCoordinator::new(),
            engine: FakeEngine::new(),
            renderer,
            dispatcher,
        }
    }

    fn send(&mut self, signal: Signal) -> PumpReport {
        self.coordinator.submit(signal);
        self.pump()
    }

    fn pump(&mut self) -> PumpReport {
        self.coordinator
            .pump(&mut self.state, &self.engine, &mut self.dispatcher)
    }

    fn pane(&self) -> &OutputPaneState {
        self.dispatcher.pane()
    }

    fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.state.editor.insert_char(ch);
        }
    }
}

fn lalr1(raw_mode: bool, format: OutputFormat) -> Options {
    Options::new(Algorithm::lalr1(), raw_mode, format)
}

#[test]
fn startup_computes_initial_content() {
    let mut h = Harness::new("S -> a", Options::default());

    let report = h.send(Signal::Startup);

    assert!(report.recomputed);
    assert_eq!(h.coordinator.engine_invocations(), 1);
    assert_eq!(h.state.pipeline(), PipelineState::Idle);
    assert!(!h.state.is_busy());
    assert_eq!(h.pane().kind(), PaneKind::Image(OutputFormat::Svg));
}

#[test]
fn empty_queue_does_nothing() {
    let mut h = Harness::new("", Options::default());
    let report = h.pump();
    assert_eq!(report, PumpReport::default());
    assert_eq!(h.engine.call_count(), 0);
}

#[test]
fn engine_failure_enters_error_with_empty_pane() {
    let mut h = Harness::new("S -> a +", lalr1(false, OutputFormat::Svg));
    h.send(Signal::Startup);
    assert!(h.pane().viewport().is_some());

    h.engine.fail_with("unexpected token");
    h.send(Signal::InputChanged);

    assert_eq!(h.state.pipeline(), PipelineState::Error);
    assert_eq!(h.pane(), &OutputPaneState::Empty);
    assert_eq!(h.state.error_message(), Some("unexpected token"));
    assert_eq!(h.dispatcher.viewport().live_handle(), None);
    assert!(!h.state.results.latest().unwrap().result.is_success());
}

#[test]
fn successful_cycle_after_error_clears_error_marker() {
    let mut h = Harness::new("S -> a", Options::default());
    h.engine.fail_with("unexpected token");
    h.send(Signal::Startup);
    assert_eq!(h.state.pipeline(), PipelineState::Error);

    h.engine.respond_with("digraph { a }");
    h.send(Signal::InputChanged);

    assert_eq!(h.state.pipeline(), PipelineState::Idle);
    assert_eq!(h.state.error_message(), None);
}

#[test]
fn raw_mode_shows_literal_text_for_any_format() {
    for format in [OutputFormat::Svg, OutputFormat::Png] {
        let mut h = Harness::new("S -> a b", lalr1(true, format));
        h.engine.respond_with("S -> a b");

        h.send(Signal::Startup);

        assert_eq!(
            h.pane(),
            &OutputPaneState::TextDisplayed("S -> a b".to_string())
        );
        assert_eq!(h.renderer.render_count(), 0);
    }
}

#[test]
fn format_switch_rerenders_without_engine_call() {
    let mut h = Harness::new("S -> a", lalr1(false, OutputFormat::Svg));
    h.send(Signal::Startup);
    let h1 = h.pane().viewport().expect("svg viewport");

    let report = h.send(Signal::OptionChanged(OptionChange::Format(OutputFormat::Png)));

    assert!(report.rerendered);
    assert!(!report.recomputed);
    assert_eq!(h.engine.call_count(), 1);
    assert_eq!(h.pane().kind(), PaneKind::Image(OutputFormat::Png));
    assert_eq!(h.dispatcher.viewport().live_handle(), None);
    assert_eq!(h.dispatcher.viewport().destroyed_count(), 1);

    h.send(Signal::OptionChanged(OptionChange::Format(OutputFormat::Svg)));
    let h2 = h.pane().viewport().expect("new svg viewport");
    assert_ne!(h1, h2);
    assert_eq!(h.engine.call_count(), 1);
}

#[test]
fn format_switch_keeps_error_state() {
    let mut h = Harness::new("S ->", Options::default());
    h.engine.fail_with("unexpected end of input");
    h.send(Signal::Startup);

    h.send(Signal::OptionChanged(OptionChange::Format(OutputFormat::Png)));

    assert_eq!(h.state.pipeline(), PipelineState::Error);
    assert_eq!(h.pane(), &OutputPaneState::Empty);
    assert_eq!(h.engine.call_count(), 1);
}

#[test]
fn format_switch_before_first_result_renders_nothing() {
    let mut h = Harness::new("S -> a", Options::default());

    let report = h.send(Signal::OptionChanged(OptionChange::Format(OutputFormat::Png)));

    assert!(report.rerendered);
    assert_eq!(h.state.options.format, OutputFormat::Png);
    assert_eq!(h.pane(), &OutputPaneState::Empty);
    assert_eq!(h.engine.call_count(), 0);
}

#[test]
fn dfa_always_routes_to_lex() {
    for (raw_mode, format) in [
        (false, OutputFormat::Svg),
        (true, OutputFormat::Svg),
        (false, OutputFormat::Png),
        (true, OutputFormat::Png),
    ] {
        let mut h = Harness::new("a(b|c)*", Options::new(Algorithm::dfa(), raw_mode, format));
        h.send(Signal::Startup);
        assert_eq!(
            h.engine.calls(),
            vec![EngineInvocation::Lex {
                text: "a(b|c)*".to_string()
            }]
        );
    }
}

#[test]
fn algorithm_change_recomputes_with_new_algorithm() {
    let mut h = Harness::new("S -> a", Options::default());
    h.send(Signal::Startup);

    h.send(Signal::OptionChanged(OptionChange::Algorithm(Algorithm::ll1())));

    assert_eq!(h.engine.call_count(), 2);
    assert_eq!(
        h.engine.calls()[1],
        EngineInvocation::Parse {
            text: "S -> a".to_string(),
            algorithm: "ll(1)".to_string(),
            raw_mode: false,
        }
    );
    assert_eq!(h.pane().kind(), PaneKind::Text);
}

#[test]
fn raw_toggle_recomputes() {
    let mut h = Harness::new("S -> a", Options::default());
    h.send(Signal::Startup);

    let report = h.send(Signal::OptionChanged(OptionChange::RawMode(true)));

    assert!(report.recomputed);
    assert_eq!(h.engine.call_count(), 2);
    assert_eq!(h.pane().kind(), PaneKind::Text);
}

#[test]
fn rapid_edits_coalesce_and_latest_wins() {
    let mut h = Harness::new("", Options::default());
    h.type_text("A");
    h.coordinator.submit(Signal::InputChanged);
    h.type_text("B");
    h.coordinator.submit(Signal::InputChanged);

    let report = h.pump();

    assert_eq!(report.signals, 2);
    assert_eq!(h.engine.call_count(), 1);
    let latest = h.state.results.latest().unwrap();
    assert_eq!(latest.result.payload(), Some("parse:lalr(1):AB"));
}

#[test]
fn serialized_edits_each_resolve_before_the_next() {
    let mut h = Harness::new("", Options::default());
    h.type_text("A");
    h.send(Signal::InputChanged);
    h.type_text("B");
    h.send(Signal::InputChanged);

    assert_eq!(h.engine.call_count(), 2);
    let latest = h.state.results.latest().unwrap();
    assert_eq!(latest.result.payload(), Some("parse:lalr(1):AB"));
    assert_eq!(h.dispatcher.viewport().live_handle(), h.pane().viewport());
}

#[test]
fn queued_option_changes_apply_in_order() {
    let mut h = Harness::new("S -> a", Options::default());
    h.coordinator
        .submit(Signal::OptionChanged(OptionChange::Algorithm(Algorithm::ll1())));
    h.coordinator
        .submit(Signal::OptionChanged(OptionChange::Algorithm(Algorithm::dfa())));
    h.coordinator
        .submit(Signal::OptionChanged(OptionChange::Format(OutputFormat::Png)));

    let report = h.pump();

    assert!(report.recomputed);
    assert!(!report.rerendered);
    assert_eq!(h.state.options.algorithm, Algorithm::dfa());
    assert_eq!(h.engine.call_count(), 1);
    let tagged = h.state.results.latest().unwrap();
    assert_eq!(tagged.computed_with, h.state.options);
    assert_eq!(h.pane().kind(), PaneKind::Image(OutputFormat::Png));
}

#[test]
fn render_failure_is_reported_like_engine_failure() {
    let mut h = Harness::new("S -> a", Options::default());
    h.engine.respond_with(MALFORMED_MARKER);

    h.send(Signal::Startup);

    assert_eq!(h.state.pipeline(), PipelineState::Error);
    assert_eq!(h.pane(), &OutputPaneState::Empty);
    let message = h.state.error_message().expect("error text");
    assert!(message.contains("syntax error in line 1"), "{message}");
}

#[test]
fn resize_refits_live_viewport_only() {
    let mut h = Harness::new("S -> a", Options::default());

    let report = h.send(Signal::PaneResized(Extent::new(400.0, 300.0)));
    assert!(!report.resized);
    assert_eq!(h.engine.call_count(), 0);

    h.send(Signal::Startup);
    let report = h.send(Signal::PaneResized(Extent::new(800.0, 600.0)));

    assert!(report.resized);
    assert!(!report.recomputed);
    assert_eq!(h.dispatcher.viewport().container(), Extent::new(800.0, 600.0));
    assert_eq!(h.engine.call_count(), 1);
}

#[test]
fn at_most_one_viewport_after_many_cycles() {
    let mut h = Harness::new("S -> a", Options::default());
    h.send(Signal::Startup);
    for i in 0..5 {
        h.type_text(&i.to_string());
        h.send(Signal::InputChanged);
        h.send(Signal::OptionChanged(OptionChange::Format(OutputFormat::Png)));
        h.send(Signal::OptionChanged(OptionChange::Format(OutputFormat::Svg)));
    }

    let viewport = h.dispatcher.viewport();
    assert_eq!(viewport.created_count() - viewport.destroyed_count(), 1);
    assert_eq!(viewport.live_handle(), h.pane().viewport());
}

#[test]
fn pending_recompute_ignores_format_and_resize() {
    let mut coordinator = UpdateCoordinator::new();
    assert!(!coordinator.has_pending_recompute());

    coordinator.submit(Signal::OptionChanged(OptionChange::Format(OutputFormat::Png)));
    coordinator.submit(Signal::PaneResized(Extent::new(100.0, 100.0)));
    assert!(!coordinator.has_pending_recompute());

    coordinator.submit(Signal::InputChanged);
    assert!(coordinator.has_pending_recompute());
    assert_eq!(coordinator.pending(), 3);
}

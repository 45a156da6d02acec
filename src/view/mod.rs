//! TUI rendering and terminal management (impure shell)

pub mod constants;
pub mod layout;
pub mod output_pane;
pub mod styles;

pub use layout::{calculate_areas, output_container, render_layout, PaneAreas};
pub use output_pane::OutputPaneView;
pub use styles::{ColorConfig, PaneStyles};

use crate::config::{KeyBindings, ResolvedConfig};
use crate::engine::{CommandEngine, Engine};
use crate::model::{AppError, KeyAction, OptionChange};
use crate::render::{export_artifact, GraphvizRenderer, RenderDispatcher};
use crate::state::split::NUDGE_PERCENT;
use crate::state::{AppState, EditorBuffer, FocusPane, Signal, SplitPanes, UpdateCoordinator};
use crate::view::constants::{CELL_WIDTH_POINTS, DIVIDER_GRAB_TOLERANCE, PAN_STEP_CELLS};
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Position, Rect},
    Terminal,
};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<TuiError> for AppError {
    fn from(err: TuiError) -> Self {
        match err {
            TuiError::Io(e) => AppError::Terminal(e),
        }
    }
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    coordinator: UpdateCoordinator,
    dispatcher: RenderDispatcher,
    engine: Box<dyn Engine>,
    key_bindings: KeyBindings,
    styles: PaneStyles,
    export_dir: PathBuf,
    /// Whole terminal area as of the last draw or resize event
    frame_area: Rect,
    /// Areas of the last draw (for mouse hit testing)
    last_areas: PaneAreas,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture.
    pub fn new(
        app_state: AppState,
        engine: Box<dyn Engine>,
        dispatcher: RenderDispatcher,
        export_dir: PathBuf,
        styles: PaneStyles,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Self::with_terminal(terminal, app_state, engine, dispatcher, export_dir, styles)
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits. Events that are already waiting are
    /// handled before the pipeline runs, so a burst of keystrokes costs a
    /// single compute cycle.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.settle()?;
        self.draw()?;

        loop {
            let mut quit = self.handle_event(event::read()?);
            while !quit && event::poll(Duration::ZERO)? {
                quit = self.handle_event(event::read()?);
            }
            if quit {
                return Ok(());
            }

            self.settle()?;
            self.draw()?;
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Wrap an already initialised terminal.
    ///
    /// Queues the initial container size and the startup signal; the first
    /// [`settle`](Self::settle) populates the output pane.
    pub fn with_terminal(
        terminal: Terminal<B>,
        app_state: AppState,
        engine: Box<dyn Engine>,
        dispatcher: RenderDispatcher,
        export_dir: PathBuf,
        styles: PaneStyles,
    ) -> Result<Self, TuiError> {
        let size = terminal.size()?;

        let mut app = Self {
            terminal,
            app_state,
            coordinator: UpdateCoordinator::new(),
            dispatcher,
            engine,
            key_bindings: KeyBindings::default(),
            styles,
            export_dir,
            frame_area: Rect::new(0, 0, size.width, size.height),
            last_areas: PaneAreas::default(),
        };
        app.submit_resize();
        app.coordinator.submit(Signal::Startup);
        Ok(app)
    }

    /// Dispatch one terminal event. Returns true if the app should quit.
    fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) => return self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => self.handle_resize(width, height),
            _ => {}
        }
        false
    }

    /// Run the pipeline for everything queued since the last call.
    ///
    /// When the engine is about to be called, a frame showing the busy
    /// indicator is drawn first.
    pub fn settle(&mut self) -> Result<(), TuiError> {
        if self.coordinator.pending() == 0 {
            return Ok(());
        }

        if self.coordinator.has_pending_recompute() {
            self.app_state.begin_computing();
            self.draw()?;
        }

        let report = self.coordinator.pump(
            &mut self.app_state,
            self.engine.as_ref(),
            &mut self.dispatcher,
        );
        debug!(?report, "Pipeline settled");
        Ok(())
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        let lookup = KeyEvent::new(key.code, key.modifiers);
        if let Some(action) = self.key_bindings.get(lookup) {
            // Viewport keys are plain editing keys while the editor has focus.
            if !action.is_viewport_action() || self.app_state.focus == FocusPane::Output {
                return self.handle_action(action);
            }
        }

        if self.app_state.focus == FocusPane::Editor {
            self.handle_editor_key(key);
        }
        false
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let editor = &mut self.app_state.editor;
        let changed = match key.code {
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                editor.insert_char(ch)
            }
            KeyCode::Enter => editor.insert_newline(),
            KeyCode::Backspace => editor.backspace(),
            KeyCode::Delete => editor.delete(),
            KeyCode::Left => {
                editor.move_left();
                false
            }
            KeyCode::Right => {
                editor.move_right();
                false
            }
            KeyCode::Up => {
                editor.move_up();
                false
            }
            KeyCode::Down => {
                editor.move_down();
                false
            }
            KeyCode::Home => {
                editor.move_home();
                false
            }
            KeyCode::End => {
                editor.move_end();
                false
            }
            _ => false,
        };

        if changed {
            self.app_state.notice = None;
            self.coordinator.submit(Signal::InputChanged);
        }
    }

    /// Apply a bound action. Returns true on quit.
    fn handle_action(&mut self, action: KeyAction) -> bool {
        let options = &self.app_state.options;
        let pan_step = PAN_STEP_CELLS * CELL_WIDTH_POINTS;

        match action {
            KeyAction::Quit => return true,
            KeyAction::CycleFocus => self.app_state.cycle_focus(),

            KeyAction::NextAlgorithm => {
                let change = OptionChange::Algorithm(options.algorithm.next());
                self.coordinator.submit(Signal::OptionChanged(change));
            }
            KeyAction::PrevAlgorithm => {
                let change = OptionChange::Algorithm(options.algorithm.prev());
                self.coordinator.submit(Signal::OptionChanged(change));
            }
            KeyAction::ToggleFormat => {
                let change = OptionChange::Format(options.format.toggle());
                self.coordinator.submit(Signal::OptionChanged(change));
            }
            KeyAction::ToggleRaw => {
                let change = OptionChange::RawMode(!options.raw_mode);
                self.coordinator.submit(Signal::OptionChanged(change));
            }

            KeyAction::Export => self.export(),

            KeyAction::DividerLeft => self.nudge_divider(-(NUDGE_PERCENT as i16)),
            KeyAction::DividerRight => self.nudge_divider(NUDGE_PERCENT as i16),

            KeyAction::ZoomIn => {
                self.dispatcher.viewport_mut().zoom_in();
            }
            KeyAction::ZoomOut => {
                self.dispatcher.viewport_mut().zoom_out();
            }
            KeyAction::ResetZoom => {
                self.dispatcher.viewport_mut().reset();
            }
            KeyAction::PanLeft => {
                self.dispatcher.viewport_mut().pan(-pan_step, 0.0);
            }
            KeyAction::PanRight => {
                self.dispatcher.viewport_mut().pan(pan_step, 0.0);
            }
            KeyAction::PanUp => {
                self.dispatcher.viewport_mut().pan(0.0, -pan_step);
            }
            KeyAction::PanDown => {
                self.dispatcher.viewport_mut().pan(0.0, pan_step);
            }
        }

        false
    }

    /// Write the displayed artifact and report the outcome in the status bar.
    fn export(&mut self) {
        let notice = match export_artifact(self.dispatcher.pane(), &self.export_dir) {
            Ok(Some(path)) => format!("Exported {}", path.display()),
            Ok(None) => "Nothing to export".to_string(),
            Err(e) => {
                warn!(error = %e, dir = %self.export_dir.display(), "Export failed");
                format!("Export failed: {e}")
            }
        };
        self.app_state.notice = Some(notice);
    }

    fn nudge_divider(&mut self, delta: i16) {
        self.app_state.split.nudge(delta);
        if self.app_state.split.end_drag() {
            self.submit_resize();
        }
    }

    /// Queue the output container size for the current split.
    fn submit_resize(&mut self) {
        let areas = calculate_areas(self.frame_area, &self.app_state.split, false);
        let icons = self.dispatcher.viewport().options().control_icons_enabled;
        self.coordinator
            .submit(Signal::PaneResized(output_container(areas.output, icons)));
    }

    /// Handle a single mouse event
    ///
    /// Left button drags the divider, clicks the zoom controls or focuses
    /// the pane under the pointer. The wheel zooms the output pane.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let areas = self.last_areas;
        let position = Position::new(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if on_divider(&areas, mouse.column, mouse.row) {
                    self.app_state.split.begin_drag();
                } else if areas.output.contains(position) {
                    self.app_state.focus = FocusPane::Output;
                    let shows_viewport = self.dispatcher.pane().viewport().is_some();
                    let icons = self.dispatcher.viewport().options().control_icons_enabled;
                    if shows_viewport && icons {
                        if let Some(action) =
                            output_pane::control_hit(areas.output, mouse.column, mouse.row)
                        {
                            self.handle_action(action);
                        }
                    }
                } else if areas.editor.contains(position) {
                    self.app_state.focus = FocusPane::Editor;
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let body = areas.body;
                self.app_state
                    .split
                    .drag_to(mouse.column.saturating_sub(body.x), body.width);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.app_state.split.end_drag() {
                    debug!(
                        editor_percent = self.app_state.split.editor_percent(),
                        "Divider released"
                    );
                    self.submit_resize();
                }
            }
            MouseEventKind::ScrollUp if areas.output.contains(position) => {
                self.dispatcher.viewport_mut().zoom_in();
            }
            MouseEventKind::ScrollDown if areas.output.contains(position) => {
                self.dispatcher.viewport_mut().zoom_out();
            }
            _ => {}
        }
    }

    /// Handle a terminal resize event
    fn handle_resize(&mut self, width: u16, height: u16) {
        debug!("Handling resize to {}x{}", width, height);
        self.frame_area = Rect::new(0, 0, width, height);
        self.submit_resize();
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        self.frame_area = Rect::new(0, 0, size.width, size.height);

        let areas = calculate_areas(
            self.frame_area,
            &self.app_state.split,
            self.app_state.error_message().is_some(),
        );
        self.last_areas = areas;

        let state = &self.app_state;
        let dispatcher = &self.dispatcher;
        let styles = &self.styles;
        self.terminal.draw(|frame| {
            render_layout(frame, &areas, state, dispatcher, styles);
        })?;

        Ok(())
    }
}

/// Whether (`column`, `row`) grabs the divider between the panes.
fn on_divider(areas: &PaneAreas, column: u16, row: u16) -> bool {
    let body = areas.body;
    let divider = areas.divider_x();
    row >= body.top()
        && row < body.bottom()
        && column.abs_diff(divider) <= DIVIDER_GRAB_TOLERANCE
}

// ===== Test Helpers =====

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: Backend,
{
    pub(crate) fn app_state(&self) -> &AppState {
        &self.app_state
    }

    pub(crate) fn dispatcher(&self) -> &RenderDispatcher {
        &self.dispatcher
    }

    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Initialize and run the TUI application from resolved configuration
///
/// This is the main entry point for the TUI. It handles terminal
/// setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_config(
    config: &ResolvedConfig,
    initial_text: &str,
    no_color: bool,
) -> Result<(), TuiError> {
    let engine = CommandEngine::new(config.engine_program.clone())
        .with_args(config.engine_args.clone());
    let renderer =
        GraphvizRenderer::new(config.dot_program.clone()).with_args(config.dot_args.clone());
    let dispatcher = RenderDispatcher::new(
        Box::new(renderer),
        config.presentation_rules(),
        config.viewport_options(),
    );

    let mut app_state = AppState::new(EditorBuffer::from_text(initial_text), config.initial_options());
    app_state.split = SplitPanes::new(config.split_ratio);

    let styles = PaneStyles::with_color_config(ColorConfig::from_env_and_args(no_color));

    info!(
        engine = %config.engine_program.display(),
        dot = %config.dot_program.display(),
        algorithm = %app_state.options.algorithm,
        "Starting TUI"
    );

    // Run the app and ensure cleanup happens even on error
    let result = TuiApp::new(
        app_state,
        Box::new(engine),
        dispatcher,
        config.export_dir.clone(),
        styles,
    )
    .and_then(|mut app| app.run());

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

//! Pane and status styling.

use crate::state::PipelineState;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== PaneStyles =====

/// Styles for borders, header and status line.
///
/// Without colors, focus and errors stay distinguishable through modifiers.
#[derive(Debug, Clone, Copy)]
pub struct PaneStyles {
    focused_border: Style,
    unfocused_border: Style,
    header: Style,
    busy: Style,
    error: Style,
    status: Style,
}

impl PaneStyles {
    /// Create styles with the default color scheme, honouring `NO_COLOR`.
    pub fn new() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }

    /// Create styles with the specified color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                focused_border: Style::default().fg(Color::Yellow),
                unfocused_border: Style::default().fg(Color::DarkGray),
                header: Style::default().fg(Color::Cyan),
                busy: Style::default().fg(Color::Yellow),
                error: Style::default().fg(Color::Red),
                status: Style::default().fg(Color::Gray),
            }
        } else {
            Self {
                focused_border: Style::default().add_modifier(Modifier::BOLD),
                unfocused_border: Style::default(),
                header: Style::default(),
                busy: Style::default().add_modifier(Modifier::BOLD),
                error: Style::default().add_modifier(Modifier::BOLD),
                status: Style::default(),
            }
        }
    }

    /// Pane border, highlighted when focused.
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.focused_border
        } else {
            self.unfocused_border
        }
    }

    /// Header style for the pipeline state.
    pub fn header(&self, state: PipelineState) -> Style {
        match state {
            PipelineState::Idle => self.header,
            PipelineState::Computing => self.busy,
            PipelineState::Error => self.error,
        }
    }

    /// Error slot text.
    pub fn error(&self) -> Style {
        self.error
    }

    /// Status bar text.
    pub fn status(&self) -> Style {
        self.status
    }
}

impl Default for PaneStyles {
    fn default() -> Self {
        Self::new()
    }
}

// ===== Tests =====

//! Configuration file loading with precedence handling.

use crate::engine::command::DEFAULT_ENGINE_PROGRAM;
use crate::model::{Algorithm, InvalidFormat, Options, OutputFormat};
use crate::render::graphviz::DEFAULT_DOT_PROGRAM;
use crate::render::PresentationRules;
use crate::state::split::DEFAULT_EDITOR_PERCENT;
use crate::viewport::ViewportOptions;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A setting parsed as TOML but holds an unusable value.
    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue {
        /// Config key or environment variable name.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/gramviz/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Initially selected algorithm (e.g. "lalr(1)", "ll1", "dfa").
    #[serde(default)]
    pub algorithm: Option<String>,

    /// Initial output format ("svg" or "png").
    #[serde(default)]
    pub format: Option<String>,

    /// Start with raw (textual) output.
    #[serde(default)]
    pub raw: Option<bool>,

    /// Engine program path or name on `PATH`.
    #[serde(default)]
    pub engine_program: Option<PathBuf>,

    /// Arguments placed before the engine subcommand.
    #[serde(default)]
    pub engine_args: Option<Vec<String>>,

    /// Graphviz `dot` program path or name on `PATH`.
    #[serde(default)]
    pub dot_program: Option<PathBuf>,

    /// Arguments placed before the `-T` flag.
    #[serde(default)]
    pub dot_args: Option<Vec<String>>,

    /// Algorithms whose output is always shown as text.
    #[serde(default)]
    pub textual_algorithms: Option<Vec<String>>,

    /// Smallest zoom factor of the graph viewport.
    #[serde(default)]
    pub min_zoom: Option<f64>,

    /// Editor pane share of the body width, in percent.
    #[serde(default)]
    pub split_ratio: Option<u16>,

    /// Directory exported artifacts are written to.
    #[serde(default)]
    pub export_dir: Option<PathBuf>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Initial algorithm.
    pub algorithm: Algorithm,
    /// Initial image format.
    pub format: OutputFormat,
    /// Start in raw mode.
    pub raw: bool,
    /// Engine executable.
    pub engine_program: PathBuf,
    /// Arguments placed before the engine subcommand.
    pub engine_args: Vec<String>,
    /// Graphviz executable.
    pub dot_program: PathBuf,
    /// Arguments placed before `-T<format>`.
    pub dot_args: Vec<String>,
    /// Algorithms always shown as text.
    pub textual_algorithms: Vec<Algorithm>,
    /// Smallest zoom factor, never above the viewport's maximum.
    pub min_zoom: f64,
    /// Editor share of the split in percent.
    pub split_ratio: u16,
    /// Directory exported artifacts are written to.
    pub export_dir: PathBuf,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            format: OutputFormat::default(),
            raw: false,
            engine_program: PathBuf::from(DEFAULT_ENGINE_PROGRAM),
            engine_args: Vec::new(),
            dot_program: PathBuf::from(DEFAULT_DOT_PROGRAM),
            dot_args: Vec::new(),
            textual_algorithms: vec![Algorithm::ll1()],
            min_zoom: ViewportOptions::default().min_zoom,
            split_ratio: DEFAULT_EDITOR_PERCENT,
            export_dir: PathBuf::from("."),
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Options the session starts with.
    pub fn initial_options(&self) -> Options {
        Options::new(self.algorithm.clone(), self.raw, self.format)
    }

    /// Presentation rules built from `textual_algorithms`.
    pub fn presentation_rules(&self) -> PresentationRules {
        PresentationRules::new(self.textual_algorithms.iter().cloned())
    }

    /// Viewport behaviour with the configured zoom floor.
    pub fn viewport_options(&self) -> ViewportOptions {
        ViewportOptions {
            min_zoom: self.min_zoom,
            ..ViewportOptions::default()
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/gramviz/gramviz.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("gramviz").join("gramviz.log")
    } else {
        PathBuf::from("gramviz.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/gramviz/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gramviz").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `GRAMVIZ_CONFIG` environment variable
/// 3. Default path `~/.config/gramviz/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("GRAMVIZ_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

fn parse_algorithm(key: &str, value: &str) -> Result<Algorithm, ConfigError> {
    Algorithm::new(value).map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

fn parse_format(key: &str, value: &str) -> Result<OutputFormat, ConfigError> {
    value.parse().map_err(|e: InvalidFormat| ConfigError::InvalidValue {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `GRAMVIZ_ENGINE`: engine program
/// - `GRAMVIZ_DOT`: Graphviz program
/// - `GRAMVIZ_ALGORITHM`: initial algorithm
///
/// # Errors
///
/// Returns error if `GRAMVIZ_ALGORITHM` is blank.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(engine) = std::env::var("GRAMVIZ_ENGINE") {
        config.engine_program = PathBuf::from(engine);
    }

    if let Ok(dot) = std::env::var("GRAMVIZ_DOT") {
        config.dot_program = PathBuf::from(dot);
    }

    if let Ok(algorithm) = std::env::var("GRAMVIZ_ALGORITHM") {
        config.algorithm = parse_algorithm("GRAMVIZ_ALGORITHM", &algorithm)?;
    }

    Ok(config)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
///
/// # Errors
///
/// Returns error for values TOML accepts but the application cannot use
/// (blank algorithm, unknown format, zoom floor outside `(0, max_zoom]`).
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    let algorithm = match config.algorithm {
        Some(value) => parse_algorithm("algorithm", &value)?,
        None => defaults.algorithm,
    };

    let format = match config.format {
        Some(value) => parse_format("format", &value)?,
        None => defaults.format,
    };

    let textual_algorithms = match config.textual_algorithms {
        Some(values) => values
            .iter()
            .map(|value| parse_algorithm("textual_algorithms", value))
            .collect::<Result<Vec<_>, _>>()?,
        None => defaults.textual_algorithms,
    };

    let min_zoom = config.min_zoom.unwrap_or(defaults.min_zoom);
    if !(min_zoom.is_finite() && min_zoom > 0.0) {
        return Err(ConfigError::InvalidValue {
            key: "min_zoom".to_string(),
            reason: format!("must be a positive number, got {min_zoom}"),
        });
    }
    let max_zoom = ViewportOptions::default().max_zoom;
    if min_zoom > max_zoom {
        return Err(ConfigError::InvalidValue {
            key: "min_zoom".to_string(),
            reason: format!("must not exceed the maximum zoom {max_zoom}, got {min_zoom}"),
        });
    }

    Ok(ResolvedConfig {
        algorithm,
        format,
        raw: config.raw.unwrap_or(defaults.raw),
        engine_program: config.engine_program.unwrap_or(defaults.engine_program),
        engine_args: config.engine_args.unwrap_or(defaults.engine_args),
        dot_program: config.dot_program.unwrap_or(defaults.dot_program),
        dot_args: config.dot_args.unwrap_or(defaults.dot_args),
        textual_algorithms,
        min_zoom,
        split_ratio: config.split_ratio.unwrap_or(defaults.split_ratio),
        export_dir: config.export_dir.unwrap_or(defaults.export_dir),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    })
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    /// `-a/--algorithm`.
    pub algorithm: Option<Algorithm>,
    /// `-f/--format`.
    pub format: Option<OutputFormat>,
    /// `--raw`; `None` when the flag is absent.
    pub raw: Option<bool>,
    /// `--engine`.
    pub engine_program: Option<PathBuf>,
    /// `--dot`.
    pub dot_program: Option<PathBuf>,
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(algorithm) = cli.algorithm {
        config.algorithm = algorithm;
    }

    if let Some(format) = cli.format {
        config.format = format;
    }

    if let Some(raw) = cli.raw {
        config.raw = raw;
    }

    if let Some(engine) = cli.engine_program {
        config.engine_program = engine;
    }

    if let Some(dot) = cli.dot_program {
        config.dot_program = dot;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

//! Engine backed by an external parser-generator executable.
//!
//! Invocation protocol:
//! - `<program> [args..] lex` for the lexer automaton
//! - `<program> [args..] parse --algorithm <id> [--raw]` for everything else
//!
//! The editor text is written to stdin. Exit status 0 means stdout is the
//! payload; any other status means the trimmed stderr is the diagnostic.
//! Output may start before the input has been read completely.

use crate::engine::Engine;
use crate::model::{Algorithm, EngineError};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use tracing::{debug, trace};

/// Default program name looked up on `PATH`.
pub const DEFAULT_ENGINE_PROGRAM: &str = "gramviz-engine";

/// Runs the engine as a child process per computation.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandEngine {
    /// Engine run as `program` with no extra arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Arguments placed before the subcommand on every invocation.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Executable this engine runs.
    pub fn program(&self) -> &PathBuf {
        &self.program
    }

    fn run(&self, subcommand: &[&str], text: &str) -> Result<String, EngineError> {
        debug!(program = ?self.program, ?subcommand, "Invoking engine");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .args(subcommand)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                EngineError::new(format!(
                    "failed to start engine '{}': {}",
                    self.program.display(),
                    e
                ))
            })?;

        // stdin is fed from a second thread while stdout and stderr drain, so
        // an engine that answers before reading all of its input cannot
        // stall on a full pipe.
        let stdin = child.stdin.take();
        let output = thread::scope(|scope| {
            if let Some(mut stdin) = stdin {
                scope.spawn(move || {
                    // A broken pipe only means the engine stopped reading
                    // early; its exit status still decides the outcome.
                    if let Err(e) = stdin.write_all(text.as_bytes()) {
                        trace!(error = %e, "Engine closed stdin early");
                    }
                });
            }
            child.wait_with_output()
        })
        .map_err(|e| {
            EngineError::new(format!(
                "failed to wait for engine '{}': {}",
                self.program.display(),
                e
            ))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr.trim();
            return Err(if message.is_empty() {
                EngineError::new(format!(
                    "engine '{}' exited with {}",
                    self.program.display(),
                    output.status
                ))
            } else {
                EngineError::new(message)
            });
        }

        String::from_utf8(output.stdout)
            .map_err(|_| EngineError::new("engine produced output that is not valid UTF-8"))
    }
}

impl Engine for CommandEngine {
    fn lex(&self, text: &str) -> Result<String, EngineError> {
        self.run(&["lex"], text)
    }

    fn parse(&self, text: &str, algorithm: &Algorithm, raw_mode: bool) -> Result<String, EngineError> {
        let mut subcommand = vec!["parse", "--algorithm", algorithm.as_str()];
        if raw_mode {
            subcommand.push("--raw");
        }
        self.run(&subcommand, text)
    }
}

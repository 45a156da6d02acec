//! Graph renderer backed by the Graphviz `dot` program.

use crate::model::RenderError;
use crate::render::{GraphRenderer, RasterImage, SvgFragment};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use tracing::{debug, trace};

/// Default program name looked up on `PATH`.
pub const DEFAULT_DOT_PROGRAM: &str = "dot";

/// Pipes graph descriptions through `dot -T<format>`.
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    program: PathBuf,
    args: Vec<String>,
}

impl GraphvizRenderer {
    /// Renderer running `program` with no extra arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Arguments placed before the `-T` flag on every invocation.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    fn run(&self, format: &str, description: &str) -> Result<Vec<u8>, RenderError> {
        let program = self.program.display().to_string();
        debug!(%program, format, "Rendering graph description");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(format!("-T{format}"))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| RenderError::Spawn {
                program: program.clone(),
                reason: e.to_string(),
            })?;

        let stdin = child.stdin.take();
        let output = thread::scope(|scope| {
            if let Some(mut stdin) = stdin {
                scope.spawn(move || {
                    // dot may exit before reading everything; its status decides.
                    if let Err(e) = stdin.write_all(description.as_bytes()) {
                        trace!(error = %e, "Renderer closed stdin early");
                    }
                });
            }
            child.wait_with_output()
        })
        .map_err(|e| RenderError::Spawn {
            program: program.clone(),
            reason: e.to_string(),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(RenderError::Rejected {
                message: if stderr.is_empty() {
                    format!("{program} exited with {}", output.status)
                } else {
                    stderr
                },
            });
        }

        Ok(output.stdout)
    }
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_DOT_PROGRAM)
    }
}

impl GraphRenderer for GraphvizRenderer {
    fn render_svg(&self, description: &str) -> Result<SvgFragment, RenderError> {
        let bytes = self.run("svg", description)?;
        let markup = String::from_utf8(bytes)
            .map_err(|_| RenderError::MalformedSvg("output is not valid UTF-8".to_string()))?;
        SvgFragment::parse(markup)
    }

    fn render_raster(&self, description: &str) -> Result<RasterImage, RenderError> {
        let bytes = self.run("png", description)?;
        RasterImage::from_png(bytes)
    }
}

//! gramviz - Entry Point

use clap::Parser;
use gramviz::model::{Algorithm, AppError, OutputFormat};
use std::path::PathBuf;
use tracing::info;

/// gramviz - visualize parser and lexer generator automata in the terminal
#[derive(Parser, Debug)]
#[command(name = "gramviz")]
#[command(version)]
#[command(about = "Edit a grammar and watch its automaton update in the terminal")]
pub struct Args {
    /// Grammar file loaded into the editor (starts empty if not provided)
    pub file: Option<PathBuf>,

    /// Initial algorithm: dfa, lr(0), lr(1), lalr(1), ll(1) (aliases lr0, lr1, lalr1, ll1)
    #[arg(short, long)]
    pub algorithm: Option<Algorithm>,

    /// Initial image format: svg or png
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Start with raw (textual) output
    #[arg(long)]
    pub raw: bool,

    /// Engine program
    #[arg(long)]
    pub engine: Option<PathBuf>,

    /// Graphviz program used to render graphs
    #[arg(long)]
    pub dot: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Flags the user actually set, for the last step of the precedence chain.
    fn cli_overrides(&self) -> gramviz::config::CliOverrides {
        gramviz::config::CliOverrides {
            algorithm: self.algorithm.clone(),
            format: self.format,
            raw: if self.raw { Some(true) } else { None },
            engine_program: self.engine.clone(),
            dot_program: self.dot.clone(),
        }
    }
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = gramviz::config::load_config_with_precedence(args.config.clone())?;
        let merged = gramviz::config::merge_config(config_file)?;
        let with_env = gramviz::config::apply_env_overrides(merged)?;
        gramviz::config::apply_cli_overrides(with_env, args.cli_overrides())
    };

    gramviz::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let initial_text = gramviz::source::read_grammar(args.file.as_deref())?;

    gramviz::view::run_with_config(&config, &initial_text, args.no_color)?;

    Ok(())
}

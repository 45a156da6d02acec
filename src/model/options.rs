//! User-controlled options: algorithm, output format and raw mode.
//!
//! `Options` persists for the whole session and is mutated only by UI
//! controls. A copy of it (a snapshot) travels with every computation so the
//! result is always rendered under the options that produced it.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier of the lexer automaton. Routed to `lex`, never to `parse`.
pub const DFA: &str = "dfa";
/// LR(0) automaton.
pub const LR0: &str = "lr(0)";
/// Canonical LR(1) automaton.
pub const LR1: &str = "lr(1)";
/// LALR(1) automaton.
pub const LALR1: &str = "lalr(1)";
/// LL(1) parse table.
pub const LL1: &str = "ll(1)";

/// Order used when cycling through algorithms from the UI.
pub const ALGORITHM_CYCLE: [&str; 5] = [LALR1, LR1, LR0, LL1, DFA];

/// Rejected algorithm identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Algorithm identifier must not be empty")]
pub struct InvalidAlgorithm;

/// Opaque algorithm identifier agreed upon with the engine.
///
/// Known identifiers are listed in [`ALGORITHM_CYCLE`]; anything else is
/// passed through untouched and the engine decides whether it supports it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Algorithm(String);

impl Algorithm {
    /// Smart constructor: trims, rejects empty input and maps known
    /// identifiers and their short aliases (`lalr1`, `LALR(1)` → `lalr(1)`)
    /// to the canonical lowercase form, ignoring case.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidAlgorithm> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidAlgorithm);
        }
        let normalised = match trimmed.to_ascii_lowercase().as_str() {
            "dfa" => DFA.to_string(),
            "lr0" | "lr(0)" => LR0.to_string(),
            "lr1" | "lr(1)" => LR1.to_string(),
            "lalr1" | "lalr(1)" => LALR1.to_string(),
            "ll1" | "ll(1)" => LL1.to_string(),
            _ => trimmed.to_string(),
        };
        Ok(Self(normalised))
    }

    /// The lexer automaton for one regular expression per line.
    pub fn dfa() -> Self {
        Self(DFA.to_string())
    }

    /// Default parser algorithm.
    pub fn lalr1() -> Self {
        Self(LALR1.to_string())
    }

    /// Predictive parser; its output is a table, shown as text by default.
    pub fn ll1() -> Self {
        Self(LL1.to_string())
    }

    /// Normalised identifier as passed to the engine.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this algorithm is served by the engine's `lex` entry point.
    pub fn is_lexer(&self) -> bool {
        self.0 == DFA
    }

    /// Next algorithm in [`ALGORITHM_CYCLE`]; unknown identifiers restart
    /// the cycle at its first entry.
    pub fn next(&self) -> Self {
        let idx = ALGORITHM_CYCLE.iter().position(|a| *a == self.0);
        let next = match idx {
            Some(i) => ALGORITHM_CYCLE[(i + 1) % ALGORITHM_CYCLE.len()],
            None => ALGORITHM_CYCLE[0],
        };
        Self(next.to_string())
    }

    /// Previous algorithm in [`ALGORITHM_CYCLE`].
    pub fn prev(&self) -> Self {
        let len = ALGORITHM_CYCLE.len();
        let idx = ALGORITHM_CYCLE.iter().position(|a| *a == self.0);
        let prev = match idx {
            Some(i) => ALGORITHM_CYCLE[(i + len - 1) % len],
            None => ALGORITHM_CYCLE[len - 1],
        };
        Self(prev.to_string())
    }
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::lalr1()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Algorithm {
    type Err = InvalidAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Image format used when the result is a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// Scalable vector graphics, shown inside a pan/zoom viewport.
    #[default]
    Svg,
    /// Raster image, shown without pan/zoom.
    Png,
}

impl OutputFormat {
    /// The other format.
    pub fn toggle(self) -> Self {
        match self {
            Self::Svg => Self::Png,
            Self::Png => Self::Svg,
        }
    }

    /// Lowercase name used on the command line and in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown output format name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown output format '{0}', expected 'svg' or 'png'")]
pub struct InvalidFormat(pub String);

impl FromStr for OutputFormat {
    type Err = InvalidFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            _ => Err(InvalidFormat(s.to_string())),
        }
    }
}

/// Snapshot of the user-selected options.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Options {
    /// Algorithm the engine runs.
    pub algorithm: Algorithm,
    /// Forces textual output regardless of algorithm.
    pub raw_mode: bool,
    /// Image format for graph results.
    pub format: OutputFormat,
}

impl Options {
    /// Build a snapshot from its three parts.
    pub fn new(algorithm: Algorithm, raw_mode: bool, format: OutputFormat) -> Self {
        Self {
            algorithm,
            raw_mode,
            format,
        }
    }

    /// Apply a change and return whether the options actually changed.
    pub fn apply(&mut self, change: &OptionChange) -> bool {
        match change {
            OptionChange::Algorithm(algorithm) => {
                let changed = self.algorithm != *algorithm;
                self.algorithm = algorithm.clone();
                changed
            }
            OptionChange::RawMode(raw) => {
                let changed = self.raw_mode != *raw;
                self.raw_mode = *raw;
                changed
            }
            OptionChange::Format(format) => {
                let changed = self.format != *format;
                self.format = *format;
                changed
            }
        }
    }
}

/// A single user edit to [`Options`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionChange {
    /// Select another algorithm.
    Algorithm(Algorithm),
    /// Switch raw (textual) output on or off.
    RawMode(bool),
    /// Select another image format.
    Format(OutputFormat),
}

impl OptionChange {
    /// Whether the engine output depends on this option.
    ///
    /// `format` is purely presentational: the engine never sees it, so a
    /// format change only re-renders the existing result.
    pub fn requires_recompute(&self) -> bool {
        !matches!(self, OptionChange::Format(_))
    }
}

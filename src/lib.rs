//! gramviz
//!
//! Terminal visualizer for parser and lexer generator automata. The user
//! edits a grammar, an external engine turns it into a graph description or
//! a textual trace, and the output pane shows the result as a pannable,
//! zoomable graph, a raster image summary or plain text.
//!
//! Pure core: [`model`], [`engine`] routing, [`render`] presentation rules,
//! [`viewport`] and [`state`]. Impure shell: the engine and renderer
//! processes, [`config`] loading, [`logging`] and the [`view`] event loop.

pub mod config;
pub mod engine;
pub mod logging;
pub mod model;
pub mod render;
pub mod source;
pub mod state;
pub mod view;
pub mod viewport;

#[cfg(test)]
mod test_support;

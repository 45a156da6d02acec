//! Initial editor content.
//!
//! The grammar file named on the command line is read once at startup;
//! after that the editor buffer is the only source of text.

use crate::model::error::InputError;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Read the initial grammar text.
///
/// Without a path the editor starts empty.
///
/// # Errors
///
/// Returns `InputError::FileNotFound` if the file does not exist.
/// Returns `InputError::Io` for other I/O errors, including non-UTF-8 content.
pub fn read_grammar(path: Option<&Path>) -> Result<String, InputError> {
    let Some(path) = path else {
        return Ok(String::new());
    };

    match std::fs::read_to_string(path) {
        Ok(text) => {
            debug!(path = %path.display(), bytes = text.len(), "Loaded grammar file");
            Ok(text)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Err(InputError::FileNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(InputError::Io(e)),
    }
}

//! Error types for validgen
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for validgen operations
pub type ValidgenResult<T> = Result<T, ValidgenError>;

/// Main error type for validgen operations
#[derive(Error, Debug)]
pub enum ValidgenError {
    /// Declaration source could not be parsed
    #[error("{file}:{line}:{column}: {message}")]
    Source {
        file: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// A statement failed to render for an entity
    #[error("failed to render Valid() for {entity}: {message}")]
    Render { entity: String, message: String },

    /// Generated output is not syntactically valid Go
    #[error("generated output is not valid Go (line {line}): {message}")]
    Format {
        line: usize,
        message: String,
        /// The raw concatenated output, kept for diagnosis
        output: String,
    },

    /// Config file failed to deserialize
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ValidgenError {
    /// Raw generated text attached to a formatting failure
    pub fn output(&self) -> Option<&str> {
        match self {
            ValidgenError::Format { output, .. } => Some(output),
            _ => None,
        }
    }
}

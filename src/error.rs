//! Error types shared by the codec, the query engine and the transport layer.

use std::fmt;
use thiserror::Error;

/// Position-tagged failure to match the course document grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    /// 1-based line of the offending token.
    pub line: usize,
    /// 1-based column (in characters) of the offending token.
    pub column: usize,
    pub message: String,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}: {}", self.line, self.column, self.message)
    }
}

impl std::error::Error for FormatError {}

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The input text does not match the course document grammar.
    #[error("Course data not in the correct format: {0}")]
    Format(#[from] FormatError),

    /// The caller passed a request the engine cannot honour.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Reading from or writing to a channel failed.
    #[error("I/O error on {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// A configuration or query plan file could not be used.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }
}

/// A convenience `Result` type alias using the crate's `Error` type.
pub type Result<T> = std::result::Result<T, Error>;

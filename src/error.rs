//! Error types for perfreport

use std::io;
use thiserror::Error;

/// Result type alias for perfreport operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for perfreport
#[derive(Error, Debug)]
pub enum Error {
    /// A duration string or stored-report line does not match the required shape.
    #[error("Format error: {0}")]
    Format(String),

    /// An OK/FAILED marker line's `name (ms)` suffix failed to parse.
    #[error("Parse error at line {line}: {text}")]
    Parse {
        /// 1-based line number of the offending line.
        line: usize,
        /// The offending text.
        text: String,
    },

    /// A closing marker was seen with no record open.
    #[error("Sequence error at line {line}: {message}")]
    Sequence {
        /// 1-based line number of the offending line.
        line: usize,
        /// Description of the ordering violation.
        message: String,
    },

    /// Configuration file error or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Other error with custom message.
    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

//! Error types for graph construction and persistence.

use thiserror::Error;

/// Errors raised while building, loading or generating graphs.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Reading or writing an edge list failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line of an edge list could not be parsed as `a,b`.
    #[error("Malformed edge list at line {line}: {content:?}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// The offending line.
        content: String,
    },

    /// A generator was called with parameters outside its domain.
    #[error("Invalid generator parameter: {0}")]
    InvalidParameter(String),
}

impl GraphError {
    /// Create a parse error for a 1-based line number.
    pub fn parse(line: usize, content: impl Into<String>) -> Self {
        Self::Parse {
            line,
            content: content.into(),
        }
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use crate::parser::fsa::Token;
use thiserror::Error;

/// Errors that can occur while reading a trace file
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("line {line}: unexpected {found} (expected {expected}): {raw:?}")]
    Structural {
        /// 1-based; at end of input, the last line read (0 for empty input)
        line: usize,
        raw: String,
        found: Token,
        expected: &'static str,
    },

    #[error("line {line}: malformed number in {raw:?}")]
    InvalidNumber { line: usize, raw: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Line number of the offending input, if the error came from the text
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Structural { line, .. } | ParseError::InvalidNumber { line, .. } => {
                Some(*line)
            }
            ParseError::Io(_) => None,
        }
    }
}

/// Errors that can occur while rebuilding a call tree from trace entries
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TreeError {
    #[error("{pending} call frame(s) never received all their callees (innermost: entry {entry})")]
    Unresolved { pending: usize, entry: usize },

    #[error("entry {entry} is function #{found} but its caller recorded a call to #{expected}")]
    CalleeMismatch {
        entry: usize,
        expected: u32,
        found: u32,
    },
}

/// Errors in run configuration, raised before any input is read
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("unknown aggregation mode '{0}' (expected 'func-file' or 'none')")]
    UnknownAggregationMode(String),

    #[error("threshold must be a finite, non-negative percentage (got {0})")]
    InvalidThreshold(f64),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

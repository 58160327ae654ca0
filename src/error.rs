//! Error types for comparison runs.
//!
//! Schema violations are not errors: they are reported through
//! [`Outcome::Mismatch`](crate::diff::Outcome). Everything here aborts the run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a comparison before it can produce an outcome.
#[derive(Error, Debug)]
pub enum CompareError {
    #[error("Failed to open file: {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read line {line}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("Missing header line in {source_name}")]
    MissingHeader { source_name: String },

    #[error("Line {line}: column '{column}' is not a number: {value:?}")]
    InvalidNumber {
        line: usize,
        column: String,
        value: String,
    },

    #[error("Failed to load schema file: {}", path.display())]
    SchemaFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Invalid tolerance for column '{column}': {value}")]
    InvalidTolerance { column: String, value: String },
}

/// Result type alias for comparison operations.
pub type Result<T> = std::result::Result<T, CompareError>;

//! Error types for the Lineage pipeline
//!
//! Every failure is fatal to the stage that raised it:
//! - Distinct error types for I/O, parse and schema failures
//! - Machine-readable error codes for the batch runner's exit summary
//! - No retries and no partial output

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using PipelineError
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Input errors (1xxx)
    IoError,
    ParseError,
    InvalidShard,

    // Record errors (2xxx)
    SchemaViolation,
    AmbiguousName,
    IdSequence,

    // Internal errors (9xxx)
    SerializationError,
    ConfigurationError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            ErrorCode::IoError => 1001,
            ErrorCode::ParseError => 1002,
            ErrorCode::InvalidShard => 1003,

            ErrorCode::SchemaViolation => 2001,
            ErrorCode::AmbiguousName => 2002,
            ErrorCode::IdSequence => 2003,

            ErrorCode::SerializationError => 9001,
            ErrorCode::ConfigurationError => 9002,
        }
    }
}

/// Pipeline error types
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid shard {}: {message}", .path.display())]
    InvalidShard { path: PathBuf, message: String },

    #[error("Record {index} violates schema: {message}")]
    SchemaViolation { index: usize, message: String },

    #[error("Name {name:?} is carried by several records: {ids:?}")]
    AmbiguousName { name: String, ids: Vec<u32> },

    #[error("Record {index} has id {found:?}, expected {expected}")]
    IdSequence {
        index: usize,
        expected: u32,
        found: Option<u32>,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl PipelineError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            PipelineError::Io { .. } => ErrorCode::IoError,
            PipelineError::Parse { .. } => ErrorCode::ParseError,
            PipelineError::InvalidShard { .. } => ErrorCode::InvalidShard,
            PipelineError::SchemaViolation { .. } => ErrorCode::SchemaViolation,
            PipelineError::AmbiguousName { .. } => ErrorCode::AmbiguousName,
            PipelineError::IdSequence { .. } => ErrorCode::IdSequence,
            PipelineError::Serialization(_) => ErrorCode::SerializationError,
            PipelineError::Configuration { .. } => ErrorCode::ConfigurationError,
        }
    }

    /// Whether the failure came from the input data rather than the environment
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            PipelineError::Parse { .. }
                | PipelineError::InvalidShard { .. }
                | PipelineError::SchemaViolation { .. }
                | PipelineError::AmbiguousName { .. }
                | PipelineError::IdSequence { .. }
        )
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        PipelineError::Parse {
            path: path.into(),
            source,
        }
    }
}

impl From<::config::ConfigError> for PipelineError {
    fn from(err: ::config::ConfigError) -> Self {
        PipelineError::Configuration {
            message: err.to_string(),
        }
    }
}

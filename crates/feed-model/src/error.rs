//! Error types for the feed-model crate.
//!
//! Everything that can go wrong before an engine is built lives here:
//! reading files, decoding JSON, and rejecting rule sets the engine
//! must never see.

use thiserror::Error;

/// Errors that can occur while loading configs and feeds
#[derive(Error, Debug)]
pub enum FeedModelError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in a feed file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// The config document is not valid JSON or has the wrong shape
    #[error("Invalid config document: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    /// A config field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Config validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, FeedModelError>;

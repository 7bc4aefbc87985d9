//! Error types for the Sift library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`SiftError`] enum.
//!
//! # Examples
//!
//! ```
//! use sift::error::{Result, SiftError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SiftError::invalid_argument("page must be at least 1"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for Sift operations.
///
/// Conditions that are normal search outcomes (an empty query, an unknown
/// term, a page past the end, removing an id that was never added) are not
/// errors and never produce one of these variants.
#[derive(Error, Debug)]
pub enum SiftError {
    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The raw query input was not a well-formed string.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// A caller-supplied argument was out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Index-related errors
    #[error("Index error: {0}")]
    Index(String),

    /// Analysis-related errors (tokenization, filtering)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Snapshot encoding/decoding errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SiftError.
pub type Result<T> = std::result::Result<T, SiftError>;

impl SiftError {
    /// Create a new invalid query error.
    pub fn invalid_query<S: Into<String>>(msg: S) -> Self {
        SiftError::InvalidQuery(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SiftError::InvalidArgument(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        SiftError::InvalidArgument(format!("Invalid configuration: {}", msg.into()))
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        SiftError::Index(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SiftError::Analysis(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        SiftError::Storage(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        SiftError::Serialization(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        SiftError::Storage(format!("Not found: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SiftError::Other(msg.into())
    }
}

impl From<bincode::Error> for SiftError {
    fn from(err: bincode::Error) -> Self {
        SiftError::Serialization(err.to_string())
    }
}

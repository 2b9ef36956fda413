//! Common error types for VTSearch

use thiserror::Error;

/// Common result type for VTSearch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across VTSearch crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset file could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested dataset, clip or eval entry not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Dataset source parsed but violates a dataset invariant
    #[error("Invalid dataset '{name}': {reason}")]
    InvalidDataset { name: String, reason: String },
}

//! Common error types for KeywordInsight

use thiserror::Error;

/// Common result type for KeywordInsight operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across KeywordInsight services
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Nothing to export for the requested keyword
    #[error("No data: {0}")]
    NoData(String),

    /// Resource already exists (e.g. duplicate waitlist email)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

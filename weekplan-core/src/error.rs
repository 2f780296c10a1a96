//! Error types for the weekplan engine.

use thiserror::Error;

/// Errors that can occur in weekplan operations.
#[derive(Error, Debug)]
pub enum WeekplanError {
    /// Malformed date or time string. Persisted data is expected to be
    /// well-formed; hitting this outside input parsing is a data-integrity bug.
    #[error("Invalid date or time: {0}")]
    TimeParse(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Override not found: {0}")]
    OverrideNotFound(String),

    #[error("User profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for weekplan operations.
pub type WeekplanResult<T> = Result<T, WeekplanError>;

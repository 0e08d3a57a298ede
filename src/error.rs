//! Error types for MELVA.
//!
//! The tutoring engine itself never fails; these cover configuration,
//! generator selection and the session store behind the HTTP API.

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum TutorError {
    /// Invalid or unparseable configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No session with the given ID.
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Generator name that maps to no `ResponseGenerator`.
    #[error("Unknown generator: {0} (expected \"tutor\" or \"knowledge\")")]
    UnknownGenerator(String),

    /// Serialization or deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for TutorError {
    fn from(e: serde_json::Error) -> Self {
        TutorError::Serialization(e.to_string())
    }
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, TutorError>;

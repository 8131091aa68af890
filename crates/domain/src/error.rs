//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The request payload cannot be carried the way the method requires.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// A roadmap operation would break the prerequisite graph.
    #[error("invalid roadmap: {0}")]
    InvalidRoadmap(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

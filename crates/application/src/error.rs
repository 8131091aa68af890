//! Application error types

use thiserror::Error;

use scholar_domain::{DomainError, ErrorPayload, FailureKind, RoadmapError};

use crate::ports::SessionError;

/// Errors returned by the portal API modules.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The portal call failed.
    #[error("{message}")]
    Request {
        /// Failure category
        kind: FailureKind,
        /// HTTP status, when a response was received
        status: Option<u16>,
        /// Message shown to the user
        message: String,
    },

    /// The input was rejected before any request was sent.
    #[error("{0}")]
    Validation(String),

    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// A roadmap change was rejected locally.
    #[error(transparent)]
    Roadmap(#[from] RoadmapError),

    /// The session could not be persisted.
    #[error("session error: {0}")]
    Session(#[from] SessionError),
}

impl ApiError {
    /// Returns true if the portal rejected the session.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::Request {
                kind: FailureKind::Unauthorized,
                ..
            }
        )
    }

    /// HTTP status of a failed portal call, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<ErrorPayload> for ApiError {
    fn from(error: ErrorPayload) -> Self {
        Self::Request {
            kind: error.kind,
            status: error.status,
            message: error.message,
        }
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_error_payload_keeps_message_and_status() {
        let err: ApiError = ErrorPayload::with_status(FailureKind::Server, 404, "not found").into();

        assert_eq!(err.to_string(), "not found");
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_unauthorized() {
        let err: ApiError = ErrorPayload::with_status(FailureKind::Unauthorized, 401, "x").into();
        assert!(err.is_unauthorized());
        assert_eq!(ApiError::Validation("bad".into()).status(), None);
    }
}

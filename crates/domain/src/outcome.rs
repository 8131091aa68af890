//! Uniform result of a dispatched API call.
//!
//! Every caller above the dispatcher sees a [`RequestOutcome`] and never a
//! raw transport error. An outcome is either a success carrying data or a
//! failure carrying an [`ErrorPayload`], never both.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Categories of request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// No response reached the client (DNS, connect, timeout, ...).
    Transport,

    /// The server answered with a non-2xx status other than 401.
    Server,

    /// The server kept rejecting the credentials after the refresh cycle.
    Unauthorized,

    /// A 2xx response body did not match the expected shape.
    Decode,

    /// The request could not be built (bad URL, unencodable payload).
    InvalidRequest,
}

impl FailureKind {
    /// Returns a human-readable title for this failure kind.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Transport => "Network Error",
            Self::Server => "Server Error",
            Self::Unauthorized => "Not Authorized",
            Self::Decode => "Unexpected Response",
            Self::InvalidRequest => "Invalid Request",
        }
    }
}

/// Error half of a [`RequestOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Failure category
    pub kind: FailureKind,
    /// HTTP status, when a response was received
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Message shown to the user
    pub message: String,
}

impl ErrorPayload {
    /// Creates an error payload without a status code.
    #[must_use]
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
        }
    }

    /// Creates an error payload for a received HTTP status.
    #[must_use]
    pub fn with_status(kind: FailureKind, status: u16, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: Some(status),
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ErrorPayload {}

/// Result of one logical API call.
///
/// Serializes as `{"success": true, "data": ...}` or
/// `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum RequestOutcome<T> {
    /// The call succeeded.
    Success {
        /// Decoded response data.
        data: T,
    },
    /// The call failed.
    Failure {
        /// What went wrong.
        error: ErrorPayload,
    },
}

impl<T> RequestOutcome<T> {
    /// Creates a successful outcome.
    pub const fn success(data: T) -> Self {
        Self::Success { data }
    }

    /// Creates a failed outcome.
    pub const fn failure(error: ErrorPayload) -> Self {
        Self::Failure { error }
    }

    /// Returns true if the call succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns the data if the call succeeded.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    /// Returns the error if the call failed.
    #[must_use]
    pub const fn error(&self) -> Option<&ErrorPayload> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }

    /// Maps the success data, leaving failures untouched.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> RequestOutcome<U> {
        match self {
            Self::Success { data } => RequestOutcome::Success { data: f(data) },
            Self::Failure { error } => RequestOutcome::Failure { error },
        }
    }

    /// Returns the data, or `fallback` when the call failed.
    pub fn unwrap_or(self, fallback: T) -> T {
        match self {
            Self::Success { data } => data,
            Self::Failure { .. } => fallback,
        }
    }

    /// Converts into a standard `Result`.
    ///
    /// # Errors
    ///
    /// Returns the [`ErrorPayload`] when the call failed.
    pub fn into_result(self) -> Result<T, ErrorPayload> {
        match self {
            Self::Success { data } => Ok(data),
            Self::Failure { error } => Err(error),
        }
    }
}

impl<T> From<RequestOutcome<T>> for Result<T, ErrorPayload> {
    fn from(outcome: RequestOutcome<T>) -> Self {
        outcome.into_result()
    }
}

impl<T: Serialize> Serialize for RequestOutcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RequestOutcome", 2)?;
        match self {
            Self::Success { data } => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            Self::Failure { error } => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", &error.message)?;
            }
        }
        state.end()
    }
}

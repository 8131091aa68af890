//! HTTP transport port

use async_trait::async_trait;
use thiserror::Error;

use scholar_domain::{request::RequestSpec, response::ResponseSpec};

/// Errors raised when no HTTP response could be obtained.
///
/// A received response with an error status is not a transport error; it is
/// returned as a [`ResponseSpec`] and classified by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request body could not be encoded.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// The host name could not be resolved.
    #[error("could not resolve host {host}: {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Underlying error message.
        message: String,
    },

    /// The server refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The request took longer than the configured timeout.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
    },

    /// The redirect limit was exceeded.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit.
        max: usize,
    },

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Port for sending a single HTTP request.
///
/// Implementations perform exactly one network call per invocation and do
/// not retry.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends the request and returns whatever response the server gave.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if no response was received.
    async fn send(&self, request: &RequestSpec) -> Result<ResponseSpec, TransportError>;
}

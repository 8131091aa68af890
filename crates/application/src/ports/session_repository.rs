//! Session repository port
//!
//! Defines the interface for keeping the signed-in session between runs.

use async_trait::async_trait;

use scholar_domain::AuthTokens;

/// Errors that can occur during session persistence.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// No location is available to store the session.
    #[error("could not determine where to store the session")]
    NoLocation,
}

/// Repository trait for session persistence.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Loads the stored session, if any.
    ///
    /// # Errors
    /// Returns an error if the session exists but cannot be read.
    async fn load(&self) -> Result<Option<AuthTokens>, SessionError>;

    /// Stores the session, replacing any previous one.
    ///
    /// # Errors
    /// Returns an error if the session cannot be written.
    async fn save(&self, tokens: &AuthTokens) -> Result<(), SessionError>;

    /// Removes the stored session. Succeeds if none exists.
    ///
    /// # Errors
    /// Returns an error if an existing session cannot be removed.
    async fn clear(&self) -> Result<(), SessionError>;
}

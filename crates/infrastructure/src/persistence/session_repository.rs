//! File-based session persistence.
//!
//! The session is stored in the platform-specific config directory:
//! - Linux: ~/.config/scholar/session.json
//! - macOS: ~/Library/Application Support/scholar/session.json
//! - Windows: %APPDATA%/scholar/session.json

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use scholar_application::ports::{SessionError, SessionRepository};
use scholar_domain::AuthTokens;

use crate::serialization::{from_json_bytes, to_json_pretty_bytes};

/// Stores the session tokens in a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionRepository {
    path: PathBuf,
}

impl FileSessionRepository {
    /// Creates a repository backed by the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a repository at the default location.
    ///
    /// # Errors
    /// Returns [`SessionError::NoLocation`] if the platform has no config
    /// directory.
    pub fn at_default_location() -> Result<Self, SessionError> {
        Self::default_path()
            .map(Self::new)
            .ok_or(SessionError::NoLocation)
    }

    /// Returns the default session file path, if available.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("scholar").join("session.json"))
    }

    /// The session file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionRepository for FileSessionRepository {
    async fn load(&self) -> Result<Option<AuthTokens>, SessionError> {
        let content = match fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let tokens = from_json_bytes(&content)
            .map_err(|e| SessionError::Serialization(e.to_string()))?;
        debug!(path = %self.path.display(), "session loaded");
        Ok(Some(tokens))
    }

    async fn save(&self, tokens: &AuthTokens) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let content =
            to_json_pretty_bytes(tokens).map_err(|e| SessionError::Serialization(e.to_string()))?;
        fs::write(&self.path, content).await?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

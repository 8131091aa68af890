//! Token refresh port

use async_trait::async_trait;

/// Port for obtaining a new access token.
///
/// A successful refresh has already written the new tokens to the shared
/// token store by the time it returns `true`.
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    /// Attempts a refresh and reports whether a new access token was obtained.
    async fn refresh(&self) -> bool;
}

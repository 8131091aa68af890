//! In-memory session token storage with expiry tracking.
//!
//! The store is a cloneable handle over shared state. Every write bumps a
//! generation counter so callers can tell whether the tokens changed since
//! they last looked.

use std::sync::Arc;
use tokio::sync::RwLock;

use scholar_domain::{AuthTokens, TokenGrant};

#[derive(Debug, Default)]
struct State {
    tokens: AuthTokens,
    generation: u64,
}

impl State {
    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

/// Thread-safe in-memory token store.
#[derive(Debug, Clone)]
pub struct TokenStore {
    state: Arc<RwLock<State>>,
    /// Seconds before expiry to report the token as expiring.
    refresh_buffer_seconds: i64,
}

impl TokenStore {
    /// Create an empty token store with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_refresh_buffer(60)
    }

    /// Create with custom refresh buffer.
    #[must_use]
    pub fn with_refresh_buffer(refresh_buffer_seconds: i64) -> Self {
        Self {
            state: Arc::new(RwLock::new(State::default())),
            refresh_buffer_seconds,
        }
    }

    /// Create a store that starts with the given tokens.
    #[must_use]
    pub fn with_tokens(tokens: AuthTokens) -> Self {
        Self {
            state: Arc::new(RwLock::new(State {
                tokens,
                generation: 0,
            })),
            refresh_buffer_seconds: 60,
        }
    }

    /// Returns a copy of the current tokens.
    pub async fn snapshot(&self) -> AuthTokens {
        self.state.read().await.tokens.clone()
    }

    /// Returns a copy of the current tokens with the generation they belong to.
    pub async fn versioned_snapshot(&self) -> (AuthTokens, u64) {
        let state = self.state.read().await;
        (state.tokens.clone(), state.generation)
    }

    /// Replaces the tokens.
    pub async fn set(&self, tokens: AuthTokens) {
        let mut state = self.state.write().await;
        state.tokens = tokens;
        state.bump();
    }

    /// Applies a login or refresh grant and returns the resulting tokens.
    pub async fn apply_grant(&self, grant: TokenGrant) -> AuthTokens {
        let mut state = self.state.write().await;
        state.tokens.apply_grant(grant);
        state.bump();
        state.tokens.clone()
    }

    /// Forgets both tokens.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.tokens = AuthTokens::default();
        state.bump();
    }

    /// Number of writes since the store was created.
    pub async fn generation(&self) -> u64 {
        self.state.read().await.generation
    }

    /// Returns true if an access token is present.
    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.tokens.is_authenticated()
    }

    /// Get token status for display.
    pub async fn status(&self) -> TokenStatus {
        let state = self.state.read().await;
        let tokens = &state.tokens;
        if !tokens.is_authenticated() {
            TokenStatus::NotAuthenticated
        } else if tokens.is_expired_or_expiring(0) {
            TokenStatus::Expired {
                can_refresh: tokens.can_refresh(),
            }
        } else if tokens.is_expired_or_expiring(self.refresh_buffer_seconds) {
            TokenStatus::Expiring {
                seconds_remaining: tokens.seconds_until_expiry().unwrap_or(0),
                can_refresh: tokens.can_refresh(),
            }
        } else {
            TokenStatus::Valid {
                seconds_remaining: tokens.seconds_until_expiry(),
            }
        }
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Status of the session token for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    /// No access token is stored.
    NotAuthenticated,
    /// Token is valid and not expiring soon.
    Valid {
        /// Seconds until expiry, or None if no expiry.
        seconds_remaining: Option<i64>,
    },
    /// Token is valid but will expire soon.
    Expiring {
        /// Seconds until expiry.
        seconds_remaining: i64,
        /// Whether the token can be refreshed.
        can_refresh: bool,
    },
    /// Token has expired.
    Expired {
        /// Whether the token can be refreshed.
        can_refresh: bool,
    },
}

impl TokenStatus {
    /// Returns true if the token is valid (not expired).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. } | Self::Expiring { .. })
    }

    /// Returns true if the token needs attention (expiring or expired).
    #[must_use]
    pub const fn needs_attention(&self) -> bool {
        matches!(self, Self::Expiring { .. } | Self::Expired { .. })
    }

    /// Get a user-friendly display message.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::NotAuthenticated => "Not signed in".to_string(),
            Self::Valid {
                seconds_remaining: Some(secs),
            } => {
                if *secs > 3600 {
                    format!("Signed in, valid for {} hours", secs / 3600)
                } else if *secs > 60 {
                    format!("Signed in, valid for {} minutes", secs / 60)
                } else {
                    format!("Signed in, valid for {secs} seconds")
                }
            }
            Self::Valid {
                seconds_remaining: None,
            } => "Signed in".to_string(),
            Self::Expiring {
                seconds_remaining,
                can_refresh,
            } => {
                let refresh_hint = if *can_refresh {
                    " (will refresh on next request)"
                } else {
                    ""
                };
                format!("Session expiring in {seconds_remaining} seconds{refresh_hint}")
            }
            Self::Expired { can_refresh } => {
                if *can_refresh {
                    "Session expired (can refresh)".to_string()
                } else {
                    "Session expired".to_string()
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grant(access: &str, refresh: Option<&str>, expires_in: Option<u64>) -> TokenGrant {
        TokenGrant {
            access_token: access.to_string(),
            refresh_token: refresh.map(str::to_string),
            expires_in,
        }
    }

    #[tokio::test]
    async fn test_with_tokens_and_snapshot() {
        let store = TokenStore::with_tokens(AuthTokens::new("access123", "refresh456"));

        let tokens = store.snapshot().await;
        assert_eq!(tokens.access_token.as_deref(), Some("access123"));
        assert!(store.is_authenticated().await);
        assert_eq!(store.generation().await, 0);
    }

    #[tokio::test]
    async fn test_writes_bump_generation() {
        let store = TokenStore::new();
        store.set(AuthTokens::new("a", "r")).await;
        store.apply_grant(grant("b", None, None)).await;
        store.clear().await;

        assert_eq!(store.generation().await, 3);
        assert!(!store.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_apply_grant_keeps_refresh_token() {
        let store = TokenStore::with_tokens(AuthTokens::new("old", "refresh456"));

        let tokens = store.apply_grant(grant("new", None, Some(3600))).await;

        assert_eq!(tokens.access_token.as_deref(), Some("new"));
        assert_eq!(tokens.refresh_token.as_deref(), Some("refresh456"));
        let (snapshot, generation) = store.versioned_snapshot().await;
        assert_eq!(snapshot, tokens);
        assert_eq!(generation, 1);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = TokenStore::new();
        let other = store.clone();

        other.set(AuthTokens::new("shared", "r")).await;

        assert_eq!(
            store.snapshot().await.access_token.as_deref(),
            Some("shared")
        );
    }

    #[tokio::test]
    async fn test_token_status_not_authenticated() {
        let store = TokenStore::new();
        assert_eq!(store.status().await, TokenStatus::NotAuthenticated);
    }

    #[tokio::test]
    async fn test_token_status_valid() {
        let store = TokenStore::new();
        store.apply_grant(grant("access123", Some("r"), Some(3600))).await;

        let status = store.status().await;
        assert!(status.is_valid());
        assert!(!status.needs_attention());
    }

    #[tokio::test]
    async fn test_token_status_expiring() {
        let store = TokenStore::with_refresh_buffer(120);
        store.apply_grant(grant("access123", Some("r"), Some(30))).await;

        let status = store.status().await;
        assert!(status.is_valid());
        assert!(status.needs_attention());
    }

    #[test]
    fn test_token_status_display_messages() {
        assert_eq!(TokenStatus::NotAuthenticated.display_message(), "Not signed in");

        assert!(
            TokenStatus::Valid {
                seconds_remaining: Some(7200)
            }
            .display_message()
            .contains("hours")
        );

        assert!(
            TokenStatus::Expiring {
                seconds_remaining: 30,
                can_refresh: true
            }
            .display_message()
            .contains("will refresh")
        );
    }
}

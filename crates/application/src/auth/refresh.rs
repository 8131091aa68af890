//! Access token refresh.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use scholar_domain::TokenGrant;
use scholar_domain::request::{HttpMethod, RequestSpec};

use super::TokenStore;
use crate::headers::HeaderBuilder;
use crate::ports::{HttpTransport, SessionRepository, TokenRefresher};

/// API path of the refresh endpoint.
pub const REFRESH_PATH: &str = "/auth/refresh";

/// Exchanges the stored refresh token for a new access token.
///
/// Talks to the transport directly so a `401` from the refresh endpoint can
/// never start another refresh.
pub struct SessionRefresher {
    transport: Arc<dyn HttpTransport>,
    store: TokenStore,
    url: String,
    sessions: Option<Arc<dyn SessionRepository>>,
}

impl SessionRefresher {
    /// Creates a refresher posting to the given absolute URL.
    pub fn new(transport: Arc<dyn HttpTransport>, store: TokenStore, url: impl Into<String>) -> Self {
        Self {
            transport,
            store,
            url: url.into(),
            sessions: None,
        }
    }

    /// Persists refreshed tokens through the given repository.
    #[must_use]
    pub fn with_session_repository(mut self, sessions: Arc<dyn SessionRepository>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    async fn forget_session(&self) {
        self.store.clear().await;
        if let Some(sessions) = &self.sessions {
            if let Err(e) = sessions.clear().await {
                warn!(error = %e, "could not remove stored session");
            }
        }
    }
}

#[async_trait]
impl TokenRefresher for SessionRefresher {
    async fn refresh(&self) -> bool {
        let tokens = self.store.snapshot().await;
        let Some(refresh_token) = tokens.refresh_token.clone() else {
            debug!("no refresh token, skipping refresh");
            return false;
        };

        let request = match RequestSpec::build(
            HttpMethod::Post,
            self.url.clone(),
            Some(json!({ "refresh_token": refresh_token })),
            HeaderBuilder::headers_for(&tokens),
        ) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "could not build refresh request");
                return false;
            }
        };

        let response = match self.transport.send(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "token refresh request failed");
                return false;
            }
        };

        if matches!(response.status, 401 | 403) {
            warn!(status = response.status, "refresh token rejected, signing out");
            self.forget_session().await;
            return false;
        }
        if !response.is_success() {
            warn!(status = response.status, "token refresh failed");
            return false;
        }

        let grant: TokenGrant = match response.json_body() {
            Ok(grant) => grant,
            Err(e) => {
                warn!(error = %e, "unexpected token refresh response");
                return false;
            }
        };
        let tokens = self.store.apply_grant(grant).await;
        info!(
            expires_in = tokens.seconds_until_expiry(),
            "access token refreshed"
        );

        if let Some(sessions) = &self.sessions {
            if let Err(e) = sessions.save(&tokens).await {
                warn!(error = %e, "could not persist refreshed session");
            }
        }
        true
    }
}

/// Lets concurrent callers share a single refresh.
///
/// Each caller passes the store generation its failed request was built
/// from. Refreshes run one at a time; a caller whose generation is already
/// outdated reuses the newer tokens instead of refreshing again.
pub struct RefreshGate {
    refresher: Arc<dyn TokenRefresher>,
    store: TokenStore,
    lock: Mutex<()>,
}

impl RefreshGate {
    /// Creates a gate in front of the given refresher.
    pub fn new(refresher: Arc<dyn TokenRefresher>, store: TokenStore) -> Self {
        Self {
            refresher,
            store,
            lock: Mutex::new(()),
        }
    }

    /// Refreshes unless the tokens changed after `observed_generation`.
    pub async fn refresh_after(&self, observed_generation: u64) -> bool {
        let _guard = self.lock.lock().await;
        if self.store.generation().await != observed_generation {
            debug!(observed_generation, "tokens changed since request, reusing them");
            return self.store.is_authenticated().await;
        }
        self.refresher.refresh().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ports::TransportError;
    use crate::testing::{MemorySessionRepository, MockRefresher, MockTransport};
    use pretty_assertions::assert_eq;
    use scholar_domain::AuthTokens;
    use scholar_domain::response::ResponseSpec;

    const URL: &str = "http://portal.test/api/auth/refresh";

    #[tokio::test]
    async fn test_refresh_updates_store_and_session() {
        let transport = MockTransport::json(
            200,
            &json!({"access_token": "new-access", "expires_in": 900}),
        );
        let store = TokenStore::with_tokens(AuthTokens::new("old-access", "R"));
        let sessions = Arc::new(MemorySessionRepository::default());
        let refresher = SessionRefresher::new(transport.clone(), store.clone(), URL)
            .with_session_repository(sessions.clone());

        assert!(refresher.refresh().await);

        let tokens = store.snapshot().await;
        assert_eq!(tokens.access_token.as_deref(), Some("new-access"));
        assert_eq!(tokens.refresh_token.as_deref(), Some("R"));
        assert_eq!(sessions.stored(), Some(tokens));

        let request = transport.last_request();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, URL);
        assert_eq!(request.body, Some(json!({"refresh_token": "R"})));
        assert_eq!(request.headers.get("RefreshToken"), Some("R"));
    }

    #[tokio::test]
    async fn test_refresh_without_refresh_token_makes_no_call() {
        let transport = MockTransport::new();
        let refresher = SessionRefresher::new(transport.clone(), TokenStore::new(), URL);

        assert!(!refresher.refresh().await);
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_rejected_refresh_token_clears_session() {
        let transport = MockTransport::json(401, &json!({"detail": "expired"}));
        let store = TokenStore::with_tokens(AuthTokens::new("A", "R"));
        let sessions = Arc::new(MemorySessionRepository::default());
        sessions.save(&AuthTokens::new("A", "R")).await.unwrap();
        let refresher = SessionRefresher::new(transport, store.clone(), URL)
            .with_session_repository(sessions.clone());

        assert!(!refresher.refresh().await);
        assert!(!store.is_authenticated().await);
        assert_eq!(sessions.stored(), None);
    }

    #[tokio::test]
    async fn test_server_error_keeps_tokens() {
        let transport = MockTransport::replying([ResponseSpec::new(503, "")]);
        let store = TokenStore::with_tokens(AuthTokens::new("A", "R"));
        let refresher = SessionRefresher::new(transport, store.clone(), URL);

        assert!(!refresher.refresh().await);
        assert_eq!(store.snapshot().await, AuthTokens::new("A", "R"));
    }

    #[tokio::test]
    async fn test_transport_error_returns_false() {
        let transport = MockTransport::failing(TransportError::ConnectionFailed("down".into()));
        let store = TokenStore::with_tokens(AuthTokens::new("A", "R"));
        let refresher = SessionRefresher::new(transport, store, URL);

        assert!(!refresher.refresh().await);
    }

    #[tokio::test]
    async fn test_gate_runs_one_refresh_per_generation() {
        let store = TokenStore::with_tokens(AuthTokens::new("A", "R"));
        let refresher = MockRefresher::updating(store.clone());
        let gate = RefreshGate::new(refresher.clone(), store.clone());
        let observed = store.generation().await;

        let (first, second) = tokio::join!(gate.refresh_after(observed), gate.refresh_after(observed));

        assert!(first);
        assert!(second);
        assert_eq!(refresher.calls(), 1);

        assert!(gate.refresh_after(store.generation().await).await);
        assert_eq!(refresher.calls(), 2);
    }

    #[tokio::test]
    async fn test_gate_reports_cleared_session() {
        let store = TokenStore::with_tokens(AuthTokens::new("A", "R"));
        let refresher = MockRefresher::succeeding();
        let gate = RefreshGate::new(refresher.clone(), store.clone());
        let observed = store.generation().await;

        store.clear().await;

        assert!(!gate.refresh_after(observed).await);
        assert_eq!(refresher.calls(), 0);
    }
}

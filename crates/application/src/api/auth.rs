//! Sign-in, sign-out and the current account.

use std::sync::Arc;

use serde::de::IgnoredAny;
use serde_json::json;
use tracing::{info, warn};

use scholar_domain::request::HttpMethod;
use scholar_domain::{AuthTokens, Credentials, RequestOutcome, TokenGrant, UserProfile};

use super::required;
use crate::crud::{CrudClient, NO_PAYLOAD};
use crate::error::ApiResult;
use crate::ports::{SessionError, SessionRepository};

/// Session lifecycle against the portal.
#[derive(Clone)]
pub struct AuthApi {
    crud: CrudClient,
    sessions: Option<Arc<dyn SessionRepository>>,
}

impl AuthApi {
    /// Creates the API over the given façade. When a repository is given the
    /// session survives restarts.
    #[must_use]
    pub fn new(crud: CrudClient, sessions: Option<Arc<dyn SessionRepository>>) -> Self {
        Self { crud, sessions }
    }

    /// Loads a persisted session into the token store.
    ///
    /// Returns true if a session was found. A stored session that cannot be
    /// decoded is discarded and counts as no session.
    ///
    /// # Errors
    /// Returns an error if the stored session cannot be read or a corrupt
    /// one cannot be removed.
    pub async fn restore(&self) -> ApiResult<bool> {
        let Some(sessions) = &self.sessions else {
            return Ok(false);
        };
        match sessions.load().await {
            Ok(Some(tokens)) => {
                self.crud.dispatcher().store().set(tokens).await;
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(SessionError::Serialization(message)) => {
                warn!(error = %message, "discarding unreadable session");
                sessions.clear().await?;
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Signs in and stores the issued tokens.
    ///
    /// A rejected login is final; it does not start a token refresh.
    ///
    /// # Errors
    /// Returns an error if the credentials are rejected, the request fails,
    /// or the session cannot be persisted.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<AuthTokens> {
        let outcome: RequestOutcome<TokenGrant> = self
            .crud
            .dispatcher()
            .dispatch_once(HttpMethod::Post, "/auth/login", Some(credentials))
            .await;
        let grant = required(outcome)?;

        let store = self.crud.dispatcher().store();
        store.set(AuthTokens::from_grant(grant)).await;
        let tokens = store.snapshot().await;
        if let Some(sessions) = &self.sessions {
            sessions.save(&tokens).await?;
        }
        info!(username = %credentials.username, "signed in");
        Ok(tokens)
    }

    /// Signs out.
    ///
    /// The server is told on a best-effort basis; the local session is
    /// always forgotten.
    ///
    /// # Errors
    /// Returns an error only if the persisted session cannot be removed.
    pub async fn logout(&self) -> ApiResult<()> {
        let store = self.crud.dispatcher().store();
        let tokens = store.snapshot().await;
        if tokens.is_authenticated() {
            let payload = json!({ "refresh_token": tokens.refresh_token });
            let outcome: RequestOutcome<IgnoredAny> = self
                .crud
                .dispatcher()
                .dispatch_once(HttpMethod::Post, "/auth/logout", Some(&payload))
                .await;
            if let Some(error) = outcome.error() {
                warn!(error = %error, "server-side logout failed");
            }
        }

        store.clear().await;
        if let Some(sessions) = &self.sessions {
            sessions.clear().await?;
        }
        info!("signed out");
        Ok(())
    }

    /// The signed-in account.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn me(&self) -> ApiResult<UserProfile> {
        required(self.crud.read("/auth/me", NO_PAYLOAD).await)
    }
}

impl std::fmt::Debug for AuthApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthApi")
            .field("crud", &self.crud)
            .field("persistent", &self.sessions.is_some())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::auth::TokenStore;
    use crate::dispatch::{DispatcherConfig, RequestDispatcher};
    use crate::testing::{BASE_URL, MemorySessionRepository, MockRefresher, MockTransport};
    use pretty_assertions::assert_eq;
    use scholar_domain::FailureKind;
    use scholar_domain::response::ResponseSpec;

    fn api(
        transport: &Arc<MockTransport>,
        store: TokenStore,
        sessions: &Arc<MemorySessionRepository>,
    ) -> (AuthApi, Arc<MockRefresher>) {
        let refresher = MockRefresher::succeeding();
        let crud = CrudClient::new(RequestDispatcher::new(
            transport.clone(),
            store,
            refresher.clone(),
            DispatcherConfig::new(BASE_URL),
        ));
        let sessions: Arc<dyn SessionRepository> = sessions.clone();
        (AuthApi::new(crud, Some(sessions)), refresher)
    }

    #[tokio::test]
    async fn test_login_stores_and_persists_tokens() {
        let transport = MockTransport::json(
            200,
            &json!({"access_token": "A", "refresh_token": "R", "expires_in": 3600}),
        );
        let store = TokenStore::new();
        let sessions = Arc::new(MemorySessionRepository::default());
        let (auth, _) = api(&transport, store.clone(), &sessions);

        let tokens = auth.login(&Credentials::new("ada", "secret")).await.unwrap();

        assert_eq!(tokens.access_token.as_deref(), Some("A"));
        assert_eq!(store.snapshot().await, tokens);
        assert_eq!(sessions.stored(), Some(tokens));

        let request = transport.last_request();
        assert_eq!(request.url, "http://portal.test/api/auth/login");
        assert_eq!(
            request.body,
            Some(json!({"username": "ada", "password": "secret"}))
        );
    }

    #[tokio::test]
    async fn test_rejected_login_does_not_refresh() {
        let transport = MockTransport::json(401, &json!({"detail": "Invalid credentials"}));
        let store = TokenStore::with_tokens(AuthTokens::new("old", "R"));
        let sessions = Arc::new(MemorySessionRepository::default());
        let (auth, refresher) = api(&transport, store, &sessions);

        let err = auth.login(&Credentials::new("ada", "wrong")).await.unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(refresher.calls(), 0);
        assert_eq!(sessions.stored(), None);
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_server_fails() {
        let transport = MockTransport::replying([ResponseSpec::new(500, "")]);
        let store = TokenStore::with_tokens(AuthTokens::new("A", "R"));
        let sessions = Arc::new(MemorySessionRepository::default());
        sessions.save(&AuthTokens::new("A", "R")).await.unwrap();
        let (auth, _) = api(&transport, store.clone(), &sessions);

        auth.logout().await.unwrap();

        assert!(!store.is_authenticated().await);
        assert_eq!(sessions.stored(), None);
        assert_eq!(
            transport.last_request().url,
            "http://portal.test/api/auth/logout"
        );
    }

    #[tokio::test]
    async fn test_logout_without_session_makes_no_call() {
        let transport = MockTransport::new();
        let sessions = Arc::new(MemorySessionRepository::default());
        let (auth, _) = api(&transport, TokenStore::new(), &sessions);

        auth.logout().await.unwrap();

        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_restore_loads_persisted_session() {
        let transport = MockTransport::new();
        let store = TokenStore::new();
        let sessions = Arc::new(MemorySessionRepository::default());
        let (auth, _) = api(&transport, store.clone(), &sessions);

        assert!(!auth.restore().await.unwrap());

        sessions.save(&AuthTokens::new("A", "R")).await.unwrap();
        assert!(auth.restore().await.unwrap());
        assert_eq!(store.snapshot().await, AuthTokens::new("A", "R"));
    }

    #[tokio::test]
    async fn test_restore_discards_corrupt_session() {
        let transport = MockTransport::new();
        let store = TokenStore::new();
        let sessions = Arc::new(MemorySessionRepository::corrupt());
        let (auth, _) = api(&transport, store.clone(), &sessions);

        assert!(!auth.restore().await.unwrap());
        assert!(!store.is_authenticated().await);
        assert!(!sessions.is_corrupt());

        // The next run starts clean.
        assert!(!auth.restore().await.unwrap());
    }

    #[tokio::test]
    async fn test_me() {
        let transport = MockTransport::json(
            200,
            &json!({"id": 4, "username": "ada", "fullName": "Ada Lovelace", "role": "student"}),
        );
        let sessions = Arc::new(MemorySessionRepository::default());
        let (auth, _) = api(&transport, TokenStore::new(), &sessions);

        let profile = auth.me().await.unwrap();

        assert_eq!(profile.full_name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(transport.last_request().method, HttpMethod::Get);
    }

    #[tokio::test]
    async fn test_me_unauthorized_after_refresh_cycle() {
        let transport = MockTransport::replying([ResponseSpec::new(401, "")]);
        let sessions = Arc::new(MemorySessionRepository::default());
        let (auth, refresher) = api(&transport, TokenStore::new(), &sessions);

        let err = auth.me().await.unwrap_err();

        assert!(matches!(
            err,
            crate::error::ApiError::Request {
                kind: FailureKind::Unauthorized,
                ..
            }
        ));
        assert_eq!(refresher.calls(), 1);
    }
}

//! Hand-written port doubles shared by the unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use scholar_domain::request::RequestSpec;
use scholar_domain::response::ResponseSpec;
use scholar_domain::{AuthTokens, TokenGrant};

use crate::auth::TokenStore;
use crate::crud::CrudClient;
use crate::dispatch::{DispatcherConfig, RequestDispatcher};
use crate::ports::{HttpTransport, SessionError, SessionRepository, TokenRefresher, TransportError};

pub const BASE_URL: &str = "http://portal.test";

/// Transport that replays scripted responses and records every request.
///
/// When the script runs out, the last response is repeated.
#[derive(Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<Result<ResponseSpec, TransportError>>>,
    last: Mutex<Option<Result<ResponseSpec, TransportError>>>,
    requests: Mutex<Vec<RequestSpec>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn replying(responses: impl IntoIterator<Item = ResponseSpec>) -> Arc<Self> {
        let transport = Self::default();
        for response in responses {
            transport.push(Ok(response));
        }
        Arc::new(transport)
    }

    pub fn json(status: u16, body: &Value) -> Arc<Self> {
        Self::replying([ResponseSpec::json(status, body)])
    }

    pub fn failing(error: TransportError) -> Arc<Self> {
        let transport = Self::default();
        transport.push(Err(error));
        Arc::new(transport)
    }

    pub fn push(&self, response: Result<ResponseSpec, TransportError>) {
        self.script.lock().unwrap().push_back(response);
    }

    pub fn requests(&self) -> Vec<RequestSpec> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> RequestSpec {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: &RequestSpec) -> Result<ResponseSpec, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.script.lock().unwrap().pop_front();
        let mut last = self.last.lock().unwrap();
        if let Some(next) = next {
            *last = Some(next);
        }
        (*last)
            .clone()
            .unwrap_or_else(|| Ok(ResponseSpec::json(200, &Value::Null)))
    }
}

/// Refresher that counts calls and optionally writes a new token.
pub struct MockRefresher {
    succeed: bool,
    store: Option<TokenStore>,
    calls: AtomicUsize,
}

impl MockRefresher {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self {
            succeed: true,
            store: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            succeed: false,
            store: None,
            calls: AtomicUsize::new(0),
        })
    }

    /// A succeeding refresher that rotates the access token in `store`.
    pub fn updating(store: TokenStore) -> Arc<Self> {
        Arc::new(Self {
            succeed: true,
            store: Some(store),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenRefresher for MockRefresher {
    async fn refresh(&self) -> bool {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let (true, Some(store)) = (self.succeed, &self.store) {
            store
                .apply_grant(TokenGrant {
                    access_token: format!("refreshed-{call}"),
                    refresh_token: None,
                    expires_in: None,
                })
                .await;
        }
        self.succeed
    }
}

/// Session repository kept in memory.
#[derive(Default)]
pub struct MemorySessionRepository {
    pub session: Mutex<Option<AuthTokens>>,
    corrupt: AtomicBool,
}

impl MemorySessionRepository {
    /// A repository whose stored session fails to decode until cleared.
    pub fn corrupt() -> Self {
        Self {
            corrupt: AtomicBool::new(true),
            ..Self::default()
        }
    }

    pub fn stored(&self) -> Option<AuthTokens> {
        self.session.lock().unwrap().clone()
    }

    pub fn is_corrupt(&self) -> bool {
        self.corrupt.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionRepository for MemorySessionRepository {
    async fn load(&self) -> Result<Option<AuthTokens>, SessionError> {
        if self.is_corrupt() {
            return Err(SessionError::Serialization(
                "key must be a string at line 1 column 2".to_string(),
            ));
        }
        Ok(self.stored())
    }

    async fn save(&self, tokens: &AuthTokens) -> Result<(), SessionError> {
        *self.session.lock().unwrap() = Some(tokens.clone());
        self.corrupt.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        *self.session.lock().unwrap() = None;
        self.corrupt.store(false, Ordering::SeqCst);
        Ok(())
    }
}

/// A façade over `transport` with an empty store and a failing refresher.
pub fn crud_over(transport: &Arc<MockTransport>) -> CrudClient {
    CrudClient::new(RequestDispatcher::new(
        transport.clone(),
        TokenStore::new(),
        MockRefresher::failing(),
        DispatcherConfig::new(BASE_URL),
    ))
}

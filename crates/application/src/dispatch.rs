//! Request dispatcher
//!
//! Runs one logical portal call: builds headers from the token store, sends
//! the request, and normalizes whatever happened into a [`RequestOutcome`].
//! A `401` triggers the refresh-and-retry cycle bounded by [`RetryPolicy`].

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use scholar_domain::request::{HttpMethod, RequestSpec};
use scholar_domain::response::ResponseSpec;
use scholar_domain::{ErrorPayload, FailureKind, RequestOutcome};

use crate::auth::{RefreshGate, TokenStore};
use crate::headers::HeaderBuilder;
use crate::ports::{HttpTransport, TokenRefresher};

/// Message used when neither the server nor the transport gave a usable one.
pub const DEFAULT_FALLBACK_MESSAGE: &str = "An unexpected error occurred";

/// Default portal address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Message used for a terminal `401` without a server message.
const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// How many refresh-and-retry cycles a single call may go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryPolicy {
    /// Refresh at most `max_refreshes` times per call.
    Bounded {
        /// Refresh budget per call
        max_refreshes: u32,
    },
    /// Keep refreshing and retrying for as long as the refresh succeeds.
    UntilRefreshFails,
}

impl RetryPolicy {
    /// Returns true if another refresh is allowed after `refreshes_done`.
    #[must_use]
    pub const fn allows_refresh(self, refreshes_done: u32) -> bool {
        match self {
            Self::Bounded { max_refreshes } => refreshes_done < max_refreshes,
            Self::UntilRefreshFails => true,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::Bounded { max_refreshes: 1 }
    }
}

/// Dispatcher settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Portal address; requests go to `<base_url>/api<path>`
    pub base_url: String,
    /// Refresh-and-retry bound
    pub retry: RetryPolicy,
    /// Share one refresh between concurrent calls that hit `401`
    pub dedupe_refresh: bool,
    /// Message for failures without a usable message
    pub fallback_error_message: String,
}

impl DispatcherConfig {
    /// Creates a config for the given portal address.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Sets the retry policy.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Enables or disables refresh sharing.
    #[must_use]
    pub const fn with_dedupe_refresh(mut self, dedupe_refresh: bool) -> Self {
        self.dedupe_refresh = dedupe_refresh;
        self
    }

    /// Returns the absolute URL for an API path.
    ///
    /// Paths that are already absolute `http(s)` URLs are used unchanged.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}/api{path}")
        } else {
            format!("{base}/api/{path}")
        }
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            retry: RetryPolicy::default(),
            dedupe_refresh: false,
            fallback_error_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
        }
    }
}

enum Refresh {
    Direct(Arc<dyn TokenRefresher>),
    Gated(RefreshGate),
}

impl Refresh {
    async fn run(&self, observed_generation: u64) -> bool {
        match self {
            Self::Direct(refresher) => refresher.refresh().await,
            Self::Gated(gate) => gate.refresh_after(observed_generation).await,
        }
    }
}

struct Inner {
    transport: Arc<dyn HttpTransport>,
    headers: HeaderBuilder,
    refresh: Refresh,
    config: DispatcherConfig,
}

/// Executes portal calls. Cheap to clone; clones share the same transport
/// and token store.
#[derive(Clone)]
pub struct RequestDispatcher {
    inner: Arc<Inner>,
}

impl RequestDispatcher {
    /// Creates a dispatcher.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        store: TokenStore,
        refresher: Arc<dyn TokenRefresher>,
        config: DispatcherConfig,
    ) -> Self {
        let refresh = if config.dedupe_refresh {
            Refresh::Gated(RefreshGate::new(refresher, store.clone()))
        } else {
            Refresh::Direct(refresher)
        };
        Self {
            inner: Arc::new(Inner {
                transport,
                headers: HeaderBuilder::new(store),
                refresh,
                config,
            }),
        }
    }

    /// The dispatcher settings.
    #[must_use]
    pub fn config(&self) -> &DispatcherConfig {
        &self.inner.config
    }

    /// The token store headers are built from.
    #[must_use]
    pub fn store(&self) -> &TokenStore {
        self.inner.headers.store()
    }

    /// Runs one logical call and returns its outcome.
    ///
    /// GET, DELETE and PATCH carry the payload as query parameters; POST and
    /// PUT carry it as a JSON body. Never fails: every error is returned as
    /// a [`RequestOutcome::Failure`].
    pub async fn dispatch<P, D>(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Option<&P>,
    ) -> RequestOutcome<D>
    where
        P: Serialize + Sync + ?Sized,
        D: DeserializeOwned,
    {
        self.run(method, path, payload, self.inner.config.retry).await
    }

    /// Like [`dispatch`](Self::dispatch) but a `401` is final and never
    /// triggers a refresh. Used for signing in and out.
    pub async fn dispatch_once<P, D>(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Option<&P>,
    ) -> RequestOutcome<D>
    where
        P: Serialize + Sync + ?Sized,
        D: DeserializeOwned,
    {
        let retry = RetryPolicy::Bounded { max_refreshes: 0 };
        self.run(method, path, payload, retry).await
    }

    async fn run<P, D>(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Option<&P>,
        retry: RetryPolicy,
    ) -> RequestOutcome<D>
    where
        P: Serialize + Sync + ?Sized,
        D: DeserializeOwned,
    {
        let url = self.inner.config.url_for(path);
        let payload = match payload.map(serde_json::to_value).transpose() {
            Ok(payload) => payload,
            Err(e) => {
                warn!(%method, %url, error = %e, "could not encode request payload");
                return RequestOutcome::failure(ErrorPayload::new(
                    FailureKind::InvalidRequest,
                    e.to_string(),
                ));
            }
        };

        let mut refreshes = 0u32;
        let mut attempt = 1u32;
        loop {
            let (headers, generation) = self.inner.headers.build_versioned().await;
            let request = match RequestSpec::build(method, url.clone(), payload.clone(), headers)
            {
                Ok(request) => request,
                Err(e) => {
                    warn!(%method, %url, error = %e, "could not build request");
                    return RequestOutcome::failure(ErrorPayload::new(
                        FailureKind::InvalidRequest,
                        e.to_string(),
                    ));
                }
            };

            debug!(%method, %url, attempt, "sending request");
            let response = match self.inner.transport.send(&request).await {
                Ok(response) => response,
                Err(e) => {
                    warn!(%method, %url, error = %e, "request failed");
                    return RequestOutcome::failure(ErrorPayload::new(
                        FailureKind::Transport,
                        self.inner.config.fallback_error_message.clone(),
                    ));
                }
            };
            debug!(%method, %url, status = response.status, "received response");

            if response.is_success() {
                return self.decode(&response, method, &url);
            }
            if !response.is_unauthorized() {
                let message = self.failure_message(&response);
                warn!(%method, %url, status = response.status, %message, "request rejected");
                return RequestOutcome::failure(ErrorPayload::with_status(
                    FailureKind::Server,
                    response.status,
                    message,
                ));
            }

            if !retry.allows_refresh(refreshes) {
                warn!(%method, %url, refreshes, "unauthorized, no refresh left");
                return Self::unauthorized(&response);
            }
            refreshes += 1;
            if !self.inner.refresh.run(generation).await {
                warn!(%method, %url, "token refresh failed");
                return Self::unauthorized(&response);
            }
            attempt += 1;
        }
    }

    fn decode<D: DeserializeOwned>(
        &self,
        response: &ResponseSpec,
        method: HttpMethod,
        url: &str,
    ) -> RequestOutcome<D> {
        match response.json_body::<D>() {
            Ok(data) => RequestOutcome::success(data),
            Err(e) => {
                warn!(%method, %url, error = %e, "could not decode response body");
                RequestOutcome::failure(ErrorPayload::with_status(
                    FailureKind::Decode,
                    response.status,
                    self.inner.config.fallback_error_message.clone(),
                ))
            }
        }
    }

    fn failure_message(&self, response: &ResponseSpec) -> String {
        response
            .server_message()
            .or_else(|| {
                let text = response.status_text.trim();
                (!text.is_empty()).then(|| text.to_string())
            })
            .unwrap_or_else(|| self.inner.config.fallback_error_message.clone())
    }

    fn unauthorized<D>(response: &ResponseSpec) -> RequestOutcome<D> {
        RequestOutcome::failure(ErrorPayload::with_status(
            FailureKind::Unauthorized,
            response.status,
            response
                .server_message()
                .unwrap_or_else(|| UNAUTHORIZED_MESSAGE.to_string()),
        ))
    }
}

impl std::fmt::Debug for RequestDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestDispatcher")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

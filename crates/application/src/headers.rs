//! Authorization headers for portal requests.

use scholar_domain::AuthTokens;
use scholar_domain::request::Headers;

use crate::auth::TokenStore;

/// Name of the header carrying the refresh token.
pub const REFRESH_TOKEN_HEADER: &str = "RefreshToken";

/// Builds the header set sent with every portal request.
///
/// Missing tokens are sent as the literal text `null`; building headers
/// never fails.
#[derive(Debug, Clone)]
pub struct HeaderBuilder {
    store: TokenStore,
}

impl HeaderBuilder {
    /// Creates a builder reading from the given store.
    #[must_use]
    pub const fn new(store: TokenStore) -> Self {
        Self { store }
    }

    /// Returns the headers for the given tokens.
    #[must_use]
    pub fn headers_for(tokens: &AuthTokens) -> Headers {
        let mut headers = Headers::new();
        headers.set("Content-Type", "application/json");
        headers.set("Accept", "application/json");
        headers.set("Authorization", tokens.authorization_header());
        headers.set(REFRESH_TOKEN_HEADER, tokens.refresh_header());
        headers
    }

    /// Returns the headers for the tokens currently in the store.
    pub async fn build(&self) -> Headers {
        Self::headers_for(&self.store.snapshot().await)
    }

    /// Like [`build`](Self::build), also returning the store generation the
    /// headers were built from.
    pub async fn build_versioned(&self) -> (Headers, u64) {
        let (tokens, generation) = self.store.versioned_snapshot().await;
        (Self::headers_for(&tokens), generation)
    }

    /// The store this builder reads from.
    #[must_use]
    pub const fn store(&self) -> &TokenStore {
        &self.store
    }
}

//! CRUD façade over the request dispatcher.
//!
//! Each operation pins one HTTP method and forwards to
//! [`RequestDispatcher::dispatch`].

use serde::Serialize;
use serde::de::DeserializeOwned;

use scholar_domain::RequestOutcome;
use scholar_domain::request::HttpMethod;

use crate::dispatch::RequestDispatcher;

/// An absent payload, usable for any operation without naming a type.
pub const NO_PAYLOAD: Option<&()> = None;

/// Create/read/update/patch/delete calls against the portal API.
#[derive(Debug, Clone)]
pub struct CrudClient {
    dispatcher: RequestDispatcher,
}

impl CrudClient {
    /// Wraps a dispatcher.
    #[must_use]
    pub const fn new(dispatcher: RequestDispatcher) -> Self {
        Self { dispatcher }
    }

    /// The underlying dispatcher.
    #[must_use]
    pub const fn dispatcher(&self) -> &RequestDispatcher {
        &self.dispatcher
    }

    /// `POST` with the payload as JSON body.
    pub async fn create<P, D>(&self, path: &str, payload: Option<&P>) -> RequestOutcome<D>
    where
        P: Serialize + Sync + ?Sized,
        D: DeserializeOwned,
    {
        self.dispatcher.dispatch(HttpMethod::Post, path, payload).await
    }

    /// `GET` with the payload as query parameters.
    pub async fn read<P, D>(&self, path: &str, payload: Option<&P>) -> RequestOutcome<D>
    where
        P: Serialize + Sync + ?Sized,
        D: DeserializeOwned,
    {
        self.dispatcher.dispatch(HttpMethod::Get, path, payload).await
    }

    /// `PUT` with the payload as JSON body.
    pub async fn update<P, D>(&self, path: &str, payload: Option<&P>) -> RequestOutcome<D>
    where
        P: Serialize + Sync + ?Sized,
        D: DeserializeOwned,
    {
        self.dispatcher.dispatch(HttpMethod::Put, path, payload).await
    }

    /// `PATCH` with the payload as query parameters.
    pub async fn patch<P, D>(&self, path: &str, payload: Option<&P>) -> RequestOutcome<D>
    where
        P: Serialize + Sync + ?Sized,
        D: DeserializeOwned,
    {
        self.dispatcher.dispatch(HttpMethod::Patch, path, payload).await
    }

    /// `DELETE` with the payload as query parameters.
    pub async fn delete<P, D>(&self, path: &str, payload: Option<&P>) -> RequestOutcome<D>
    where
        P: Serialize + Sync + ?Sized,
        D: DeserializeOwned,
    {
        self.dispatcher.dispatch(HttpMethod::Delete, path, payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenStore;
    use crate::dispatch::DispatcherConfig;
    use crate::testing::{BASE_URL, MockRefresher, MockTransport};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    #[tokio::test]
    async fn test_each_operation_pins_its_method() {
        let transport = MockTransport::new();
        let crud = CrudClient::new(RequestDispatcher::new(
            transport.clone(),
            TokenStore::new(),
            MockRefresher::failing(),
            DispatcherConfig::new(BASE_URL),
        ));
        let payload = json!({"id": 7});

        let _: RequestOutcome<Value> = crud.create("/r", Some(&payload)).await;
        let _: RequestOutcome<Value> = crud.read("/r", Some(&payload)).await;
        let _: RequestOutcome<Value> = crud.update("/r", Some(&payload)).await;
        let _: RequestOutcome<Value> = crud.patch("/r", Some(&payload)).await;
        let _: RequestOutcome<Value> = crud.delete("/r", NO_PAYLOAD).await;

        let methods: Vec<HttpMethod> = transport.requests().iter().map(|r| r.method).collect();
        assert_eq!(
            methods,
            vec![
                HttpMethod::Post,
                HttpMethod::Get,
                HttpMethod::Put,
                HttpMethod::Patch,
                HttpMethod::Delete,
            ]
        );

        let requests = transport.requests();
        assert_eq!(requests[0].body, Some(payload.clone()));
        assert_eq!(requests[1].query.get("id"), Some("7"));
        assert_eq!(requests[2].body, Some(payload));
        assert_eq!(requests[3].query.get("id"), Some("7"));
        assert!(requests[4].query.is_empty());
    }
}

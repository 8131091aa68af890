//! Request specification type

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use super::{Headers, HttpMethod, PayloadLocation, QueryParams};
use crate::error::{DomainError, DomainResult};

/// A fully resolved HTTP request, ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute target URL without the query string
    pub url: String,
    /// HTTP headers
    #[serde(default)]
    pub headers: Headers,
    /// Query string parameters
    #[serde(default)]
    pub query: QueryParams,
    /// JSON body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl RequestSpec {
    /// Creates a request with no payload.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Headers::new(),
            query: QueryParams::new(),
            body: None,
        }
    }

    /// Builds a request, placing the payload where the method requires.
    ///
    /// GET, DELETE and PATCH flatten the payload into query parameters and
    /// never send a body. POST and PUT send it as the JSON body and derive
    /// no query parameters from it.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidPayload`] when a query-carried payload
    /// is not a JSON object.
    pub fn build(
        method: HttpMethod,
        url: impl Into<String>,
        payload: Option<Value>,
        headers: Headers,
    ) -> DomainResult<Self> {
        let mut spec = Self::new(method, url);
        spec.headers = headers;
        match (method.payload_location(), payload) {
            (_, None) => {}
            (PayloadLocation::Query, Some(payload)) => {
                spec.query = QueryParams::from_json(&payload)?;
            }
            (PayloadLocation::JsonBody, Some(payload)) => {
                spec.body = Some(payload);
            }
        }
        Ok(spec)
    }

    /// Returns the URL with the encoded query string appended.
    ///
    /// # Errors
    ///
    /// Returns an error if the query cannot be encoded.
    pub fn full_url(&self) -> DomainResult<String> {
        if self.query.is_empty() {
            return Ok(self.url.clone());
        }
        let query = self.query.to_query_string()?;
        let separator = if self.url.contains('?') { '&' } else { '?' };
        Ok(format!("{}{separator}{query}", self.url))
    }

    /// Validates the URL and returns the parsed version.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed.
    pub fn parse_url(&self) -> DomainResult<Url> {
        let full = self.full_url()?;
        Url::parse(&full).map_err(|e| DomainError::InvalidUrl(format!("{e}: {full}")))
    }

    /// Returns the JSON body encoded as bytes, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be serialized.
    pub fn body_bytes(&self) -> DomainResult<Option<Vec<u8>>> {
        self.body
            .as_ref()
            .map(|body| {
                serde_json::to_vec(body).map_err(|e| DomainError::InvalidPayload(e.to_string()))
            })
            .transpose()
    }
}

//! Response specification type

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::request::Headers;

/// Body fields that servers use to carry a human-readable error.
const MESSAGE_FIELDS: &[&str] = &["message", "error", "detail"];

/// HTTP response specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSpec {
    /// HTTP status code
    pub status: u16,
    /// Status text (e.g., "OK", "Not Found")
    pub status_text: String,
    /// Response headers
    pub headers: Headers,
    /// Response body as string
    pub body: String,
    /// Response time
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

impl ResponseSpec {
    /// Creates a response with the given status and body.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            ..Self::default()
        }
    }

    /// Creates a response whose body is the given JSON value.
    #[must_use]
    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    /// Sets the status text.
    #[must_use]
    pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = status_text.into();
        self
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns true if the server rejected the credentials (401).
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Returns true if the status code indicates a client error (4xx).
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Returns true if the status code indicates a server error (5xx).
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }

    /// Decodes the body as JSON. An empty body decodes as `null`.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON for `T`.
    pub fn json_body<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        if self.body.trim().is_empty() {
            serde_json::from_value(Value::Null)
        } else {
            serde_json::from_str(&self.body)
        }
    }

    /// Extracts the server-provided error message from a JSON body.
    ///
    /// Looks at the `message`, `error` and `detail` fields in that order and
    /// returns the first non-empty string.
    #[must_use]
    pub fn server_message(&self) -> Option<String> {
        let value: Value = serde_json::from_str(&self.body).ok()?;
        MESSAGE_FIELDS
            .iter()
            .filter_map(|field| value.get(field).and_then(Value::as_str))
            .map(str::trim)
            .find(|message| !message.is_empty())
            .map(str::to_string)
    }
}

impl Default for ResponseSpec {
    fn default() -> Self {
        Self {
            status: 0,
            status_text: String::new(),
            headers: Headers::new(),
            body: String::new(),
            duration: Duration::ZERO,
        }
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_status_checks() {
        let response_200 = ResponseSpec::new(200, "");
        assert!(response_200.is_success());
        assert!(!response_200.is_client_error());

        let response_401 = ResponseSpec::new(401, "");
        assert!(response_401.is_unauthorized());
        assert!(response_401.is_client_error());

        let response_500 = ResponseSpec::new(500, "");
        assert!(response_500.is_server_error());
    }

    #[test]
    fn test_server_message_field_order() {
        let response = ResponseSpec::json(400, &json!({"error": "bad", "message": "boom"}));
        assert_eq!(response.server_message(), Some("boom".to_string()));

        let response = ResponseSpec::json(422, &json!({"detail": "invalid credits"}));
        assert_eq!(response.server_message(), Some("invalid credits".to_string()));
    }

    #[test]
    fn test_server_message_missing() {
        assert_eq!(ResponseSpec::new(500, "<html>oops</html>").server_message(), None);
        assert_eq!(
            ResponseSpec::json(500, &json!({"message": "  "})).server_message(),
            None
        );
    }

    #[test]
    fn test_empty_body_decodes_as_null() {
        let response = ResponseSpec::new(204, "");
        let decoded: Option<u32> = response.json_body().unwrap();
        assert_eq!(decoded, None);
        response.json_body::<()>().unwrap();
    }
}

//! Query parameter types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// A query parameter key-value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
    /// The parameter key
    pub key: String,
    /// The parameter value
    pub value: String,
}

impl QueryParam {
    /// Creates a new query parameter.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// An ordered collection of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams {
    items: Vec<QueryParam>,
}

impl QueryParams {
    /// Creates an empty query parameter collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Flattens a JSON payload into query parameters.
    ///
    /// Strings are used verbatim, numbers and booleans are rendered as text,
    /// `null` fields are skipped, arrays become repeated keys and nested
    /// objects are sent as compact JSON text. A `null` payload yields no
    /// parameters.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidPayload`] if the payload is neither an
    /// object nor `null`.
    pub fn from_json(payload: &Value) -> DomainResult<Self> {
        let mut params = Self::new();
        match payload {
            Value::Null => {}
            Value::Object(map) => {
                for (key, value) in map {
                    match value {
                        Value::Null => {}
                        Value::Array(values) => {
                            for item in values.iter().filter(|v| !v.is_null()) {
                                params.add(QueryParam::new(key, scalar_text(item)));
                            }
                        }
                        other => params.add(QueryParam::new(key, scalar_text(other))),
                    }
                }
            }
            other => {
                return Err(DomainError::InvalidPayload(format!(
                    "query parameters need an object payload, got {}",
                    json_kind(other)
                )));
            }
        }
        Ok(params)
    }

    /// Adds a query parameter to the collection.
    pub fn add(&mut self, param: QueryParam) {
        self.items.push(param);
    }

    /// Returns the value of the first parameter with the given key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }

    /// Returns all parameters.
    #[must_use]
    pub fn all(&self) -> &[QueryParam] {
        &self.items
    }

    /// Returns the parameters as borrowed key/value pairs.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.items
            .iter()
            .map(|p| (p.key.as_str(), p.value.as_str()))
            .collect()
    }

    /// Encodes the parameters as an `application/x-www-form-urlencoded` string.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn to_query_string(&self) -> DomainResult<String> {
        serde_urlencoded::to_string(self.pairs())
            .map_err(|e| DomainError::InvalidPayload(e.to_string()))
    }

    /// Returns the number of parameters.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<QueryParam> for QueryParams {
    fn from_iter<T: IntoIterator<Item = QueryParam>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_from_json_scalars() {
        let params =
            QueryParams::from_json(&json!({"page": 2, "search": "algebra", "active": true}))
                .unwrap();

        assert_eq!(params.get("page"), Some("2"));
        assert_eq!(params.get("search"), Some("algebra"));
        assert_eq!(params.get("active"), Some("true"));
    }

    #[test]
    fn test_from_json_skips_nulls_and_repeats_arrays() {
        let params =
            QueryParams::from_json(&json!({"ids": [1, null, 3], "missing": null})).unwrap();

        assert_eq!(params.pairs(), vec![("ids", "1"), ("ids", "3")]);
    }

    #[test]
    fn test_from_json_nested_object_as_text() {
        let params = QueryParams::from_json(&json!({"filter": {"year": 1}})).unwrap();
        assert_eq!(params.get("filter"), Some(r#"{"year":1}"#));
    }

    #[test]
    fn test_from_json_null_is_empty() {
        assert!(QueryParams::from_json(&Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        let err = QueryParams::from_json(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, DomainError::InvalidPayload(_)));
    }

    #[test]
    fn test_to_query_string_encodes() {
        let params: QueryParams = [QueryParam::new("search", "linear algebra & more")]
            .into_iter()
            .collect();
        assert_eq!(
            params.to_query_string().unwrap(),
            "search=linear+algebra+%26+more"
        );
    }
}

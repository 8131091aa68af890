//! HTTP Method enumeration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// Where a request payload travels for a given method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadLocation {
    /// Payload fields become query string parameters; no body is sent.
    Query,
    /// Payload is serialized as a JSON body; no query parameters are derived.
    JsonBody,
}

/// HTTP methods used by the portal API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET method
    #[default]
    Get,
    /// HTTP POST method
    Post,
    /// HTTP PUT method
    Put,
    /// HTTP PATCH method
    Patch,
    /// HTTP DELETE method
    Delete,
}

impl HttpMethod {
    /// Returns all available HTTP methods.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Get, Self::Post, Self::Put, Self::Patch, Self::Delete]
    }

    /// Returns where the payload is carried for this method.
    ///
    /// PATCH travels in the query string, like GET and DELETE. Existing
    /// endpoints rely on this, so it is kept as is.
    #[must_use]
    pub const fn payload_location(self) -> PayloadLocation {
        match self {
            Self::Post | Self::Put => PayloadLocation::JsonBody,
            Self::Get | Self::Delete | Self::Patch => PayloadLocation::Query,
        }
    }

    /// Returns whether this method sends a request body.
    #[must_use]
    pub const fn has_body(self) -> bool {
        matches!(self.payload_location(), PayloadLocation::JsonBody)
    }

    /// Returns the method as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            other => Err(DomainError::UnsupportedMethod(other.to_string())),
        }
    }
}

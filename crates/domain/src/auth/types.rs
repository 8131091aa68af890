//! Authentication state types

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Text sent in place of a missing token.
pub const MISSING_TOKEN: &str = "null";

/// Access and refresh tokens for the current session.
///
/// Populated at login, updated in place when the access token is refreshed,
/// and cleared at logout.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    /// Bearer token sent with every request
    #[serde(default)]
    pub access_token: Option<String>,
    /// Token used to obtain a new access token
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// When the access token expires (if the server said so)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl AuthTokens {
    /// Creates a token pair with no expiry information.
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            refresh_token: Some(refresh_token.into()),
            expires_at: None,
        }
    }

    /// Creates tokens from a login grant.
    #[must_use]
    pub fn from_grant(grant: TokenGrant) -> Self {
        let mut tokens = Self::default();
        tokens.apply_grant(grant);
        tokens
    }

    /// Applies a login or refresh grant.
    ///
    /// The access token and expiry are always replaced. The refresh token is
    /// only replaced when the grant carries a new one.
    pub fn apply_grant(&mut self, grant: TokenGrant) {
        self.expires_at = grant
            .expires_in
            .and_then(|secs| i64::try_from(secs).ok())
            .and_then(chrono::Duration::try_seconds)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime));
        self.access_token = Some(grant.access_token);
        if let Some(refresh_token) = grant.refresh_token {
            self.refresh_token = Some(refresh_token);
        }
    }

    /// Returns true if an access token is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Returns true if a refresh token is present.
    #[must_use]
    pub const fn can_refresh(&self) -> bool {
        self.refresh_token.is_some()
    }

    /// Check if the token is expired or will expire within the given buffer.
    #[must_use]
    pub fn is_expired_or_expiring(&self, buffer_seconds: i64) -> bool {
        self.expires_at.is_some_and(|expires_at| {
            let buffer = chrono::Duration::seconds(buffer_seconds);
            Utc::now() + buffer >= expires_at
        })
    }

    /// Time until expiry in seconds, or None if no expiry.
    #[must_use]
    pub fn seconds_until_expiry(&self) -> Option<i64> {
        self.expires_at.map(|exp| (exp - Utc::now()).num_seconds())
    }

    /// Returns the `Authorization` header value, `Bearer null` when absent.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!(
            "Bearer {}",
            self.access_token.as_deref().unwrap_or(MISSING_TOKEN)
        )
    }

    /// Returns the `RefreshToken` header value, `null` when absent.
    #[must_use]
    pub fn refresh_header(&self) -> String {
        self.refresh_token
            .as_deref()
            .unwrap_or(MISSING_TOKEN)
            .to_string()
    }
}

impl fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthTokens")
            .field(
                "access_token",
                &self.access_token.as_deref().map(token_preview),
            )
            .field(
                "refresh_token",
                &self.refresh_token.as_deref().map(token_preview),
            )
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Token response returned by the login and refresh endpoints.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGrant {
    /// New access token
    #[serde(alias = "accessToken")]
    pub access_token: String,
    /// New refresh token, if rotated
    #[serde(default, alias = "refreshToken")]
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds
    #[serde(default, alias = "expiresIn")]
    pub expires_in: Option<u64>,
}

impl fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenGrant")
            .field("access_token", &token_preview(&self.access_token))
            .field(
                "refresh_token",
                &self.refresh_token.as_deref().map(token_preview),
            )
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Login credentials.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Account name or email
    pub username: String,
    /// Account password
    pub password: String,
}

impl Credentials {
    /// Creates a new credentials pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// The signed-in account as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Server identifier
    pub id: i64,
    /// Login name
    pub username: String,
    /// Display name
    #[serde(default, alias = "fullName", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Portal role, e.g. `student` or `teacher`
    #[serde(default)]
    pub role: String,
}

/// Get a preview of a token (first 8 chars + ...).
#[must_use]
pub fn token_preview(token: &str) -> String {
    if token.chars().count() > 12 {
        let head: String = token.chars().take(8).collect();
        format!("{head}...")
    } else {
        token.to_string()
    }
}

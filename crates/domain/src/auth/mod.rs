//! Authentication domain types

mod types;

pub use types::{AuthTokens, Credentials, MISSING_TOKEN, TokenGrant, UserProfile, token_preview};

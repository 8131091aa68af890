//! Session authentication state.
//!
//! This module provides:
//! - In-memory token storage with expiry tracking
//! - The refresh routine that exchanges the refresh token for a new access token
//! - A gate that lets concurrent callers share one refresh

mod refresh;
mod token_store;

pub use refresh::{REFRESH_PATH, RefreshGate, SessionRefresher};
pub use token_store::{TokenStatus, TokenStore};

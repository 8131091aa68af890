//! Scholar Application - Authenticated portal client
//!
//! This crate defines the application layer with:
//! - Port traits (transport, token refresh, session persistence)
//! - The header builder, request dispatcher and CRUD façade
//! - One API per portal resource
//! - Application-level error handling

pub mod api;
pub mod auth;
pub mod client;
pub mod crud;
pub mod dispatch;
pub mod error;
pub mod headers;
pub mod ports;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod testing;

pub use api::{AuthApi, ChatApi, CurriculaApi, RoadmapApi, SubjectsApi, SyllabiApi};
pub use auth::{RefreshGate, SessionRefresher, TokenStatus, TokenStore};
pub use client::PortalClient;
pub use crud::{CrudClient, NO_PAYLOAD};
pub use dispatch::{
    DEFAULT_BASE_URL, DEFAULT_FALLBACK_MESSAGE, DispatcherConfig, RequestDispatcher, RetryPolicy,
};
pub use error::{ApiError, ApiResult};
pub use headers::HeaderBuilder;
pub use ports::{HttpTransport, SessionError, SessionRepository, TokenRefresher, TransportError};

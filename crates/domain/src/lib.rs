//! Scholar Domain - Core business types
//!
//! This crate defines the domain model for the Scholar portal client.
//! All types here are pure Rust with no I/O dependencies.

pub mod academics;
pub mod auth;
pub mod error;
pub mod outcome;
pub mod request;
pub mod response;
pub mod roadmap;

pub use auth::{AuthTokens, Credentials, TokenGrant, UserProfile, token_preview};
pub use error::{DomainError, DomainResult};
pub use outcome::{ErrorPayload, FailureKind, RequestOutcome};
pub use roadmap::{RoadmapError, RoadmapGraph, RoadmapLink, RoadmapNode};

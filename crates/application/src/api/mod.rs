//! Portal resources.
//!
//! Each API builds paths and payloads for one resource and forwards them to
//! the [`CrudClient`](crate::crud::CrudClient). Listings that fill screens
//! fall back to an empty result and log the failure; single reads and all
//! mutations return an [`ApiResult`](crate::error::ApiResult).

mod auth;
mod chat;
mod curricula;
mod roadmap;
mod subjects;
mod syllabi;

pub use auth::AuthApi;
pub use chat::ChatApi;
pub use curricula::CurriculaApi;
pub use roadmap::RoadmapApi;
pub use subjects::SubjectsApi;
pub use syllabi::SyllabiApi;

use tracing::warn;

use scholar_domain::RequestOutcome;

use crate::error::{ApiError, ApiResult};

/// Returns the data, or `fallback` after logging the failure.
fn or_fallback<T>(outcome: RequestOutcome<T>, fallback: T, listing: &str) -> T {
    match outcome {
        RequestOutcome::Success { data } => data,
        RequestOutcome::Failure { error } => {
            warn!(listing, kind = ?error.kind, error = %error, "listing failed, showing nothing");
            fallback
        }
    }
}

/// Converts an outcome into an [`ApiResult`].
fn required<T>(outcome: RequestOutcome<T>) -> ApiResult<T> {
    outcome.into_result().map_err(ApiError::from)
}

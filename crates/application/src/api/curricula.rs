//! Curricula API

use serde::Serialize;
use serde::de::IgnoredAny;

use scholar_domain::academics::{Curriculum, CurriculumStatus, NewCurriculum};

use super::{or_fallback, required};
use crate::crud::{CrudClient, NO_PAYLOAD};
use crate::error::ApiResult;

#[derive(Serialize)]
struct StatusChange {
    status: CurriculumStatus,
}

/// Program curricula.
#[derive(Debug, Clone)]
pub struct CurriculaApi {
    crud: CrudClient,
}

impl CurriculaApi {
    /// Creates the API over the given façade.
    #[must_use]
    pub const fn new(crud: CrudClient) -> Self {
        Self { crud }
    }

    /// All curricula. Empty on failure.
    pub async fn list(&self) -> Vec<Curriculum> {
        let outcome = self.crud.read("/curricula", NO_PAYLOAD).await;
        or_fallback(outcome, Vec::new(), "curricula")
    }

    /// A single curriculum.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn get(&self, id: i64) -> ApiResult<Curriculum> {
        required(self.crud.read(&format!("/curricula/{id}"), NO_PAYLOAD).await)
    }

    /// Creates a curriculum in draft status.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn create(&self, curriculum: &NewCurriculum) -> ApiResult<Curriculum> {
        required(self.crud.create("/curricula", Some(curriculum)).await)
    }

    /// Moves a curriculum to another status. The status travels in the
    /// query string.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn set_status(&self, id: i64, status: CurriculumStatus) -> ApiResult<Curriculum> {
        let change = StatusChange { status };
        required(self.crud.patch(&format!("/curricula/{id}"), Some(&change)).await)
    }

    /// Deletes a curriculum.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let outcome = self
            .crud
            .delete::<_, IgnoredAny>(&format!("/curricula/{id}"), NO_PAYLOAD)
            .await;
        required(outcome).map(|_| ())
    }
}

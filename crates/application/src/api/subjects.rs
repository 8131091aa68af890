//! Subjects API

use serde::de::IgnoredAny;

use scholar_domain::academics::{NewSubject, Page, PageQuery, Subject, SubjectUpdate};

use super::{or_fallback, required};
use crate::crud::{CrudClient, NO_PAYLOAD};
use crate::error::ApiResult;

/// Subject catalogue.
#[derive(Debug, Clone)]
pub struct SubjectsApi {
    crud: CrudClient,
}

impl SubjectsApi {
    /// Creates the API over the given façade.
    #[must_use]
    pub const fn new(crud: CrudClient) -> Self {
        Self { crud }
    }

    /// One page of subjects. Empty on failure.
    pub async fn list(&self, query: &PageQuery) -> Page<Subject> {
        let outcome = self.crud.read("/subjects", Some(query)).await;
        or_fallback(outcome, Page::empty(query), "subjects")
    }

    /// A single subject.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn get(&self, id: i64) -> ApiResult<Subject> {
        required(self.crud.read(&format!("/subjects/{id}"), NO_PAYLOAD).await)
    }

    /// Creates a subject.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn create(&self, subject: &NewSubject) -> ApiResult<Subject> {
        required(self.crud.create("/subjects", Some(subject)).await)
    }

    /// Replaces a subject.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn update(&self, id: i64, subject: &SubjectUpdate) -> ApiResult<Subject> {
        required(self.crud.update(&format!("/subjects/{id}"), Some(subject)).await)
    }

    /// Deletes a subject.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let outcome = self
            .crud
            .delete::<_, IgnoredAny>(&format!("/subjects/{id}"), NO_PAYLOAD)
            .await;
        required(outcome).map(|_| ())
    }
}

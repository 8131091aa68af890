//! Syllabi API

use serde::de::IgnoredAny;

use scholar_domain::academics::{Assessment, NewAssessment, NewSyllabus, Syllabus};

use super::{or_fallback, required};
use crate::crud::{CrudClient, NO_PAYLOAD};
use crate::error::{ApiError, ApiResult};

/// Syllabi and their assessments.
#[derive(Debug, Clone)]
pub struct SyllabiApi {
    crud: CrudClient,
}

impl SyllabiApi {
    /// Creates the API over the given façade.
    #[must_use]
    pub const fn new(crud: CrudClient) -> Self {
        Self { crud }
    }

    /// Syllabi of a subject. Empty on failure.
    pub async fn list_for_subject(&self, subject_id: i64) -> Vec<Syllabus> {
        let outcome = self
            .crud
            .read(&format!("/subjects/{subject_id}/syllabi"), NO_PAYLOAD)
            .await;
        or_fallback(outcome, Vec::new(), "syllabi")
    }

    /// A single syllabus with its assessments.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn get(&self, id: i64) -> ApiResult<Syllabus> {
        required(self.crud.read(&format!("/syllabi/{id}"), NO_PAYLOAD).await)
    }

    /// Creates a syllabus for a subject.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn create(&self, syllabus: &NewSyllabus) -> ApiResult<Syllabus> {
        let path = format!("/subjects/{}/syllabi", syllabus.subject_id);
        required(self.crud.create(&path, Some(syllabus)).await)
    }

    /// Adds an assessment, refusing weights that would push the syllabus
    /// total past 100.
    ///
    /// # Errors
    /// Returns [`ApiError::Validation`] if the weight does not fit, or an
    /// error if a request fails.
    pub async fn add_assessment(
        &self,
        syllabus_id: i64,
        assessment: &NewAssessment,
    ) -> ApiResult<Assessment> {
        let syllabus = self.get(syllabus_id).await?;
        if !syllabus.accepts_weight(assessment.weight) {
            return Err(ApiError::Validation(format!(
                "weight {} exceeds the {} still available in syllabus {syllabus_id}",
                assessment.weight,
                syllabus.remaining_weight()
            )));
        }
        let path = format!("/syllabi/{syllabus_id}/assessments");
        required(self.crud.create(&path, Some(assessment)).await)
    }

    /// Removes an assessment.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn remove_assessment(&self, syllabus_id: i64, assessment_id: i64) -> ApiResult<()> {
        let path = format!("/syllabi/{syllabus_id}/assessments/{assessment_id}");
        let outcome = self.crud.delete::<_, IgnoredAny>(&path, NO_PAYLOAD).await;
        required(outcome).map(|_| ())
    }
}

//! Student roadmap API

use serde::Serialize;
use serde::de::IgnoredAny;
use tracing::debug;

use scholar_domain::roadmap::{NewRoadmapLink, NewRoadmapNode};
use scholar_domain::{RoadmapGraph, RoadmapLink, RoadmapNode};

use super::required;
use crate::crud::{CrudClient, NO_PAYLOAD};
use crate::error::{ApiError, ApiResult};

#[derive(Serialize)]
struct CompletionChange {
    completed: bool,
}

/// A student's prerequisite graph.
#[derive(Debug, Clone)]
pub struct RoadmapApi {
    crud: CrudClient,
}

impl RoadmapApi {
    /// Creates the API over the given façade.
    #[must_use]
    pub const fn new(crud: CrudClient) -> Self {
        Self { crud }
    }

    /// The student's roadmap.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn fetch(&self, student_id: i64) -> ApiResult<RoadmapGraph> {
        required(
            self.crud
                .read(&format!("/students/{student_id}/roadmap"), NO_PAYLOAD)
                .await,
        )
    }

    /// The roadmap nodes in an order that respects every prerequisite.
    ///
    /// # Errors
    /// Returns an error if the request fails or the roadmap has a cycle.
    pub async fn study_order(&self, student_id: i64) -> ApiResult<Vec<RoadmapNode>> {
        let graph = self.fetch(student_id).await?;
        let order = graph.topological_order()?;
        Ok(order
            .into_iter()
            .filter_map(|id| graph.node(id).cloned())
            .collect())
    }

    /// Places a subject on the roadmap.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn add_node(&self, student_id: i64, node: &NewRoadmapNode) -> ApiResult<RoadmapNode> {
        let path = format!("/students/{student_id}/roadmap/nodes");
        required(self.crud.create(&path, Some(node)).await)
    }

    /// Makes `source` a prerequisite of `target`.
    ///
    /// The current roadmap is fetched first and the link is refused locally
    /// if it is unknown, duplicated, or would close a cycle.
    ///
    /// # Errors
    /// Returns [`ApiError::Validation`] if the link is refused, or an error
    /// if a request fails.
    pub async fn link(&self, student_id: i64, source: i64, target: i64) -> ApiResult<RoadmapLink> {
        let graph = self.fetch(student_id).await?;
        if let Err(e) = graph.validate_link(source, target) {
            debug!(student_id, source, target, error = %e, "roadmap link refused");
            return Err(ApiError::Validation(e.to_string()));
        }
        let path = format!("/students/{student_id}/roadmap/links");
        required(
            self.crud
                .create(&path, Some(&NewRoadmapLink { source, target }))
                .await,
        )
    }

    /// Removes a prerequisite link.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn unlink(&self, link_id: i64) -> ApiResult<()> {
        let path = format!("/roadmap/links/{link_id}");
        let outcome = self.crud.delete::<_, IgnoredAny>(&path, NO_PAYLOAD).await;
        required(outcome).map(|_| ())
    }

    /// Removes a node and, on the server, its links.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn remove_node(&self, node_id: i64) -> ApiResult<()> {
        let path = format!("/roadmap/nodes/{node_id}");
        let outcome = self.crud.delete::<_, IgnoredAny>(&path, NO_PAYLOAD).await;
        required(outcome).map(|_| ())
    }

    /// Marks a node as completed or not. The flag travels in the query string.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn set_completed(&self, node_id: i64, completed: bool) -> ApiResult<RoadmapNode> {
        let path = format!("/roadmap/nodes/{node_id}");
        required(
            self.crud
                .patch(&path, Some(&CompletionChange { completed }))
                .await,
        )
    }
}

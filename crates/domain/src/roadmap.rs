//! Student roadmap: subjects linked by prerequisite relationships.
//!
//! A link `source -> target` means `source` must be completed before
//! `target`. The server stores whatever it is given, so the client checks
//! links locally before sending them to keep the graph acyclic.

use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::DomainError;

/// Errors raised by roadmap graph checks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoadmapError {
    /// A node id does not exist in the graph.
    #[error("unknown roadmap node {0}")]
    UnknownNode(i64),

    /// A subject cannot be its own prerequisite.
    #[error("node {0} cannot be a prerequisite of itself")]
    SelfLink(i64),

    /// The link already exists.
    #[error("node {prerequisite} is already a prerequisite of node {dependent}")]
    DuplicateLink {
        /// Prerequisite node
        prerequisite: i64,
        /// Dependent node
        dependent: i64,
    },

    /// The link would close a prerequisite cycle.
    #[error("linking node {prerequisite} before node {dependent} would create a cycle")]
    WouldCreateCycle {
        /// Prerequisite node
        prerequisite: i64,
        /// Dependent node
        dependent: i64,
    },

    /// The graph already contains a cycle among these nodes.
    #[error("roadmap contains a prerequisite cycle through nodes {0:?}")]
    Cycle(Vec<i64>),
}

impl From<RoadmapError> for DomainError {
    fn from(error: RoadmapError) -> Self {
        Self::InvalidRoadmap(error.to_string())
    }
}

/// A subject placed on a student's roadmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapNode {
    /// Server identifier
    pub id: i64,
    /// Subject represented by this node
    pub subject_id: i64,
    /// Display label
    pub label: String,
    /// Whether the student passed the subject
    #[serde(default)]
    pub completed: bool,
}

/// A prerequisite edge: `source` must be completed before `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapLink {
    /// Server identifier
    pub id: i64,
    /// Prerequisite node
    pub source: i64,
    /// Dependent node
    pub target: i64,
}

/// Payload for placing a subject on the roadmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRoadmapNode {
    /// Subject to place
    pub subject_id: i64,
    /// Display label
    pub label: String,
}

/// Payload for linking two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRoadmapLink {
    /// Prerequisite node
    pub source: i64,
    /// Dependent node
    pub target: i64,
}

/// A student's roadmap graph as returned by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapGraph {
    /// Subjects on the roadmap
    #[serde(default)]
    pub nodes: Vec<RoadmapNode>,
    /// Prerequisite edges
    #[serde(default)]
    pub links: Vec<RoadmapLink>,
}

impl RoadmapGraph {
    /// Returns the node with the given id.
    #[must_use]
    pub fn node(&self, id: i64) -> Option<&RoadmapNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Returns the direct prerequisites of a node.
    #[must_use]
    pub fn prerequisites_of(&self, id: i64) -> Vec<&RoadmapNode> {
        self.links
            .iter()
            .filter(|l| l.target == id)
            .filter_map(|l| self.node(l.source))
            .collect()
    }

    /// Returns the nodes that directly depend on a node.
    #[must_use]
    pub fn dependents_of(&self, id: i64) -> Vec<&RoadmapNode> {
        self.links
            .iter()
            .filter(|l| l.source == id)
            .filter_map(|l| self.node(l.target))
            .collect()
    }

    /// Returns true if adding `source -> target` would close a cycle.
    ///
    /// Self-links count as cycles. Otherwise the link closes a cycle exactly
    /// when `source` is already reachable from `target`.
    #[must_use]
    pub fn would_create_cycle(&self, source: i64, target: i64) -> bool {
        if source == target {
            return true;
        }
        let mut seen = HashSet::new();
        let mut stack = vec![target];
        while let Some(current) = stack.pop() {
            if current == source {
                return true;
            }
            if !seen.insert(current) {
                continue;
            }
            stack.extend(
                self.links
                    .iter()
                    .filter(|l| l.source == current)
                    .map(|l| l.target),
            );
        }
        false
    }

    /// Checks that `source -> target` can be added.
    ///
    /// # Errors
    ///
    /// Returns a [`RoadmapError`] if either node is unknown, the link is a
    /// self-link, already exists, or would close a cycle.
    pub fn validate_link(&self, source: i64, target: i64) -> Result<(), RoadmapError> {
        for id in [source, target] {
            if self.node(id).is_none() {
                return Err(RoadmapError::UnknownNode(id));
            }
        }
        if source == target {
            return Err(RoadmapError::SelfLink(source));
        }
        if self
            .links
            .iter()
            .any(|l| l.source == source && l.target == target)
        {
            return Err(RoadmapError::DuplicateLink {
                prerequisite: source,
                dependent: target,
            });
        }
        if self.would_create_cycle(source, target) {
            return Err(RoadmapError::WouldCreateCycle {
                prerequisite: source,
                dependent: target,
            });
        }
        Ok(())
    }

    /// Orders the nodes so that every prerequisite comes before its dependents.
    ///
    /// Ties are broken by node id so the order is stable.
    ///
    /// # Errors
    ///
    /// Returns [`RoadmapError::Cycle`] with the ids left unordered when the
    /// graph contains a cycle.
    pub fn topological_order(&self) -> Result<Vec<i64>, RoadmapError> {
        let mut in_degree: BTreeMap<i64, usize> = self.nodes.iter().map(|n| (n.id, 0)).collect();
        for link in &self.links {
            if in_degree.contains_key(&link.source) {
                if let Some(degree) = in_degree.get_mut(&link.target) {
                    *degree += 1;
                }
            }
        }

        let mut ready: VecDeque<i64> = in_degree
            .iter()
            .filter(|&(_, &degree)| degree == 0)
            .map(|(&id, _)| id)
            .collect();
        let mut order = Vec::with_capacity(in_degree.len());

        while let Some(id) = ready.pop_front() {
            order.push(id);
            let mut unlocked = BTreeSet::new();
            for link in self.links.iter().filter(|l| l.source == id) {
                if let Some(degree) = in_degree.get_mut(&link.target) {
                    *degree -= 1;
                    if *degree == 0 {
                        unlocked.insert(link.target);
                    }
                }
            }
            ready.extend(unlocked);
        }

        if order.len() == in_degree.len() {
            Ok(order)
        } else {
            let ordered: HashSet<i64> = order.into_iter().collect();
            let remaining = in_degree
                .keys()
                .copied()
                .filter(|id| !ordered.contains(id))
                .collect();
            Err(RoadmapError::Cycle(remaining))
        }
    }

    /// Nodes the student can take now: not completed, all prerequisites done.
    #[must_use]
    pub fn available_nodes(&self) -> Vec<&RoadmapNode> {
        self.nodes
            .iter()
            .filter(|n| !n.completed)
            .filter(|n| self.prerequisites_of(n.id).iter().all(|p| p.completed))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn node(id: i64, completed: bool) -> RoadmapNode {
        RoadmapNode {
            id,
            subject_id: id * 10,
            label: format!("S{id}"),
            completed,
        }
    }

    fn link(id: i64, source: i64, target: i64) -> RoadmapLink {
        RoadmapLink { id, source, target }
    }

    /// 1 -> 2 -> 3, 1 -> 4
    fn sample() -> RoadmapGraph {
        RoadmapGraph {
            nodes: vec![node(1, true), node(2, false), node(3, false), node(4, false)],
            links: vec![link(100, 1, 2), link(101, 2, 3), link(102, 1, 4)],
        }
    }

    #[test]
    fn test_prerequisites_and_dependents() {
        let graph = sample();
        let prereqs: Vec<i64> = graph.prerequisites_of(3).iter().map(|n| n.id).collect();
        assert_eq!(prereqs, vec![2]);

        let dependents: Vec<i64> = graph.dependents_of(1).iter().map(|n| n.id).collect();
        assert_eq!(dependents, vec![2, 4]);
    }

    #[test]
    fn test_would_create_cycle() {
        let graph = sample();
        assert!(graph.would_create_cycle(3, 1));
        assert!(graph.would_create_cycle(2, 2));
        assert!(!graph.would_create_cycle(4, 3));
        assert!(!graph.would_create_cycle(1, 3));
    }

    #[test]
    fn test_validate_link() {
        let graph = sample();
        assert_eq!(graph.validate_link(4, 3), Ok(()));
        assert_eq!(graph.validate_link(9, 3), Err(RoadmapError::UnknownNode(9)));
        assert_eq!(graph.validate_link(2, 2), Err(RoadmapError::SelfLink(2)));
        assert_eq!(
            graph.validate_link(1, 2),
            Err(RoadmapError::DuplicateLink {
                prerequisite: 1,
                dependent: 2
            })
        );
        assert_eq!(
            graph.validate_link(3, 1),
            Err(RoadmapError::WouldCreateCycle {
                prerequisite: 3,
                dependent: 1
            })
        );
    }

    #[test]
    fn test_topological_order() {
        assert_eq!(sample().topological_order().unwrap(), vec![1, 2, 4, 3]);
    }

    #[test]
    fn test_topological_order_reports_cycle() {
        let mut graph = sample();
        graph.links.push(link(103, 3, 2));

        assert_eq!(graph.topological_order(), Err(RoadmapError::Cycle(vec![2, 3])));
    }

    #[test]
    fn test_available_nodes() {
        let graph = sample();
        let available: Vec<i64> = graph.available_nodes().iter().map(|n| n.id).collect();
        assert_eq!(available, vec![2, 4]);
    }

    #[test]
    fn test_roadmap_error_converts_to_domain_error() {
        let err: DomainError = RoadmapError::SelfLink(5).into();
        assert!(matches!(err, DomainError::InvalidRoadmap(_)));
    }
}

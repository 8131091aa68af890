//! Subjects

use serde::{Deserialize, Serialize};

/// A subject offered by the school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Server identifier
    pub id: i64,
    /// Short catalogue code, e.g. `MATH101`
    pub code: String,
    /// Display name
    pub name: String,
    /// Credit value
    #[serde(default)]
    pub credits: u32,
    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payload for creating a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubject {
    /// Short catalogue code
    pub code: String,
    /// Display name
    pub name: String,
    /// Credit value
    pub credits: u32,
    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Full replacement payload for an existing subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectUpdate {
    /// Short catalogue code
    pub code: String,
    /// Display name
    pub name: String,
    /// Credit value
    pub credits: u32,
    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<Subject> for SubjectUpdate {
    fn from(subject: Subject) -> Self {
        Self {
            code: subject.code,
            name: subject.name,
            credits: subject.credits,
            description: subject.description,
        }
    }
}

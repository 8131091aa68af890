//! Curricula

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Publication status of a curriculum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CurriculumStatus {
    /// Being edited, not visible to students
    #[default]
    Draft,
    /// Visible to students
    Published,
    /// Kept for history only
    Archived,
}

impl CurriculumStatus {
    /// Returns the wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for CurriculumStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurriculumStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            other => Err(DomainError::InvalidPayload(format!(
                "unknown curriculum status: {other}"
            ))),
        }
    }
}

/// A program's ordered set of subjects for one intake year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curriculum {
    /// Server identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Degree program
    pub program: String,
    /// Intake year
    pub year: u16,
    /// Publication status
    #[serde(default)]
    pub status: CurriculumStatus,
    /// Subjects in the curriculum
    #[serde(default)]
    pub subject_ids: Vec<i64>,
}

/// Payload for creating a curriculum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCurriculum {
    /// Display name
    pub name: String,
    /// Degree program
    pub program: String,
    /// Intake year
    pub year: u16,
    /// Subjects in the curriculum
    #[serde(default)]
    pub subject_ids: Vec<i64>,
}

//! Syllabi and their assessments

use serde::{Deserialize, Serialize};

/// Assessment weights of a syllabus may not add up to more than this.
pub const MAX_TOTAL_WEIGHT: u32 = 100;

/// A graded assessment (exam, project, quiz, ...) within a syllabus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    /// Server identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Free-form category, e.g. `exam`
    #[serde(default)]
    pub kind: String,
    /// Share of the final grade, in percent
    pub weight: u32,
}

/// Payload for adding an assessment to a syllabus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAssessment {
    /// Display name
    pub name: String,
    /// Free-form category
    pub kind: String,
    /// Share of the final grade, in percent
    pub weight: u32,
}

/// The teaching plan of a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Syllabus {
    /// Server identifier
    pub id: i64,
    /// Subject this syllabus belongs to
    pub subject_id: i64,
    /// Title, usually the term
    pub title: String,
    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Graded assessments
    #[serde(default)]
    pub assessments: Vec<Assessment>,
}

impl Syllabus {
    /// Sum of all assessment weights, saturating at `u32::MAX`.
    #[must_use]
    pub fn total_weight(&self) -> u32 {
        self.assessments
            .iter()
            .fold(0u32, |total, a| total.saturating_add(a.weight))
    }

    /// Weight still available for new assessments.
    #[must_use]
    pub fn remaining_weight(&self) -> u32 {
        MAX_TOTAL_WEIGHT.saturating_sub(self.total_weight())
    }

    /// Returns true if an assessment of `weight` still fits.
    #[must_use]
    pub fn accepts_weight(&self, weight: u32) -> bool {
        weight <= self.remaining_weight()
    }
}

/// Payload for creating a syllabus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSyllabus {
    /// Subject the syllabus belongs to
    pub subject_id: i64,
    /// Title, usually the term
    pub title: String,
    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn assessment(id: i64, weight: u32) -> Assessment {
        Assessment {
            id,
            name: format!("A{id}"),
            kind: "exam".to_string(),
            weight,
        }
    }

    #[test]
    fn test_weights() {
        let syllabus = Syllabus {
            id: 1,
            subject_id: 7,
            title: "Fall".to_string(),
            description: None,
            assessments: vec![assessment(1, 40), assessment(2, 35)],
        };

        assert_eq!(syllabus.total_weight(), 75);
        assert_eq!(syllabus.remaining_weight(), 25);
        assert!(syllabus.accepts_weight(25));
        assert!(!syllabus.accepts_weight(26));
    }

    #[test]
    fn test_oversized_weights_do_not_wrap() {
        let syllabus = Syllabus {
            id: 1,
            subject_id: 7,
            title: "Fall".to_string(),
            description: None,
            assessments: vec![assessment(1, u32::MAX), assessment(2, 2)],
        };

        assert_eq!(syllabus.total_weight(), u32::MAX);
        assert_eq!(syllabus.remaining_weight(), 0);
        assert!(!syllabus.accepts_weight(1));
    }

    #[test]
    fn test_missing_assessments_default_to_empty() {
        let syllabus: Syllabus =
            serde_json::from_str(r#"{"id":1,"subject_id":2,"title":"Spring"}"#).unwrap();
        assert!(syllabus.assessments.is_empty());
        assert_eq!(syllabus.remaining_weight(), MAX_TOTAL_WEIGHT);
    }
}

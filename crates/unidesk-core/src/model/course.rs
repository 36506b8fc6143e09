// ── Course domain type ──

use serde::{Deserialize, Serialize};

use super::Record;
use super::entity_id::CourseId;

/// A course in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub code: Option<String>,
    pub credit: Option<u32>,
    pub description: Option<String>,
}

/// A course that has not been saved yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDraft {
    pub name: String,
    pub code: Option<String>,
    pub credit: Option<u32>,
    pub description: Option<String>,
}

impl CourseDraft {
    pub fn with_id(self, id: CourseId) -> Course {
        Course {
            id,
            name: self.name,
            code: self.code,
            credit: self.credit,
            description: self.description,
        }
    }
}

impl Record for Course {
    type Id = CourseId;

    fn id(&self) -> CourseId {
        self.id
    }
}

// ── Department domain type ──

use serde::{Deserialize, Serialize};

use super::Record;
use super::entity_id::DepartmentId;

/// An academic department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub head: Option<String>,
}

/// A department that has not been saved yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentDraft {
    pub name: String,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub head: Option<String>,
}

impl DepartmentDraft {
    /// Attach an identifier, producing the entity an update submits.
    pub fn with_id(self, id: DepartmentId) -> Department {
        Department {
            id,
            name: self.name,
            location: self.location,
            phone: self.phone,
            head: self.head,
        }
    }
}

impl Record for Department {
    type Id = DepartmentId;

    fn id(&self) -> DepartmentId {
        self.id
    }
}

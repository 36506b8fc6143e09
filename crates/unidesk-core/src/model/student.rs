// ── Student domain type ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Record;
use super::entity_id::{DepartmentId, StudentId};

/// A registered student.
///
/// The department is embedded on read; writes only ever send its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub department: Option<DepartmentSummary>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn department_id(&self) -> Option<DepartmentId> {
        self.department.as_ref().map(|d| d.id)
    }
}

/// The slice of a department a student record carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentSummary {
    pub id: DepartmentId,
    pub name: Option<String>,
}

/// A student that has not been saved yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub department_id: Option<DepartmentId>,
}

impl StudentDraft {
    pub fn with_id(self, id: StudentId) -> Student {
        Student {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            date_of_birth: self.date_of_birth,
            address: self.address,
            department: self
                .department_id
                .map(|id| DepartmentSummary { id, name: None }),
        }
    }
}

impl Record for Student {
    type Id = StudentId;

    fn id(&self) -> StudentId {
        self.id
    }
}

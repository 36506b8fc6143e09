// ── Domain model ──
//
// Canonical types consumers see. Wire DTOs from `unidesk-api` are
// converted into these in `crate::convert`.

pub mod course;
pub mod department;
pub mod enrollment;
pub mod entity_id;
pub mod student;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

pub use course::{Course, CourseDraft};
pub use department::{Department, DepartmentDraft};
pub use enrollment::{
    CourseSummary, Enrollment, EnrollmentDraft, EnrollmentStatus, EnrollmentSummary,
    StudentSummary,
};
pub use entity_id::{CourseId, DepartmentId, EnrollmentId, StudentId};
pub use student::{DepartmentSummary, Student, StudentDraft};

/// Anything the store keeps in a container: it has a stable id.
pub trait Record: Clone + Send + Sync + 'static {
    type Id: Copy + Eq + std::fmt::Display + Send + Sync + 'static;

    fn id(&self) -> Self::Id;
}

/// The four record kinds the backend serves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EntityKind {
    Department,
    Course,
    Student,
    Enrollment,
}

impl EntityKind {
    /// Order in which an initial load fills the containers.
    pub const LOAD_ORDER: [EntityKind; 4] = [
        EntityKind::Department,
        EntityKind::Course,
        EntityKind::Student,
        EntityKind::Enrollment,
    ];

    pub fn plural(self) -> &'static str {
        match self {
            Self::Department => "departments",
            Self::Course => "courses",
            Self::Student => "students",
            Self::Enrollment => "enrollments",
        }
    }
}

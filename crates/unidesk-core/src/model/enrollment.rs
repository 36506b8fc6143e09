// ── Enrollment domain types ──
//
// Two read shapes exist: the full record behind a single-item fetch
// (`Enrollment`) and the display shape the list endpoint returns
// (`EnrollmentSummary`). The store's enrollments container holds the
// display shape.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

use super::Record;
use super::entity_id::{CourseId, EnrollmentId, StudentId};

// ── EnrollmentStatus ────────────────────────────────────────────────

/// Lifecycle state of an enrollment. Exactly these five exist.
///
/// Declaration order is the board's column order.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum EnrollmentStatus {
    #[default]
    Active,
    Completed,
    Failed,
    Dropped,
    Withdrawn,
}

impl EnrollmentStatus {
    /// Target statuses offered as one-click moves from a card in this state.
    ///
    /// Completed cards offer nothing; failed cards can still be completed.
    pub fn quick_moves(self) -> &'static [EnrollmentStatus] {
        match self {
            Self::Completed => &[],
            Self::Failed => &[Self::Completed],
            Self::Active | Self::Dropped | Self::Withdrawn => &[Self::Completed, Self::Failed],
        }
    }

    /// Whether a one-click move from `self` to `target` is offered.
    pub fn can_move_to(self, target: EnrollmentStatus) -> bool {
        self.quick_moves().contains(&target)
    }
}

// ── Enrollment ──────────────────────────────────────────────────────

/// A full enrollment record, as fetched for editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: EnrollmentId,
    /// Absent only when the record was assembled locally from a form.
    pub enrollment_date: Option<NaiveDate>,
    pub grade: Option<f64>,
    pub status: EnrollmentStatus,
    pub student_id: StudentId,
    pub course_id: CourseId,
}

/// Display shape of an enrollment, as listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentSummary {
    pub id: EnrollmentId,
    pub enrollment_date: NaiveDate,
    pub grade: Option<f64>,
    pub status: EnrollmentStatus,
    pub student: StudentSummary,
    pub course: CourseSummary,
}

impl EnrollmentSummary {
    pub fn student_name(&self) -> String {
        self.student.display_name()
    }

    pub fn course_name(&self) -> &str {
        self.course.name.as_deref().unwrap_or("")
    }
}

/// The slice of a student an enrollment listing carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSummary {
    pub id: StudentId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl StudentSummary {
    pub fn display_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The slice of a course an enrollment listing carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSummary {
    pub id: CourseId,
    pub name: Option<String>,
}

/// An enrollment that has not been saved yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentDraft {
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub status: EnrollmentStatus,
    pub grade: Option<f64>,
}

impl Record for EnrollmentSummary {
    type Id = EnrollmentId;

    fn id(&self) -> EnrollmentId {
        self.id
    }
}

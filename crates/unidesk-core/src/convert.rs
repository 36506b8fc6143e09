// ── Wire ↔ domain conversion ──
//
// Read shapes become domain types; domain types and drafts become write
// payloads that reference related records by id only.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

use unidesk_api::records::types::{
    CoursePayload, CourseRef, CourseResponse, DepartmentPayload, DepartmentRef, DepartmentResponse,
    EnrollmentCourse, EnrollmentListItem, EnrollmentPayload, EnrollmentResponse,
    EnrollmentStudent, StudentPayload, StudentRef, StudentResponse,
};

use crate::error::CoreError;
use crate::model::{
    Course, CourseDraft, CourseId, CourseSummary, Department, DepartmentDraft, DepartmentId,
    DepartmentSummary, Enrollment, EnrollmentDraft, EnrollmentId, EnrollmentStatus,
    EnrollmentSummary, Student, StudentDraft, StudentId, StudentSummary,
};

// ── Scalars ─────────────────────────────────────────────────────────

/// Parse a backend date leniently: `YYYY-MM-DD`, a naive ISO date-time,
/// or RFC 3339. Only the calendar date is kept.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

fn required_date(raw: &str, what: &str) -> Result<NaiveDate, CoreError> {
    parse_date(raw).ok_or_else(|| CoreError::decode(format!("{what}: unparseable date {raw:?}")))
}

/// Status strings are decoded strictly; anything outside the five known
/// values is a decode failure.
pub fn parse_status(raw: &str) -> Result<EnrollmentStatus, CoreError> {
    EnrollmentStatus::from_str(raw)
        .map_err(|_| CoreError::decode(format!("unknown enrollment status {raw:?}")))
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ── Departments ─────────────────────────────────────────────────────

impl From<DepartmentResponse> for Department {
    fn from(d: DepartmentResponse) -> Self {
        Self {
            id: DepartmentId::new(d.id_department),
            name: d.name,
            location: d.location,
            phone: d.phone,
            head: d.head,
        }
    }
}

impl From<&DepartmentDraft> for DepartmentPayload {
    fn from(d: &DepartmentDraft) -> Self {
        Self {
            id_department: None,
            name: d.name.clone(),
            location: d.location.clone(),
            phone: d.phone.clone(),
            head: d.head.clone(),
        }
    }
}

impl From<&Department> for DepartmentPayload {
    fn from(d: &Department) -> Self {
        Self {
            id_department: Some(d.id.get()),
            name: d.name.clone(),
            location: d.location.clone(),
            phone: d.phone.clone(),
            head: d.head.clone(),
        }
    }
}

// ── Courses ─────────────────────────────────────────────────────────

impl From<CourseResponse> for Course {
    fn from(c: CourseResponse) -> Self {
        Self {
            id: CourseId::new(c.id_course),
            name: c.name,
            code: c.code,
            credit: c.credit,
            description: c.description,
        }
    }
}

impl From<&CourseDraft> for CoursePayload {
    fn from(c: &CourseDraft) -> Self {
        Self {
            id_course: None,
            name: c.name.clone(),
            code: c.code.clone(),
            credit: c.credit,
            description: c.description.clone(),
        }
    }
}

impl From<&Course> for CoursePayload {
    fn from(c: &Course) -> Self {
        Self {
            id_course: Some(c.id.get()),
            name: c.name.clone(),
            code: c.code.clone(),
            credit: c.credit,
            description: c.description.clone(),
        }
    }
}

// ── Students ────────────────────────────────────────────────────────

impl From<StudentResponse> for Student {
    fn from(s: StudentResponse) -> Self {
        let date_of_birth = s.date_of_birth.as_deref().and_then(|raw| {
            let parsed = parse_date(raw);
            if parsed.is_none() {
                debug!(student = s.id_student, raw, "ignoring unparseable date of birth");
            }
            parsed
        });

        Self {
            id: StudentId::new(s.id_student),
            first_name: s.first_name,
            last_name: s.last_name,
            email: s.email,
            phone: s.phone,
            date_of_birth,
            address: s.address,
            department: s.department.map(|d| DepartmentSummary {
                id: DepartmentId::new(d.id_department),
                name: Some(d.name),
            }),
        }
    }
}

impl From<&StudentDraft> for StudentPayload {
    fn from(s: &StudentDraft) -> Self {
        Self {
            id_student: None,
            first_name: s.first_name.clone(),
            last_name: s.last_name.clone(),
            email: s.email.clone(),
            phone: s.phone.clone(),
            date_of_birth: s.date_of_birth.map(format_date),
            address: s.address.clone(),
            department: s.department_id.map(|id| DepartmentRef {
                id_department: id.get(),
            }),
        }
    }
}

impl From<&Student> for StudentPayload {
    fn from(s: &Student) -> Self {
        Self {
            id_student: Some(s.id.get()),
            first_name: s.first_name.clone(),
            last_name: s.last_name.clone(),
            email: s.email.clone(),
            phone: s.phone.clone(),
            date_of_birth: s.date_of_birth.map(format_date),
            address: s.address.clone(),
            department: s.department_id().map(|id| DepartmentRef {
                id_department: id.get(),
            }),
        }
    }
}

// ── Enrollments ─────────────────────────────────────────────────────

impl From<EnrollmentStudent> for StudentSummary {
    fn from(s: EnrollmentStudent) -> Self {
        Self {
            id: StudentId::new(s.id_student),
            first_name: s.first_name,
            last_name: s.last_name,
        }
    }
}

impl From<EnrollmentCourse> for CourseSummary {
    fn from(c: EnrollmentCourse) -> Self {
        Self {
            id: CourseId::new(c.id_course),
            name: c.name,
        }
    }
}

impl TryFrom<EnrollmentListItem> for EnrollmentSummary {
    type Error = CoreError;

    fn try_from(e: EnrollmentListItem) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EnrollmentId::new(e.id_enrollment),
            enrollment_date: required_date(
                &e.enrollment_date,
                &format!("enrollment {}", e.id_enrollment),
            )?,
            grade: e.grade,
            status: parse_status(&e.status)?,
            student: e.student.into(),
            course: e.course.into(),
        })
    }
}

impl TryFrom<EnrollmentResponse> for Enrollment {
    type Error = CoreError;

    fn try_from(e: EnrollmentResponse) -> Result<Self, Self::Error> {
        let student = e.student.ok_or_else(|| {
            CoreError::decode(format!("enrollment {} has no student", e.id_enrollment))
        })?;
        let course_id = e
            .course
            .map(|c| c.id_course)
            .or(e.course_id)
            .ok_or_else(|| {
                CoreError::decode(format!("enrollment {} has no course", e.id_enrollment))
            })?;

        Ok(Self {
            id: EnrollmentId::new(e.id_enrollment),
            enrollment_date: Some(required_date(
                &e.enrollment_date,
                &format!("enrollment {}", e.id_enrollment),
            )?),
            grade: e.grade,
            status: parse_status(&e.status)?,
            student_id: StudentId::new(student.id_student),
            course_id: CourseId::new(course_id),
        })
    }
}

/// Create payload. The enrollment date is the submission instant.
pub(crate) fn enrollment_create_payload(
    draft: &EnrollmentDraft,
    now: DateTime<Utc>,
) -> EnrollmentPayload {
    EnrollmentPayload {
        id_enrollment: None,
        enrollment_date: Some(now.to_rfc3339()),
        grade: draft.grade,
        status: draft.status.to_string(),
        student: StudentRef {
            id_student: draft.student_id.get(),
        },
        course: CourseRef {
            id_course: draft.course_id.get(),
        },
    }
}

impl From<&Enrollment> for EnrollmentPayload {
    fn from(e: &Enrollment) -> Self {
        Self {
            id_enrollment: Some(e.id.get()),
            enrollment_date: e.enrollment_date.map(format_date),
            grade: e.grade,
            status: e.status.to_string(),
            student: StudentRef {
                id_student: e.student_id.get(),
            },
            course: CourseRef {
                id_course: e.course_id.get(),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn parse_date_accepts_common_shapes() {
        let expected = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        assert_eq!(parse_date("2024-09-01"), Some(expected));
        assert_eq!(parse_date("2024-09-01T10:30:00"), Some(expected));
        assert_eq!(parse_date("2024-09-01T10:30:00.123Z"), Some(expected));
        assert_eq!(parse_date("2024-09-01T10:30:00+02:00"), Some(expected));
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn unknown_status_is_decode_error() {
        let item = EnrollmentListItem {
            id_enrollment: 1,
            enrollment_date: "2024-09-01".into(),
            grade: None,
            status: "PAUSED".into(),
            student: EnrollmentStudent {
                id_student: 1,
                first_name: None,
                last_name: None,
            },
            course: EnrollmentCourse {
                id_course: 1,
                name: None,
            },
        };
        let err = EnrollmentSummary::try_from(item).unwrap_err();
        assert!(matches!(err, CoreError::Decode { .. }));
    }

    #[test]
    fn enrollment_course_falls_back_to_course_id() {
        let raw: EnrollmentResponse = serde_json::from_value(json!({
            "idEnrollment": 4,
            "enrollmentDate": "2024-02-03",
            "status": "FAILED",
            "student": { "idStudent": 8 },
            "courseId": 21
        }))
        .unwrap();
        let e = Enrollment::try_from(raw).unwrap();
        assert_eq!(e.course_id, CourseId::new(21));
        assert_eq!(e.status, EnrollmentStatus::Failed);
    }

    #[test]
    fn enrollment_update_payload_uses_references() {
        let e = Enrollment {
            id: EnrollmentId::new(1),
            enrollment_date: NaiveDate::from_ymd_opt(2024, 9, 1),
            grade: Some(12.0),
            status: EnrollmentStatus::Completed,
            student_id: StudentId::new(2),
            course_id: CourseId::new(3),
        };
        let value = serde_json::to_value(EnrollmentPayload::from(&e)).unwrap();
        assert_eq!(
            value,
            json!({
                "idEnrollment": 1,
                "enrollmentDate": "2024-09-01",
                "grade": 12.0,
                "status": "COMPLETED",
                "student": { "idStudent": 2 },
                "course": { "idCourse": 3 }
            })
        );
    }

    #[test]
    fn student_department_becomes_reference() {
        let draft = StudentDraft {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@uni.edu".into(),
            department_id: Some(DepartmentId::new(5)),
            ..StudentDraft::default()
        };
        let value = serde_json::to_value(StudentPayload::from(&draft)).unwrap();
        assert_eq!(value["department"], json!({ "idDepartment": 5 }));
    }
}

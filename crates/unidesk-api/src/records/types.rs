// Wire types for the records backend.
//
// Field names follow the backend's camelCase JSON (`idStudent`,
// `enrollmentDate`, ...). Read shapes and write payloads are separate
// types: writes reference related entities through the narrow `*Ref`
// structs, never through embedded entities.

use serde::{Deserialize, Serialize};

// ── Departments ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentResponse {
    pub id_department: i64,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub head: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_department: Option<i64>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<String>,
}

// ── Courses ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id_course: i64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub credit: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_course: Option<i64>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ── Students ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id_student: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub department: Option<DepartmentResponse>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_student: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<DepartmentRef>,
}

// ── Enrollments ──────────────────────────────────────────────────────

/// Full enrollment as returned by `getEnrollment/{id}`.
///
/// The backend embeds the student but often omits the course, sending
/// `courseId` instead; both are optional here and reconciled in core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResponse {
    pub id_enrollment: i64,
    pub enrollment_date: String,
    #[serde(default)]
    pub grade: Option<f64>,
    pub status: String,
    #[serde(default)]
    pub student: Option<EnrollmentStudent>,
    #[serde(default)]
    pub course: Option<EnrollmentCourse>,
    #[serde(default)]
    pub course_id: Option<i64>,
}

/// Display shape returned by `getAllEnrollment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentListItem {
    pub id_enrollment: i64,
    pub enrollment_date: String,
    #[serde(default)]
    pub grade: Option<f64>,
    pub status: String,
    pub student: EnrollmentStudent,
    pub course: EnrollmentCourse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentStudent {
    pub id_student: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentCourse {
    pub id_course: i64,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_enrollment: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<f64>,
    pub status: String,
    pub student: StudentRef,
    pub course: CourseRef,
}

// ── References (mutation payloads only) ──────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRef {
    pub id_student: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRef {
    pub id_course: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentRef {
    pub id_department: i64,
}

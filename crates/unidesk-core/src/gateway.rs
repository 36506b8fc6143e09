// ── Remote data gateway ──
//
// Typed facade over `RecordsClient`: one round trip per call, domain
// types in and out, every transport failure classified into `CoreError`.
// No retries and no caching; the store decides what to do with failures.

use chrono::Utc;
use unidesk_api::RecordsClient;
use unidesk_api::records::types::{
    CoursePayload, DepartmentPayload, EnrollmentPayload, StudentPayload,
};

use crate::convert::enrollment_create_payload;
use crate::error::CoreError;
use crate::model::{
    Course, CourseDraft, CourseId, Department, DepartmentDraft, DepartmentId, Enrollment,
    EnrollmentDraft, EnrollmentId, EnrollmentSummary, EntityKind, Student, StudentDraft,
    StudentId,
};

/// Domain-level access to the records backend.
pub struct Gateway {
    client: RecordsClient,
}

impl Gateway {
    pub fn new(client: RecordsClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RecordsClient {
        &self.client
    }

    // ── Students ─────────────────────────────────────────────────────

    pub async fn list_students(&self) -> Result<Vec<Student>, CoreError> {
        let raw = self
            .client
            .list_students()
            .await
            .map_err(|e| classify(e, EntityKind::Student, None))?;
        Ok(raw.into_iter().map(Student::from).collect())
    }

    pub async fn get_student(&self, id: StudentId) -> Result<Student, CoreError> {
        self.client
            .get_student(id.get())
            .await
            .map(Student::from)
            .map_err(|e| classify(e, EntityKind::Student, Some(id.get())))
    }

    /// `None` when the backend saved the record but echoed nothing.
    pub async fn create_student(
        &self,
        draft: &StudentDraft,
    ) -> Result<Option<Student>, CoreError> {
        self.client
            .create_student(&StudentPayload::from(draft))
            .await
            .map(|echo| echo.map(Student::from))
            .map_err(|e| classify(e, EntityKind::Student, None))
    }

    pub async fn update_student(&self, student: &Student) -> Result<Student, CoreError> {
        let echoed = self
            .client
            .update_student(&StudentPayload::from(student))
            .await
            .map_err(|e| classify(e, EntityKind::Student, Some(student.id.get())))?;
        Ok(echoed.map_or_else(|| student.clone(), Student::from))
    }

    pub async fn delete_student(&self, id: StudentId) -> Result<(), CoreError> {
        self.client
            .delete_student(id.get())
            .await
            .map_err(|e| classify(e, EntityKind::Student, Some(id.get())))
    }

    // ── Courses ──────────────────────────────────────────────────────

    pub async fn list_courses(&self) -> Result<Vec<Course>, CoreError> {
        let raw = self
            .client
            .list_courses()
            .await
            .map_err(|e| classify(e, EntityKind::Course, None))?;
        Ok(raw.into_iter().map(Course::from).collect())
    }

    pub async fn get_course(&self, id: CourseId) -> Result<Course, CoreError> {
        self.client
            .get_course(id.get())
            .await
            .map(Course::from)
            .map_err(|e| classify(e, EntityKind::Course, Some(id.get())))
    }

    pub async fn create_course(&self, draft: &CourseDraft) -> Result<Option<Course>, CoreError> {
        self.client
            .create_course(&CoursePayload::from(draft))
            .await
            .map(|echo| echo.map(Course::from))
            .map_err(|e| classify(e, EntityKind::Course, None))
    }

    pub async fn update_course(&self, course: &Course) -> Result<Course, CoreError> {
        let echoed = self
            .client
            .update_course(course.id.get(), &CoursePayload::from(course))
            .await
            .map_err(|e| classify(e, EntityKind::Course, Some(course.id.get())))?;
        Ok(echoed.map_or_else(|| course.clone(), Course::from))
    }

    pub async fn delete_course(&self, id: CourseId) -> Result<(), CoreError> {
        self.client
            .delete_course(id.get())
            .await
            .map_err(|e| classify(e, EntityKind::Course, Some(id.get())))
    }

    // ── Departments ──────────────────────────────────────────────────

    pub async fn list_departments(&self) -> Result<Vec<Department>, CoreError> {
        let raw = self
            .client
            .list_departments()
            .await
            .map_err(|e| classify(e, EntityKind::Department, None))?;
        Ok(raw.into_iter().map(Department::from).collect())
    }

    pub async fn get_department(&self, id: DepartmentId) -> Result<Department, CoreError> {
        self.client
            .get_department(id.get())
            .await
            .map(Department::from)
            .map_err(|e| classify(e, EntityKind::Department, Some(id.get())))
    }

    pub async fn create_department(
        &self,
        draft: &DepartmentDraft,
    ) -> Result<Option<Department>, CoreError> {
        self.client
            .create_department(&DepartmentPayload::from(draft))
            .await
            .map(|echo| echo.map(Department::from))
            .map_err(|e| classify(e, EntityKind::Department, None))
    }

    pub async fn update_department(
        &self,
        department: &Department,
    ) -> Result<Department, CoreError> {
        let echoed = self
            .client
            .update_department(&DepartmentPayload::from(department))
            .await
            .map_err(|e| classify(e, EntityKind::Department, Some(department.id.get())))?;
        Ok(echoed.map_or_else(|| department.clone(), Department::from))
    }

    pub async fn delete_department(&self, id: DepartmentId) -> Result<(), CoreError> {
        self.client
            .delete_department(id.get())
            .await
            .map_err(|e| classify(e, EntityKind::Department, Some(id.get())))
    }

    // ── Enrollments ──────────────────────────────────────────────────

    /// List enrollments in their display shape. One entry with an unknown
    /// status fails the whole list.
    pub async fn list_enrollments(&self) -> Result<Vec<EnrollmentSummary>, CoreError> {
        let raw = self
            .client
            .list_enrollments()
            .await
            .map_err(|e| classify(e, EntityKind::Enrollment, None))?;
        raw.into_iter().map(EnrollmentSummary::try_from).collect()
    }

    pub async fn get_enrollment(&self, id: EnrollmentId) -> Result<Enrollment, CoreError> {
        let raw = self
            .client
            .get_enrollment(id.get())
            .await
            .map_err(|e| classify(e, EntityKind::Enrollment, Some(id.get())))?;
        Enrollment::try_from(raw)
    }

    pub async fn create_enrollment(
        &self,
        draft: &EnrollmentDraft,
    ) -> Result<Option<Enrollment>, CoreError> {
        let raw = self
            .client
            .create_enrollment(&enrollment_create_payload(draft, Utc::now()))
            .await
            .map_err(|e| classify(e, EntityKind::Enrollment, None))?;
        // The echo is often empty or omits the course; the store re-fetches anyway.
        Ok(raw.and_then(|r| Enrollment::try_from(r).ok()))
    }

    pub async fn update_enrollment(&self, enrollment: &Enrollment) -> Result<Enrollment, CoreError> {
        let echoed = self
            .client
            .update_enrollment(&EnrollmentPayload::from(enrollment))
            .await
            .map_err(|e| classify(e, EntityKind::Enrollment, Some(enrollment.id.get())))?;
        Ok(echoed
            .and_then(|raw| Enrollment::try_from(raw).ok())
            .unwrap_or_else(|| enrollment.clone()))
    }

    pub async fn delete_enrollment(&self, id: EnrollmentId) -> Result<(), CoreError> {
        self.client
            .delete_enrollment(id.get())
            .await
            .map_err(|e| classify(e, EntityKind::Enrollment, Some(id.get())))
    }
}

/// Fold a transport error into the failure taxonomy, naming the record
/// when the backend reports it missing.
fn classify(err: unidesk_api::Error, kind: EntityKind, id: Option<i64>) -> CoreError {
    match CoreError::from(err) {
        CoreError::NotFound { .. } => CoreError::NotFound {
            entity: kind.to_string(),
            id: id.map(|i| i.to_string()).unwrap_or_default(),
        },
        other => other,
    }
}

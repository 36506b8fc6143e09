// ── Per-entity form buffers ──
//
// Text fields hold what the user typed; blank optional fields are sent as
// absent, never as empty strings.

use chrono::NaiveDate;

use super::modal::EntityForm;
use crate::controller::Controller;
use crate::convert::parse_date;
use crate::error::CoreError;
use crate::model::{
    Course, CourseDraft, CourseId, Department, DepartmentDraft, DepartmentId, Enrollment,
    EnrollmentDraft, EnrollmentId, EnrollmentStatus, Student, StudentDraft, StudentId,
};

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn require(value: &str, field: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::validation(format!("{field} is required")));
    }
    Ok(())
}

// ── Department ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentForm {
    pub name: String,
    pub location: String,
    pub phone: String,
    pub head: String,
}

impl DepartmentForm {
    pub fn to_draft(&self) -> DepartmentDraft {
        DepartmentDraft {
            name: self.name.trim().to_owned(),
            location: optional(&self.location),
            phone: optional(&self.phone),
            head: optional(&self.head),
        }
    }
}

impl EntityForm for DepartmentForm {
    type Id = DepartmentId;
    type Entity = Department;

    fn load(d: &Department) -> Self {
        Self {
            name: d.name.clone(),
            location: d.location.clone().unwrap_or_default(),
            phone: d.phone.clone().unwrap_or_default(),
            head: d.head.clone().unwrap_or_default(),
        }
    }

    fn validate(&self) -> Result<(), CoreError> {
        require(&self.name, "name")
    }

    async fn fetch(controller: &Controller, id: DepartmentId) -> Result<Option<Department>, CoreError> {
        controller.get_department(id).await
    }

    async fn submit(&self, controller: &Controller, editing: Option<DepartmentId>) -> Result<(), CoreError> {
        let draft = self.to_draft();
        match editing {
            Some(id) => controller.update_department(&draft.with_id(id)).await.map(drop),
            None => controller.create_department(&draft).await.map(drop),
        }
    }
}

// ── Student ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// `YYYY-MM-DD`, or blank.
    pub date_of_birth: String,
    pub address: String,
    pub department_id: Option<DepartmentId>,
}

impl StudentForm {
    pub fn to_draft(&self) -> Result<StudentDraft, CoreError> {
        Ok(StudentDraft {
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            phone: optional(&self.phone),
            date_of_birth: self.birth_date()?,
            address: optional(&self.address),
            department_id: self.department_id,
        })
    }

    fn birth_date(&self) -> Result<Option<NaiveDate>, CoreError> {
        match optional(&self.date_of_birth) {
            None => Ok(None),
            Some(raw) => parse_date(&raw)
                .map(Some)
                .ok_or_else(|| CoreError::validation(format!("date of birth {raw:?} is not a date"))),
        }
    }
}

impl EntityForm for StudentForm {
    type Id = StudentId;
    type Entity = Student;

    fn load(s: &Student) -> Self {
        Self {
            first_name: s.first_name.clone(),
            last_name: s.last_name.clone(),
            email: s.email.clone(),
            phone: s.phone.clone().unwrap_or_default(),
            date_of_birth: s
                .date_of_birth
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            address: s.address.clone().unwrap_or_default(),
            department_id: s.department_id(),
        }
    }

    fn validate(&self) -> Result<(), CoreError> {
        require(&self.first_name, "first name")?;
        require(&self.last_name, "last name")?;
        require(&self.email, "email")?;
        self.birth_date().map(drop)
    }

    async fn fetch(controller: &Controller, id: StudentId) -> Result<Option<Student>, CoreError> {
        controller.get_student(id).await
    }

    async fn submit(&self, controller: &Controller, editing: Option<StudentId>) -> Result<(), CoreError> {
        let draft = self.to_draft()?;
        match editing {
            Some(id) => controller.update_student(&draft.with_id(id)).await.map(drop),
            None => controller.create_student(&draft).await.map(drop),
        }
    }
}

// ── Course ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseForm {
    pub name: String,
    pub code: String,
    pub credit: Option<u32>,
    pub description: String,
}

impl CourseForm {
    pub fn to_draft(&self) -> CourseDraft {
        CourseDraft {
            name: self.name.trim().to_owned(),
            code: optional(&self.code),
            credit: self.credit,
            description: optional(&self.description),
        }
    }
}

impl EntityForm for CourseForm {
    type Id = CourseId;
    type Entity = Course;

    fn load(c: &Course) -> Self {
        Self {
            name: c.name.clone(),
            code: c.code.clone().unwrap_or_default(),
            credit: c.credit,
            description: c.description.clone().unwrap_or_default(),
        }
    }

    fn validate(&self) -> Result<(), CoreError> {
        require(&self.name, "name")
    }

    async fn fetch(controller: &Controller, id: CourseId) -> Result<Option<Course>, CoreError> {
        controller.get_course(id).await
    }

    async fn submit(&self, controller: &Controller, editing: Option<CourseId>) -> Result<(), CoreError> {
        let draft = self.to_draft();
        match editing {
            Some(id) => controller.update_course(&draft.with_id(id)).await.map(drop),
            None => controller.create_course(&draft).await.map(drop),
        }
    }
}

// ── Enrollment ──────────────────────────────────────────────────────

/// Student, course and status. Updates from this form send the two
/// references, the status and the id; date and grade are left to the
/// backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrollmentForm {
    pub student_id: Option<StudentId>,
    pub course_id: Option<CourseId>,
    pub status: EnrollmentStatus,
}

impl EnrollmentForm {
    fn references(&self) -> Result<(StudentId, CourseId), CoreError> {
        let student = self
            .student_id
            .ok_or_else(|| CoreError::validation("student is required"))?;
        let course = self
            .course_id
            .ok_or_else(|| CoreError::validation("course is required"))?;
        Ok((student, course))
    }
}

impl EntityForm for EnrollmentForm {
    type Id = EnrollmentId;
    type Entity = Enrollment;

    fn load(e: &Enrollment) -> Self {
        Self {
            student_id: Some(e.student_id),
            course_id: Some(e.course_id),
            status: e.status,
        }
    }

    fn validate(&self) -> Result<(), CoreError> {
        self.references().map(drop)
    }

    async fn fetch(controller: &Controller, id: EnrollmentId) -> Result<Option<Enrollment>, CoreError> {
        controller.get_enrollment(id).await
    }

    async fn submit(&self, controller: &Controller, editing: Option<EnrollmentId>) -> Result<(), CoreError> {
        let (student_id, course_id) = self.references()?;
        match editing {
            Some(id) => {
                let enrollment = Enrollment {
                    id,
                    enrollment_date: None,
                    grade: None,
                    status: self.status,
                    student_id,
                    course_id,
                };
                controller.update_enrollment(&enrollment).await.map(drop)
            }
            None => {
                let draft = EnrollmentDraft {
                    student_id,
                    course_id,
                    status: self.status,
                    grade: None,
                };
                controller.create_enrollment(&draft).await.map(drop)
            }
        }
    }
}

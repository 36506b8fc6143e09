//! Enrollment command handlers.

use tabled::Tabled;

use unidesk_core::views::{EnrollmentForm, EntityForm, StatusBoard};
use unidesk_core::{Controller, CourseId, Enrollment, EnrollmentId, EnrollmentSummary, StudentId};

use crate::cli::{EnrollmentsArgs, EnrollmentsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, status_label};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

/// Shared with the board and dashboard tables.
#[derive(Tabled)]
pub(crate) struct EnrollmentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Student")]
    student: String,
    #[tabled(rename = "Course")]
    course: String,
    #[tabled(rename = "Enrolled")]
    date: String,
    #[tabled(rename = "Grade")]
    grade: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl EnrollmentRow {
    pub(crate) fn new(e: &EnrollmentSummary, color: bool) -> Self {
        let student = e.student_name();
        let course = e.course_name();
        Self {
            id: e.id.to_string(),
            student: if student.is_empty() {
                format!("#{}", e.student.id)
            } else {
                student
            },
            course: if course.is_empty() {
                format!("#{}", e.course.id)
            } else {
                course.to_owned()
            },
            date: e.enrollment_date.format("%Y-%m-%d").to_string(),
            grade: e.grade.map_or_else(|| "-".into(), |g| g.to_string()),
            status: status_label(e.status, color),
        }
    }
}

fn detail(e: &Enrollment) -> String {
    [
        format!("ID:       {}", e.id),
        format!("Student:  #{}", e.student_id),
        format!("Course:   #{}", e.course_id),
        format!(
            "Enrolled: {}",
            e.enrollment_date
                .map_or_else(|| "-".into(), |d| d.format("%Y-%m-%d").to_string())
        ),
        format!(
            "Grade:    {}",
            e.grade.map_or_else(|| "-".into(), |g| g.to_string())
        ),
        format!("Status:   {}", e.status),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: EnrollmentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    match args.command {
        EnrollmentsCommand::List { status } => {
            controller.refresh_enrollments().await?;
            let snap = controller.enrollments_snapshot();
            let wanted = status.map(util::status);
            let selected: Vec<_> = snap
                .iter()
                .filter(|e| wanted.is_none_or(|s| e.status == s))
                .cloned()
                .collect();
            let out = output::render_list(
                &global.format(),
                &selected,
                |e| EnrollmentRow::new(e, color),
                |e| e.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EnrollmentsCommand::Get { id } => {
            let enrollment = controller
                .get_enrollment(EnrollmentId::new(id))
                .await?
                .ok_or_else(|| util::not_found("enrollment", id))?;
            let out = output::render_single(&global.format(), &enrollment, detail, |e| {
                e.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EnrollmentsCommand::Create {
            student,
            course,
            status,
        } => {
            let form = EnrollmentForm {
                student_id: Some(StudentId::new(student)),
                course_id: Some(CourseId::new(course)),
                status: util::status(status),
            };
            form.validate()?;
            form.submit(controller, None).await?;
            output::notice("Enrollment created", global.quiet);
            Ok(())
        }

        EnrollmentsCommand::Update {
            id,
            student,
            course,
            status,
        } => {
            let id = EnrollmentId::new(id);
            let current = controller
                .get_enrollment(id)
                .await?
                .ok_or_else(|| util::not_found("enrollment", id.get()))?;
            let mut form = EnrollmentForm::load(&current);
            if let Some(s) = student {
                form.student_id = Some(StudentId::new(s));
            }
            if let Some(c) = course {
                form.course_id = Some(CourseId::new(c));
            }
            if let Some(s) = status {
                form.status = util::status(s);
            }
            form.validate()?;
            form.submit(controller, Some(id)).await?;
            output::notice("Enrollment updated", global.quiet);
            Ok(())
        }

        EnrollmentsCommand::Move { id, status } => {
            let board = StatusBoard::new(controller.clone());
            let moved = board
                .move_status(EnrollmentId::new(id), util::status(status))
                .await?;
            output::notice(
                &format!("Enrollment {} moved to {}", moved.id, moved.status),
                global.quiet,
            );
            Ok(())
        }

        EnrollmentsCommand::Delete { id } => {
            if !util::confirm(
                &format!("Delete enrollment {id}?"),
                "enrollments delete",
                global.yes,
            )? {
                return Ok(());
            }
            controller.delete_enrollment(EnrollmentId::new(id)).await?;
            output::notice("Enrollment deleted", global.quiet);
            Ok(())
        }
    }
}

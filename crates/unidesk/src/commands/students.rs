//! Student command handlers.

use tabled::Tabled;

use unidesk_core::views::{EntityForm, StudentForm};
use unidesk_core::{Controller, DepartmentId, Student, StudentId};

use crate::cli::{GlobalOpts, StudentFields, StudentsArgs, StudentsCommand};
use crate::error::CliError;
use crate::output::{self, or_dash};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct StudentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Department")]
    department: String,
}

impl From<&Student> for StudentRow {
    fn from(s: &Student) -> Self {
        Self {
            id: s.id.to_string(),
            name: s.full_name(),
            email: s.email.clone(),
            phone: or_dash(s.phone.as_deref()),
            department: department_label(s),
        }
    }
}

fn department_label(s: &Student) -> String {
    match s.department {
        Some(ref d) => d.name.clone().unwrap_or_else(|| format!("#{}", d.id)),
        None => "-".into(),
    }
}

fn detail(s: &Student) -> String {
    [
        format!("ID:            {}", s.id),
        format!("Name:          {}", s.full_name()),
        format!("Email:         {}", s.email),
        format!("Phone:         {}", or_dash(s.phone.as_deref())),
        format!(
            "Date of birth: {}",
            s.date_of_birth
                .map_or_else(|| "-".into(), |d| d.format("%Y-%m-%d").to_string())
        ),
        format!("Address:       {}", or_dash(s.address.as_deref())),
        format!("Department:    {}", department_label(s)),
    ]
    .join("\n")
}

fn apply(fields: StudentFields, form: &mut StudentForm) {
    util::set_if(&mut form.first_name, fields.first_name);
    util::set_if(&mut form.last_name, fields.last_name);
    util::set_if(&mut form.email, fields.email);
    util::set_if(&mut form.phone, fields.phone);
    util::set_if(&mut form.date_of_birth, fields.date_of_birth);
    util::set_if(&mut form.address, fields.address);
    if let Some(dept) = fields.department {
        form.department_id = Some(DepartmentId::new(dept));
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: StudentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        StudentsCommand::List => {
            controller.refresh_students().await?;
            let snap = controller.students_snapshot();
            let out = output::render_list(
                &global.format(),
                &snap,
                |s| StudentRow::from(s.as_ref()),
                |s| s.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        StudentsCommand::Get { id } => {
            let student = controller
                .get_student(StudentId::new(id))
                .await?
                .ok_or_else(|| util::not_found("student", id))?;
            let out = output::render_single(&global.format(), &student, detail, |s| {
                s.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        StudentsCommand::Create { fields } => {
            let mut form = StudentForm::default();
            apply(fields, &mut form);
            form.validate()?;
            form.submit(controller, None).await?;
            output::notice("Student created", global.quiet);
            Ok(())
        }

        StudentsCommand::Update { id, fields } => {
            let id = StudentId::new(id);
            let current = controller
                .get_student(id)
                .await?
                .ok_or_else(|| util::not_found("student", id.get()))?;
            let mut form = StudentForm::load(&current);
            apply(fields, &mut form);
            form.validate()?;
            form.submit(controller, Some(id)).await?;
            output::notice("Student updated", global.quiet);
            Ok(())
        }

        StudentsCommand::Delete { id } => {
            if !util::confirm(
                &format!("Delete student {id}?"),
                "students delete",
                global.yes,
            )? {
                return Ok(());
            }
            controller.delete_student(StudentId::new(id)).await?;
            output::notice("Student deleted", global.quiet);
            Ok(())
        }
    }
}

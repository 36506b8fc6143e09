//! Course command handlers.

use tabled::Tabled;

use unidesk_core::views::{CourseForm, EntityForm};
use unidesk_core::{Controller, Course, CourseId};

use crate::cli::{CourseFields, CoursesArgs, CoursesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, or_dash};

use super::util;

#[derive(Tabled)]
struct CourseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Credit")]
    credit: String,
}

impl From<&Course> for CourseRow {
    fn from(c: &Course) -> Self {
        Self {
            id: c.id.to_string(),
            code: or_dash(c.code.as_deref()),
            name: c.name.clone(),
            credit: c.credit.map_or_else(|| "-".into(), |v| v.to_string()),
        }
    }
}

fn detail(c: &Course) -> String {
    [
        format!("ID:          {}", c.id),
        format!("Name:        {}", c.name),
        format!("Code:        {}", or_dash(c.code.as_deref())),
        format!(
            "Credit:      {}",
            c.credit.map_or_else(|| "-".into(), |v| v.to_string())
        ),
        format!("Description: {}", or_dash(c.description.as_deref())),
    ]
    .join("\n")
}

fn apply(fields: CourseFields, form: &mut CourseForm) {
    util::set_if(&mut form.name, fields.name);
    util::set_if(&mut form.code, fields.code);
    util::set_if(&mut form.description, fields.description);
    if fields.credit.is_some() {
        form.credit = fields.credit;
    }
}

pub async fn handle(
    controller: &Controller,
    args: CoursesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CoursesCommand::List => {
            controller.refresh_courses().await?;
            let snap = controller.courses_snapshot();
            let out = output::render_list(
                &global.format(),
                &snap,
                |c| CourseRow::from(c.as_ref()),
                |c| c.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CoursesCommand::Get { id } => {
            let course = controller
                .get_course(CourseId::new(id))
                .await?
                .ok_or_else(|| util::not_found("course", id))?;
            let out = output::render_single(&global.format(), &course, detail, |c| {
                c.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CoursesCommand::Create { fields } => {
            let mut form = CourseForm::default();
            apply(fields, &mut form);
            form.validate()?;
            form.submit(controller, None).await?;
            output::notice("Course created", global.quiet);
            Ok(())
        }

        CoursesCommand::Update { id, fields } => {
            let id = CourseId::new(id);
            let current = controller
                .get_course(id)
                .await?
                .ok_or_else(|| util::not_found("course", id.get()))?;
            let mut form = CourseForm::load(&current);
            apply(fields, &mut form);
            form.validate()?;
            form.submit(controller, Some(id)).await?;
            output::notice("Course updated", global.quiet);
            Ok(())
        }

        CoursesCommand::Delete { id } => {
            if !util::confirm(&format!("Delete course {id}?"), "courses delete", global.yes)? {
                return Ok(());
            }
            controller.delete_course(CourseId::new(id)).await?;
            output::notice("Course deleted", global.quiet);
            Ok(())
        }
    }
}

//! Department command handlers.

use tabled::Tabled;

use unidesk_core::views::{DepartmentForm, EntityForm};
use unidesk_core::{Controller, Department, DepartmentId};

use crate::cli::{DepartmentFields, DepartmentsArgs, DepartmentsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, or_dash};

use super::util;

#[derive(Tabled)]
struct DepartmentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Head")]
    head: String,
}

impl From<&Department> for DepartmentRow {
    fn from(d: &Department) -> Self {
        Self {
            id: d.id.to_string(),
            name: d.name.clone(),
            location: or_dash(d.location.as_deref()),
            head: or_dash(d.head.as_deref()),
        }
    }
}

fn detail(d: &Department) -> String {
    [
        format!("ID:       {}", d.id),
        format!("Name:     {}", d.name),
        format!("Location: {}", or_dash(d.location.as_deref())),
        format!("Phone:    {}", or_dash(d.phone.as_deref())),
        format!("Head:     {}", or_dash(d.head.as_deref())),
    ]
    .join("\n")
}

fn apply(fields: DepartmentFields, form: &mut DepartmentForm) {
    util::set_if(&mut form.name, fields.name);
    util::set_if(&mut form.location, fields.location);
    util::set_if(&mut form.phone, fields.phone);
    util::set_if(&mut form.head, fields.head);
}

pub async fn handle(
    controller: &Controller,
    args: DepartmentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DepartmentsCommand::List => {
            controller.refresh_departments().await?;
            let snap = controller.departments_snapshot();
            let out = output::render_list(
                &global.format(),
                &snap,
                |d| DepartmentRow::from(d.as_ref()),
                |d| d.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DepartmentsCommand::Get { id } => {
            let department = controller
                .get_department(DepartmentId::new(id))
                .await?
                .ok_or_else(|| util::not_found("department", id))?;
            let out = output::render_single(&global.format(), &department, detail, |d| {
                d.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DepartmentsCommand::Create { fields } => {
            let mut form = DepartmentForm::default();
            apply(fields, &mut form);
            form.validate()?;
            form.submit(controller, None).await?;
            output::notice("Department created", global.quiet);
            Ok(())
        }

        DepartmentsCommand::Update { id, fields } => {
            let id = DepartmentId::new(id);
            let current = controller
                .get_department(id)
                .await?
                .ok_or_else(|| util::not_found("department", id.get()))?;
            let mut form = DepartmentForm::load(&current);
            apply(fields, &mut form);
            form.validate()?;
            form.submit(controller, Some(id)).await?;
            output::notice("Department updated", global.quiet);
            Ok(())
        }

        DepartmentsCommand::Delete { id } => {
            if !util::confirm(
                &format!("Delete department {id}?"),
                "departments delete",
                global.yes,
            )? {
                return Ok(());
            }
            controller.delete_department(DepartmentId::new(id)).await?;
            output::notice("Department deleted", global.quiet);
            Ok(())
        }
    }
}

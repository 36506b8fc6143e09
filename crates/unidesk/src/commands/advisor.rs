//! AI advisor command handlers.

use tabled::Tabled;

use unidesk_core::{Controller, StudentId, StudyPlanItem};

use crate::cli::{AdvisorArgs, AdvisorCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct PlanRow {
    #[tabled(rename = "Suggestion")]
    title: String,
    #[tabled(rename = "Why")]
    reason: String,
}

impl From<&StudyPlanItem> for PlanRow {
    fn from(item: &StudyPlanItem) -> Self {
        Self {
            title: item.title.clone(),
            reason: item.reason.clone(),
        }
    }
}

pub async fn handle(
    controller: &Controller,
    args: AdvisorArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let advisor = controller.advisor()?;
    tracing::debug!(model = advisor.model(), "advisor ready");

    match args.command {
        AdvisorCommand::Ask { prompt } => {
            let answer = advisor.try_advise(&prompt.join(" ")).await?;
            let out = output::render_single(&global.format(), &answer, String::clone, String::clone);
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AdvisorCommand::Plan { student_id } => {
            // The plan is built from the student's completed enrollments.
            controller.refresh_students().await?;
            controller.refresh_enrollments().await?;
            let plan = advisor
                .try_plan_for_student(controller.store(), StudentId::new(student_id))
                .await?;
            let out = output::render_list(&global.format(), &plan, |item| PlanRow::from(item), |item| {
                item.title.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

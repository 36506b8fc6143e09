//! Dashboard: totals across all four containers plus recent enrollments.

use unidesk_core::Controller;
use unidesk_core::views::Dashboard;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::enrollments::EnrollmentRow;

fn detail(d: &Dashboard, color: bool) -> String {
    let c = &d.counts;
    let mut text = [
        format!("Students:           {}", c.students),
        format!("Courses:            {}", c.courses),
        format!("Departments:        {}", c.departments),
        format!("Enrollments:        {}", c.enrollments),
        format!("Active enrollments: {}", c.active_enrollments),
    ]
    .join("\n");
    if !d.recent_enrollments.is_empty() {
        let rows: Vec<_> = d
            .recent_enrollments
            .iter()
            .map(|e| EnrollmentRow::new(e, color))
            .collect();
        text.push_str("\n\nRecent enrollments\n");
        text.push_str(&output::render_table(&rows));
    }
    text
}

/// `key=value` per counter.
fn plain(d: &Dashboard) -> String {
    let c = &d.counts;
    format!(
        "students={}\ncourses={}\ndepartments={}\nenrollments={}\nactive_enrollments={}",
        c.students, c.courses, c.departments, c.enrollments, c.active_enrollments
    )
}

pub async fn handle(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    let report = controller.load_initial().await;
    if let Some((_, first)) = report.failures.first() {
        if report.loaded.is_empty() {
            return Err(first.clone().into());
        }
        for (kind, err) in &report.failures {
            output::notice(&format!("warning: {kind} not loaded: {err}"), global.quiet);
        }
    }

    let color = output::should_color(&global.color);
    let dashboard = Dashboard::from_store(controller.store());
    let out = output::render_single(
        &global.format(),
        &dashboard,
        |d| detail(d, color),
        plain,
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

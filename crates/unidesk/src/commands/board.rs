//! Status board: enrollments grouped into one column per status.

use unidesk_core::Controller;
use unidesk_core::views::{BoardColumn, StatusBoard};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, status_label};

use super::enrollments::EnrollmentRow;

fn render_columns(columns: &[BoardColumn], color: bool) -> String {
    columns
        .iter()
        .map(|col| {
            let heading = format!(
                "{} ({})",
                status_label(col.status, color),
                col.cards.len()
            );
            if col.cards.is_empty() {
                return format!("{heading}\n  (empty)");
            }
            let rows: Vec<_> = col
                .cards
                .iter()
                .map(|e| EnrollmentRow::new(e, color))
                .collect();
            format!("{heading}\n{}", output::render_table(&rows))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// `STATUS<TAB>id` for every card.
fn plain(columns: &[BoardColumn]) -> String {
    columns
        .iter()
        .flat_map(|col| {
            col.cards
                .iter()
                .map(move |e| format!("{}\t{}", col.status, e.id))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn handle(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    controller.refresh_enrollments().await?;
    let color = output::should_color(&global.color);
    let columns = StatusBoard::new(controller.clone()).columns();
    let out = output::render_single(
        &global.format(),
        columns.as_slice(),
        |cols| render_columns(cols, color),
        plain,
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

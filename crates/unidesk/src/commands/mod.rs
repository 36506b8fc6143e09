//! Command dispatch: bridges CLI args -> controller calls -> output formatting.

pub mod advisor;
pub mod board;
pub mod config_cmd;
pub mod courses;
pub mod dashboard;
pub mod departments;
pub mod enrollments;
pub mod students;
pub mod util;

use unidesk_core::Controller;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    controller: &Controller,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Students(args) => students::handle(controller, args, global).await,
        Command::Courses(args) => courses::handle(controller, args, global).await,
        Command::Departments(args) => departments::handle(controller, args, global).await,
        Command::Enrollments(args) => enrollments::handle(controller, args, global).await,
        Command::Board => board::handle(controller, global).await,
        Command::Dashboard => dashboard::handle(controller, global).await,
        Command::Advisor(args) => advisor::handle(controller, args, global).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::validation(
            "command",
            "handled before a backend connection is made",
        )),
    }
}

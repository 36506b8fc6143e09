//! Shared helpers for command handlers.

use std::io::IsTerminal;

use unidesk_core::EnrollmentStatus;

use crate::cli::StatusArg;
use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal there is nobody to ask, so the operation is refused
/// instead of hanging on stdin.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))
}

pub fn not_found(resource_type: &str, id: i64) -> CliError {
    CliError::NotFound {
        resource_type: resource_type.into(),
        identifier: id.to_string(),
        list_command: format!("{resource_type}s list"),
    }
}

pub fn status(arg: StatusArg) -> EnrollmentStatus {
    match arg {
        StatusArg::Active => EnrollmentStatus::Active,
        StatusArg::Completed => EnrollmentStatus::Completed,
        StatusArg::Failed => EnrollmentStatus::Failed,
        StatusArg::Dropped => EnrollmentStatus::Dropped,
        StatusArg::Withdrawn => EnrollmentStatus::Withdrawn,
    }
}

/// Overwrite `target` when a flag was given.
pub fn set_if(target: &mut String, value: Option<String>) {
    if let Some(v) = value {
        *target = v;
    }
}

// ── Status board ──
//
// Enrollments as five columns, one per status, in board order. Reads the
// store's partition; moves go through the controller.

use std::sync::Arc;

use serde::Serialize;

use crate::controller::Controller;
use crate::error::CoreError;
use crate::model::{Enrollment, EnrollmentId, EnrollmentStatus, EnrollmentSummary};

/// One board column.
#[derive(Debug, Clone, Serialize)]
pub struct BoardColumn {
    pub status: EnrollmentStatus,
    pub cards: Vec<Arc<EnrollmentSummary>>,
}

impl BoardColumn {
    pub fn title(&self) -> &'static str {
        match self.status {
            EnrollmentStatus::Active => "Active",
            EnrollmentStatus::Completed => "Completed",
            EnrollmentStatus::Failed => "Failed",
            EnrollmentStatus::Dropped => "Dropped",
            EnrollmentStatus::Withdrawn => "Withdrawn",
        }
    }
}

/// Kanban view over the enrollments container.
pub struct StatusBoard {
    controller: Controller,
}

impl StatusBoard {
    pub fn new(controller: Controller) -> Self {
        Self { controller }
    }

    /// Current columns, always five, possibly empty.
    pub fn columns(&self) -> Vec<BoardColumn> {
        self.controller
            .store()
            .status_partition()
            .iter()
            .map(|(status, cards)| BoardColumn {
                status,
                cards: cards.to_vec(),
            })
            .collect()
    }

    pub fn column(&self, status: EnrollmentStatus) -> Vec<Arc<EnrollmentSummary>> {
        self.controller
            .store()
            .status_partition()
            .group(status)
            .to_vec()
    }

    /// One-click moves offered on a card in `status`.
    pub fn allowed_moves(status: EnrollmentStatus) -> &'static [EnrollmentStatus] {
        status.quick_moves()
    }

    /// Move a card. Any status may be targeted; the quick moves are only
    /// what the board offers.
    pub async fn move_status(
        &self,
        id: EnrollmentId,
        status: EnrollmentStatus,
    ) -> Result<Enrollment, CoreError> {
        self.controller.update_enrollment_status(id, status).await
    }
}

// ── Derived aggregates ──
//
// Pure functions of container contents. The store recomputes them in the
// same call that swaps a container, so a read after any completed
// mutation never sees a stale count.

use std::sync::Arc;

use serde::Serialize;
use strum::IntoEnumIterator;

use crate::model::{EnrollmentStatus, EnrollmentSummary};

/// Record counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EntityCounts {
    pub students: usize,
    pub courses: usize,
    pub departments: usize,
    pub enrollments: usize,
    pub active_enrollments: usize,
}

/// Enrollments grouped by status, one group per status in board order.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusPartition {
    groups: Vec<(EnrollmentStatus, Vec<Arc<EnrollmentSummary>>)>,
}

impl StatusPartition {
    pub fn from_enrollments(enrollments: &[Arc<EnrollmentSummary>]) -> Self {
        let groups = EnrollmentStatus::iter()
            .map(|status| {
                let members = enrollments
                    .iter()
                    .filter(|e| e.status == status)
                    .cloned()
                    .collect();
                (status, members)
            })
            .collect();
        Self { groups }
    }

    /// Members of one status group, in container order.
    pub fn group(&self, status: EnrollmentStatus) -> &[Arc<EnrollmentSummary>] {
        self.groups
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, members)| members.as_slice())
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EnrollmentStatus, &[Arc<EnrollmentSummary>])> {
        self.groups.iter().map(|(s, m)| (*s, m.as_slice()))
    }
}

impl Default for StatusPartition {
    fn default() -> Self {
        Self::from_enrollments(&[])
    }
}

pub(crate) fn count_status(enrollments: &[Arc<EnrollmentSummary>], status: EnrollmentStatus) -> usize {
    enrollments.iter().filter(|e| e.status == status).count()
}

// ── Dashboard ──

use std::sync::Arc;

use serde::Serialize;

use crate::model::EnrollmentSummary;
use crate::store::{DataStore, EntityCounts};

/// Number of enrollments listed under "recent".
pub const RECENT_LIMIT: usize = 5;

/// Point-in-time dashboard: totals plus the first few enrollments in
/// container order.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    #[serde(flatten)]
    pub counts: EntityCounts,
    pub recent_enrollments: Vec<Arc<EnrollmentSummary>>,
}

impl Dashboard {
    pub fn from_store(store: &DataStore) -> Self {
        Self {
            counts: store.counts(),
            recent_enrollments: store
                .enrollments_snapshot()
                .iter()
                .take(RECENT_LIMIT)
                .cloned()
                .collect(),
        }
    }
}

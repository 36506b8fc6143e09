//! Reactive data layer between `unidesk-api` and its consumers (the CLI).
//!
//! - **[`Gateway`]**: typed facade over the records REST client. One round
//!   trip per call; transport failures are classified into [`CoreError`].
//!
//! - **[`DataStore`]**: the four containers (students, courses,
//!   departments, enrollments) as `watch`-backed snapshots, plus derived
//!   counts and the per-status partition, recomputed on every swap.
//!
//! - **[`Controller`]**: the only writer of the store. Refresh, create,
//!   update and delete per record kind, [`load_initial()`](Controller::load_initial),
//!   and enrollment status moves.
//!
//! - **[`Advisor`]**: free-text academic advice and study-plan suggestions
//!   from a generative model, degrading to empty answers on failure.
//!
//! - **[`views`]**: form modals, the status board and the dashboard.

pub mod advisor;
pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod gateway;
pub mod model;
pub mod store;
pub mod stream;
pub mod views;

// ── Primary re-exports ──────────────────────────────────────────────
pub use advisor::{Advisor, StudyPlanItem};
pub use config::{AdvisorConfig, ClientConfig, DEFAULT_API_URL, TlsVerification};
pub use controller::{Controller, LoadReport};
pub use error::CoreError;
pub use gateway::Gateway;
pub use store::{DataStore, EntityCounts, StatusPartition, StoreFailure};
pub use stream::{EntityStream, Snapshot};

pub use model::{
    Course, CourseDraft, CourseId, CourseSummary, Department, DepartmentDraft, DepartmentId,
    DepartmentSummary, Enrollment, EnrollmentDraft, EnrollmentId, EnrollmentStatus,
    EnrollmentSummary, EntityKind, Student, StudentDraft, StudentId, StudentSummary,
};

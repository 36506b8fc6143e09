// ── View controllers ──
//
// Per-view state kept outside any UI toolkit: form buffers, modal
// visibility, the status board and the dashboard.

mod board;
mod dashboard;
mod forms;
mod modal;

pub use board::{BoardColumn, StatusBoard};
pub use dashboard::{Dashboard, RECENT_LIMIT};
pub use forms::{CourseForm, DepartmentForm, EnrollmentForm, StudentForm};
pub use modal::{EntityForm, FormModal};

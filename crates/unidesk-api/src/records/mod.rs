// Records backend client (students, courses, departments, enrollments).

mod client;
pub mod types;

pub use client::RecordsClient;

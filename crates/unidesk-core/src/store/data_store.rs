// ── Central reactive data store ──
//
// Client-side copies of the four record kinds plus the aggregates derived
// from them. Only the `Controller` writes; everyone else reads snapshots
// or subscribes.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use super::aggregate::{EntityCounts, StatusPartition, count_status};
use super::collection::EntityCollection;
use crate::error::CoreError;
use crate::model::{
    Course, CourseId, Department, DepartmentId, EnrollmentId, EnrollmentStatus,
    EnrollmentSummary, EntityKind, Student, StudentId,
};
use crate::stream::EntityStream;

/// The most recent failure the store swallowed or surfaced.
#[derive(Debug, Clone)]
pub struct StoreFailure {
    pub kind: EntityKind,
    pub operation: &'static str,
    pub error: CoreError,
    pub at: DateTime<Utc>,
}

/// Reactive store for all record kinds.
///
/// Each container is swapped atomically. Aggregates are recomputed
/// synchronously after every swap, before the writing call returns.
pub struct DataStore {
    pub(crate) students: EntityCollection<Student>,
    pub(crate) courses: EntityCollection<Course>,
    pub(crate) departments: EntityCollection<Department>,
    pub(crate) enrollments: EntityCollection<EnrollmentSummary>,
    pub(crate) counts: watch::Sender<EntityCounts>,
    pub(crate) partition: watch::Sender<Arc<StatusPartition>>,
    pub(crate) last_refresh: watch::Sender<HashMap<EntityKind, DateTime<Utc>>>,
    pub(crate) last_failure: watch::Sender<Option<StoreFailure>>,
}

impl DataStore {
    pub fn new() -> Self {
        let (counts, _) = watch::channel(EntityCounts::default());
        let (partition, _) = watch::channel(Arc::new(StatusPartition::default()));
        let (last_refresh, _) = watch::channel(HashMap::new());
        let (last_failure, _) = watch::channel(None);

        Self {
            students: EntityCollection::new(),
            courses: EntityCollection::new(),
            departments: EntityCollection::new(),
            enrollments: EntityCollection::new(),
            counts,
            partition,
            last_refresh,
            last_failure,
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn students_snapshot(&self) -> Arc<Vec<Arc<Student>>> {
        self.students.snapshot()
    }

    pub fn courses_snapshot(&self) -> Arc<Vec<Arc<Course>>> {
        self.courses.snapshot()
    }

    pub fn departments_snapshot(&self) -> Arc<Vec<Arc<Department>>> {
        self.departments.snapshot()
    }

    pub fn enrollments_snapshot(&self) -> Arc<Vec<Arc<EnrollmentSummary>>> {
        self.enrollments.snapshot()
    }

    // ── Single-entity lookups ────────────────────────────────────────

    pub fn student_by_id(&self, id: StudentId) -> Option<Arc<Student>> {
        self.students.get(id)
    }

    pub fn course_by_id(&self, id: CourseId) -> Option<Arc<Course>> {
        self.courses.get(id)
    }

    pub fn department_by_id(&self, id: DepartmentId) -> Option<Arc<Department>> {
        self.departments.get(id)
    }

    pub fn enrollment_by_id(&self, id: EnrollmentId) -> Option<Arc<EnrollmentSummary>> {
        self.enrollments.get(id)
    }

    // ── Aggregates ───────────────────────────────────────────────────

    pub fn counts(&self) -> EntityCounts {
        *self.counts.borrow()
    }

    pub fn total_students(&self) -> usize {
        self.counts().students
    }

    pub fn total_courses(&self) -> usize {
        self.counts().courses
    }

    pub fn total_departments(&self) -> usize {
        self.counts().departments
    }

    pub fn total_enrollments(&self) -> usize {
        self.counts().enrollments
    }

    pub fn active_enrollments(&self) -> usize {
        self.counts().active_enrollments
    }

    pub fn status_partition(&self) -> Arc<StatusPartition> {
        self.partition.borrow().clone()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_students(&self) -> EntityStream<Student> {
        EntityStream::new(self.students.subscribe())
    }

    pub fn subscribe_courses(&self) -> EntityStream<Course> {
        EntityStream::new(self.courses.subscribe())
    }

    pub fn subscribe_departments(&self) -> EntityStream<Department> {
        EntityStream::new(self.departments.subscribe())
    }

    pub fn subscribe_enrollments(&self) -> EntityStream<EnrollmentSummary> {
        EntityStream::new(self.enrollments.subscribe())
    }

    pub fn subscribe_counts(&self) -> watch::Receiver<EntityCounts> {
        self.counts.subscribe()
    }

    pub fn subscribe_partition(&self) -> watch::Receiver<Arc<StatusPartition>> {
        self.partition.subscribe()
    }

    // ── Metadata ─────────────────────────────────────────────────────

    pub fn last_refresh(&self, kind: EntityKind) -> Option<DateTime<Utc>> {
        self.last_refresh.borrow().get(&kind).copied()
    }

    pub fn last_failure(&self) -> Option<StoreFailure> {
        self.last_failure.borrow().clone()
    }

    /// Version of one container; bumps on every swap.
    pub fn version(&self, kind: EntityKind) -> u64 {
        match kind {
            EntityKind::Student => self.students.version(),
            EntityKind::Course => self.courses.version(),
            EntityKind::Department => self.departments.version(),
            EntityKind::Enrollment => self.enrollments.version(),
        }
    }

    // ── Writes (controller only) ─────────────────────────────────────

    pub(crate) fn replace_students(&self, items: Vec<Student>) {
        self.students.replace(items);
        self.after_write(EntityKind::Student);
    }

    pub(crate) fn replace_courses(&self, items: Vec<Course>) {
        self.courses.replace(items);
        self.after_write(EntityKind::Course);
    }

    pub(crate) fn replace_departments(&self, items: Vec<Department>) {
        self.departments.replace(items);
        self.after_write(EntityKind::Department);
    }

    pub(crate) fn replace_enrollments(&self, items: Vec<EnrollmentSummary>) {
        self.enrollments.replace(items);
        self.after_write(EntityKind::Enrollment);
    }

    pub(crate) fn upsert_department(&self, department: Department) {
        self.departments.upsert(department);
        self.after_write(EntityKind::Department);
    }

    pub(crate) fn remove_student(&self, id: StudentId) {
        if self.students.remove(id).is_some() {
            self.after_write(EntityKind::Student);
        }
    }

    pub(crate) fn remove_course(&self, id: CourseId) {
        if self.courses.remove(id).is_some() {
            self.after_write(EntityKind::Course);
        }
    }

    pub(crate) fn remove_department(&self, id: DepartmentId) {
        if self.departments.remove(id).is_some() {
            self.after_write(EntityKind::Department);
        }
    }

    pub(crate) fn remove_enrollment(&self, id: EnrollmentId) {
        if self.enrollments.remove(id).is_some() {
            self.after_write(EntityKind::Enrollment);
        }
    }

    pub(crate) fn mark_refreshed(&self, kind: EntityKind) {
        self.last_refresh.send_modify(|map| {
            map.insert(kind, Utc::now());
        });
    }

    pub(crate) fn record_failure(&self, kind: EntityKind, operation: &'static str, error: &CoreError) {
        self.last_failure.send_replace(Some(StoreFailure {
            kind,
            operation,
            error: error.clone(),
            at: Utc::now(),
        }));
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn after_write(&self, kind: EntityKind) {
        let enrollments = self.enrollments.snapshot();
        let next = EntityCounts {
            students: self.students.len(),
            courses: self.courses.len(),
            departments: self.departments.len(),
            enrollments: enrollments.len(),
            active_enrollments: count_status(&enrollments, EnrollmentStatus::Active),
        };
        self.counts.send_replace(next);

        if kind == EntityKind::Enrollment {
            self.partition
                .send_replace(Arc::new(StatusPartition::from_enrollments(&enrollments)));
        }
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{CourseSummary, StudentSummary};
    use chrono::NaiveDate;

    fn enrollment(id: i64, status: EnrollmentStatus) -> EnrollmentSummary {
        EnrollmentSummary {
            id: EnrollmentId::new(id),
            enrollment_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            grade: None,
            status,
            student: StudentSummary {
                id: StudentId::new(1),
                first_name: Some("Ada".into()),
                last_name: Some("Lovelace".into()),
            },
            course: CourseSummary {
                id: CourseId::new(1),
                name: Some("Analysis".into()),
            },
        }
    }

    #[test]
    fn aggregates_follow_every_write() {
        let store = DataStore::new();
        store.replace_enrollments(vec![
            enrollment(1, EnrollmentStatus::Active),
            enrollment(2, EnrollmentStatus::Active),
            enrollment(3, EnrollmentStatus::Dropped),
        ]);
        assert_eq!(store.active_enrollments(), 2);
        assert_eq!(store.total_enrollments(), 3);
        assert_eq!(
            store.status_partition().group(EnrollmentStatus::Dropped).len(),
            1
        );

        store.remove_enrollment(EnrollmentId::new(1));
        assert_eq!(store.active_enrollments(), 1);
        assert_eq!(
            store.status_partition().group(EnrollmentStatus::Active).len(),
            1
        );
    }

    #[test]
    fn department_upsert_updates_count() {
        let store = DataStore::new();
        store.upsert_department(Department {
            id: DepartmentId::new(1),
            name: "Physics".into(),
            location: None,
            phone: None,
            head: None,
        });
        assert_eq!(store.total_departments(), 1);
        assert_eq!(
            store.department_by_id(DepartmentId::new(1)).unwrap().name,
            "Physics"
        );
    }

    #[test]
    fn failures_are_recorded() {
        let store = DataStore::new();
        assert!(store.last_failure().is_none());

        store.record_failure(
            EntityKind::Course,
            "refresh",
            &CoreError::decode("bad body"),
        );
        let failure = store.last_failure().unwrap();
        assert_eq!(failure.kind, EntityKind::Course);
        assert_eq!(failure.operation, "refresh");
    }
}

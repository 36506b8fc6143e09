// ── Controller ──
//
// The single writer of the DataStore. Every mutation is a gateway round
// trip followed by a container update; failures leave the containers as
// they were, get logged, and are recorded on the store.
//
// Operations on the same container are not serialized. A delete and a
// refresh issued back to back race, and whichever resolves last decides
// the container's content.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use unidesk_api::RecordsClient;

use crate::advisor::Advisor;
use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::gateway::Gateway;
use crate::model::{
    Course, CourseDraft, CourseId, Department, DepartmentDraft, DepartmentId, Enrollment,
    EnrollmentDraft, EnrollmentId, EnrollmentStatus, EnrollmentSummary, EntityKind, Student,
    StudentDraft, StudentId,
};
use crate::store::{DataStore, EntityCounts, StatusPartition};
use crate::stream::EntityStream;

// ── LoadReport ───────────────────────────────────────────────────

/// Outcome of [`Controller::load_initial`]: which kinds failed and why.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: Vec<EntityKind>,
    pub failures: Vec<(EntityKind, CoreError)>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

// ── Controller ───────────────────────────────────────────────────

/// Command surface over the store.
///
/// Cheaply cloneable via `Arc<ControllerInner>`.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    config: ClientConfig,
    store: Arc<DataStore>,
    gateway: Gateway,
}

impl Controller {
    /// Build the HTTP client and an empty store. Nothing is fetched until
    /// a refresh or [`load_initial()`](Self::load_initial).
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let client = RecordsClient::new(config.api_url.as_str(), &config.transport())?;
        Ok(Self {
            inner: Arc::new(ControllerInner {
                config,
                store: Arc::new(DataStore::new()),
                gateway: Gateway::new(client),
            }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Access the underlying DataStore.
    pub fn store(&self) -> &Arc<DataStore> {
        &self.inner.store
    }

    pub fn gateway(&self) -> &Gateway {
        &self.inner.gateway
    }

    /// Build an advisor from the configured AI settings.
    pub fn advisor(&self) -> Result<Advisor, CoreError> {
        let settings = self
            .inner
            .config
            .advisor
            .as_ref()
            .ok_or_else(|| CoreError::AiUnavailable {
                message: "no AI API key is configured".into(),
            })?;
        Advisor::new(settings, &self.inner.config.transport())
    }

    // ── Loading ──────────────────────────────────────────────────

    /// Refresh every container in dependency order: departments, courses,
    /// students, enrollments. Each refresh finishes before the next starts;
    /// failures are collected instead of aborting.
    pub async fn load_initial(&self) -> LoadReport {
        let mut report = LoadReport::default();
        for kind in EntityKind::LOAD_ORDER {
            match self.refresh(kind).await {
                Ok(()) => report.loaded.push(kind),
                Err(e) => report.failures.push((kind, e)),
            }
        }
        info!(
            loaded = report.loaded.len(),
            failed = report.failures.len(),
            "initial load finished"
        );
        report
    }

    /// Re-fetch one container and swap it in.
    pub async fn refresh(&self, kind: EntityKind) -> Result<(), CoreError> {
        match kind {
            EntityKind::Student => self.refresh_students().await,
            EntityKind::Course => self.refresh_courses().await,
            EntityKind::Department => self.refresh_departments().await,
            EntityKind::Enrollment => self.refresh_enrollments().await,
        }
    }

    pub async fn refresh_students(&self) -> Result<(), CoreError> {
        let gateway = &self.inner.gateway;
        let items = self
            .track(EntityKind::Student, "refresh", gateway.list_students())
            .await?;
        debug!(count = items.len(), "students refreshed");
        self.inner.store.replace_students(items);
        self.inner.store.mark_refreshed(EntityKind::Student);
        Ok(())
    }

    pub async fn refresh_courses(&self) -> Result<(), CoreError> {
        let gateway = &self.inner.gateway;
        let items = self
            .track(EntityKind::Course, "refresh", gateway.list_courses())
            .await?;
        debug!(count = items.len(), "courses refreshed");
        self.inner.store.replace_courses(items);
        self.inner.store.mark_refreshed(EntityKind::Course);
        Ok(())
    }

    pub async fn refresh_departments(&self) -> Result<(), CoreError> {
        let gateway = &self.inner.gateway;
        let items = self
            .track(EntityKind::Department, "refresh", gateway.list_departments())
            .await?;
        debug!(count = items.len(), "departments refreshed");
        self.inner.store.replace_departments(items);
        self.inner.store.mark_refreshed(EntityKind::Department);
        Ok(())
    }

    pub async fn refresh_enrollments(&self) -> Result<(), CoreError> {
        let gateway = &self.inner.gateway;
        let items = self
            .track(EntityKind::Enrollment, "refresh", gateway.list_enrollments())
            .await?;
        debug!(count = items.len(), "enrollments refreshed");
        self.inner.store.replace_enrollments(items);
        self.inner.store.mark_refreshed(EntityKind::Enrollment);
        Ok(())
    }

    // ── Single-item fetches ──────────────────────────────────────
    //
    // A missing record is `Ok(None)`; the store is not touched.

    pub async fn get_student(&self, id: StudentId) -> Result<Option<Student>, CoreError> {
        let gateway = &self.inner.gateway;
        self.fetch_one(EntityKind::Student, gateway.get_student(id))
            .await
    }

    pub async fn get_course(&self, id: CourseId) -> Result<Option<Course>, CoreError> {
        let gateway = &self.inner.gateway;
        self.fetch_one(EntityKind::Course, gateway.get_course(id))
            .await
    }

    pub async fn get_department(&self, id: DepartmentId) -> Result<Option<Department>, CoreError> {
        let gateway = &self.inner.gateway;
        self.fetch_one(EntityKind::Department, gateway.get_department(id))
            .await
    }

    pub async fn get_enrollment(&self, id: EnrollmentId) -> Result<Option<Enrollment>, CoreError> {
        let gateway = &self.inner.gateway;
        self.fetch_one(EntityKind::Enrollment, gateway.get_enrollment(id))
            .await
    }

    // ── Students ─────────────────────────────────────────────────

    /// Create a student and re-fetch the container. The echoed record is
    /// returned when the backend sends one.
    pub async fn create_student(
        &self,
        draft: &StudentDraft,
    ) -> Result<Option<Student>, CoreError> {
        let gateway = &self.inner.gateway;
        let created = self
            .track(EntityKind::Student, "create", gateway.create_student(draft))
            .await?;
        info!(id = ?created.as_ref().map(|s| s.id), "student created");
        self.refresh_after_write(EntityKind::Student).await;
        Ok(created)
    }

    pub async fn update_student(&self, student: &Student) -> Result<Student, CoreError> {
        let gateway = &self.inner.gateway;
        let saved = self
            .track(EntityKind::Student, "update", gateway.update_student(student))
            .await?;
        self.refresh_after_write(EntityKind::Student).await;
        Ok(saved)
    }

    pub async fn delete_student(&self, id: StudentId) -> Result<(), CoreError> {
        let gateway = &self.inner.gateway;
        self.track(EntityKind::Student, "delete", gateway.delete_student(id))
            .await?;
        self.inner.store.remove_student(id);
        Ok(())
    }

    // ── Courses ──────────────────────────────────────────────────

    pub async fn create_course(&self, draft: &CourseDraft) -> Result<Option<Course>, CoreError> {
        let gateway = &self.inner.gateway;
        let created = self
            .track(EntityKind::Course, "create", gateway.create_course(draft))
            .await?;
        info!(id = ?created.as_ref().map(|c| c.id), "course created");
        self.refresh_after_write(EntityKind::Course).await;
        Ok(created)
    }

    pub async fn update_course(&self, course: &Course) -> Result<Course, CoreError> {
        let gateway = &self.inner.gateway;
        let saved = self
            .track(EntityKind::Course, "update", gateway.update_course(course))
            .await?;
        self.refresh_after_write(EntityKind::Course).await;
        Ok(saved)
    }

    pub async fn delete_course(&self, id: CourseId) -> Result<(), CoreError> {
        let gateway = &self.inner.gateway;
        self.track(EntityKind::Course, "delete", gateway.delete_course(id))
            .await?;
        self.inner.store.remove_course(id);
        Ok(())
    }

    // ── Departments ──────────────────────────────────────────────
    //
    // Departments merge the server's answer into the container instead
    // of re-fetching the list, unless the answer was empty.

    pub async fn create_department(
        &self,
        draft: &DepartmentDraft,
    ) -> Result<Option<Department>, CoreError> {
        let gateway = &self.inner.gateway;
        let created = self
            .track(
                EntityKind::Department,
                "create",
                gateway.create_department(draft),
            )
            .await?;
        match created {
            Some(ref department) => {
                info!(id = %department.id, "department created");
                self.inner.store.upsert_department(department.clone());
            }
            // Nothing to merge without an id.
            None => self.refresh_after_write(EntityKind::Department).await,
        }
        Ok(created)
    }

    pub async fn update_department(
        &self,
        department: &Department,
    ) -> Result<Department, CoreError> {
        let gateway = &self.inner.gateway;
        let saved = self
            .track(
                EntityKind::Department,
                "update",
                gateway.update_department(department),
            )
            .await?;
        self.inner.store.upsert_department(saved.clone());
        Ok(saved)
    }

    pub async fn delete_department(&self, id: DepartmentId) -> Result<(), CoreError> {
        let gateway = &self.inner.gateway;
        self.track(
            EntityKind::Department,
            "delete",
            gateway.delete_department(id),
        )
        .await?;
        self.inner.store.remove_department(id);
        Ok(())
    }

    // ── Enrollments ──────────────────────────────────────────────

    /// Create an enrollment dated now. The echoed record is returned when
    /// the backend sends one the client can read.
    pub async fn create_enrollment(
        &self,
        draft: &EnrollmentDraft,
    ) -> Result<Option<Enrollment>, CoreError> {
        let gateway = &self.inner.gateway;
        let created = self
            .track(
                EntityKind::Enrollment,
                "create",
                gateway.create_enrollment(draft),
            )
            .await?;
        self.refresh_after_write(EntityKind::Enrollment).await;
        Ok(created)
    }

    pub async fn update_enrollment(&self, enrollment: &Enrollment) -> Result<Enrollment, CoreError> {
        let gateway = &self.inner.gateway;
        let saved = self
            .track(
                EntityKind::Enrollment,
                "update",
                gateway.update_enrollment(enrollment),
            )
            .await?;
        self.refresh_after_write(EntityKind::Enrollment).await;
        Ok(saved)
    }

    /// Move an enrollment to `status`: fetch the full record, change its
    /// status, and submit it back as a full replacement.
    pub async fn update_enrollment_status(
        &self,
        id: EnrollmentId,
        status: EnrollmentStatus,
    ) -> Result<Enrollment, CoreError> {
        let gateway = &self.inner.gateway;
        let mut enrollment = self
            .track(
                EntityKind::Enrollment,
                "update_status",
                gateway.get_enrollment(id),
            )
            .await?;
        debug!(id = %id, from = %enrollment.status, to = %status, "moving enrollment");
        enrollment.status = status;
        self.update_enrollment(&enrollment).await
    }

    pub async fn delete_enrollment(&self, id: EnrollmentId) -> Result<(), CoreError> {
        let gateway = &self.inner.gateway;
        self.track(
            EntityKind::Enrollment,
            "delete",
            gateway.delete_enrollment(id),
        )
        .await?;
        self.inner.store.remove_enrollment(id);
        Ok(())
    }

    // ── Snapshots & subscriptions ────────────────────────────────

    pub fn students_snapshot(&self) -> Arc<Vec<Arc<Student>>> {
        self.inner.store.students_snapshot()
    }

    pub fn courses_snapshot(&self) -> Arc<Vec<Arc<Course>>> {
        self.inner.store.courses_snapshot()
    }

    pub fn departments_snapshot(&self) -> Arc<Vec<Arc<Department>>> {
        self.inner.store.departments_snapshot()
    }

    pub fn enrollments_snapshot(&self) -> Arc<Vec<Arc<EnrollmentSummary>>> {
        self.inner.store.enrollments_snapshot()
    }

    pub fn students(&self) -> EntityStream<Student> {
        self.inner.store.subscribe_students()
    }

    pub fn courses(&self) -> EntityStream<Course> {
        self.inner.store.subscribe_courses()
    }

    pub fn departments(&self) -> EntityStream<Department> {
        self.inner.store.subscribe_departments()
    }

    pub fn enrollments(&self) -> EntityStream<EnrollmentSummary> {
        self.inner.store.subscribe_enrollments()
    }

    /// Dashboard counters, republished on every container swap.
    pub fn subscribe_dashboard(&self) -> watch::Receiver<EntityCounts> {
        self.inner.store.subscribe_counts()
    }

    /// Enrollments grouped by status, republished on every enrollment swap.
    pub fn subscribe_board(&self) -> watch::Receiver<Arc<StatusPartition>> {
        self.inner.store.subscribe_partition()
    }

    // ── Private helpers ──────────────────────────────────────────

    /// Await a gateway call; on failure log it and record it on the store.
    async fn track<T, F>(
        &self,
        kind: EntityKind,
        operation: &'static str,
        call: F,
    ) -> Result<T, CoreError>
    where
        F: Future<Output = Result<T, CoreError>>,
    {
        call.await.inspect_err(|e| {
            warn!(entity = %kind, operation, error = %e, "records operation failed");
            self.inner.store.record_failure(kind, operation, e);
        })
    }

    async fn fetch_one<T, F>(&self, kind: EntityKind, call: F) -> Result<Option<T>, CoreError>
    where
        F: Future<Output = Result<T, CoreError>>,
    {
        match call.await {
            Ok(found) => Ok(Some(found)),
            Err(e) if e.is_not_found() => {
                debug!(entity = %kind, "record not found");
                Ok(None)
            }
            Err(e) => {
                warn!(entity = %kind, operation = "get", error = %e, "records operation failed");
                self.inner.store.record_failure(kind, "get", &e);
                Err(e)
            }
        }
    }

    /// The write already succeeded; a failed follow-up refresh is logged
    /// and recorded by `track`, not returned.
    async fn refresh_after_write(&self, kind: EntityKind) {
        if self.refresh(kind).await.is_err() {
            debug!(entity = %kind, "container left stale after write");
        }
    }
}

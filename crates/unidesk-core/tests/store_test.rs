#![allow(clippy::unwrap_used)]
// Store behaviour against a mocked records backend.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use unidesk_core::{
    ClientConfig, Controller, CoreError, CourseId, DepartmentDraft, DepartmentId, EnrollmentDraft,
    EnrollmentId, EnrollmentStatus, EntityKind, StudentDraft, StudentId,
};

// ── Helpers ─────────────────────────────────────────────────────────

const STUDENTS: &str = "/student/students/getAllStudents";
const COURSES: &str = "/student/courses/getAllCourses";
const DEPARTMENTS: &str = "/student/Department/getAllDepartment";
const ENROLLMENTS: &str = "/student/Enrollment/getAllEnrollment";

async fn setup() -> (MockServer, Controller) {
    let server = MockServer::start().await;
    let config = ClientConfig::new(Url::parse(&server.uri()).unwrap());
    let controller = Controller::new(config).unwrap();
    (server, controller)
}

fn student(id: i64, first: &str, email: &str) -> Value {
    json!({
        "idStudent": id,
        "firstName": first,
        "lastName": "Tester",
        "email": email
    })
}

fn enrollment(id: i64, status: &str) -> Value {
    json!({
        "idEnrollment": id,
        "enrollmentDate": "2024-09-01",
        "grade": null,
        "status": status,
        "student": { "idStudent": 1, "firstName": "Ada", "lastName": "Lovelace" },
        "course": { "idCourse": 10, "name": "Analysis" }
    })
}

async fn mount_list(server: &MockServer, list_path: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(list_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ── Create / refresh ────────────────────────────────────────────────

#[tokio::test]
async fn create_then_refresh_holds_exactly_one_match() {
    let (server, controller) = setup().await;

    Mock::given(method("POST"))
        .and(path("/student/students/createStudent"))
        .and(body_partial_json(json!({ "email": "grace@uni.edu" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(student(
            3,
            "Grace",
            "grace@uni.edu",
        )))
        .expect(1)
        .mount(&server)
        .await;
    mount_list(
        &server,
        STUDENTS,
        json!([
            student(1, "Ada", "ada@uni.edu"),
            student(3, "Grace", "grace@uni.edu")
        ]),
    )
    .await;

    let draft = StudentDraft {
        first_name: "Grace".into(),
        last_name: "Tester".into(),
        email: "grace@uni.edu".into(),
        ..StudentDraft::default()
    };
    let created = controller.create_student(&draft).await.unwrap().unwrap();
    assert_eq!(created.id, StudentId::new(3));

    let snapshot = controller.students_snapshot();
    let matches = snapshot
        .iter()
        .filter(|s| s.email == draft.email && s.first_name == draft.first_name)
        .count();
    assert_eq!(matches, 1);
    assert_eq!(controller.store().total_students(), 2);
}

#[tokio::test]
async fn create_student_with_empty_answer_still_refreshes() {
    let (server, controller) = setup().await;

    Mock::given(method("POST"))
        .and(path("/student/students/createStudent"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    mount_list(&server, STUDENTS, json!([student(4, "Emmy", "emmy@uni.edu")])).await;

    let draft = StudentDraft {
        first_name: "Emmy".into(),
        last_name: "Tester".into(),
        email: "emmy@uni.edu".into(),
        ..StudentDraft::default()
    };
    let created = controller.create_student(&draft).await.unwrap();

    assert!(created.is_none());
    assert_eq!(controller.store().total_students(), 1);
    assert_eq!(controller.students_snapshot()[0].id, StudentId::new(4));
    assert!(controller.store().last_failure().is_none());
}

#[tokio::test]
async fn create_enrollment_with_empty_answer_still_refreshes() {
    let (server, controller) = setup().await;

    Mock::given(method("POST"))
        .and(path("/student/Enrollment/createEnrollment"))
        .and(body_partial_json(json!({
            "status": "ACTIVE",
            "student": { "idStudent": 1 },
            "course": { "idCourse": 10 }
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    mount_list(&server, ENROLLMENTS, json!([enrollment(5, "ACTIVE")])).await;

    let draft = EnrollmentDraft {
        student_id: StudentId::new(1),
        course_id: CourseId::new(10),
        status: EnrollmentStatus::Active,
        grade: None,
    };
    let created = controller.create_enrollment(&draft).await.unwrap();

    assert!(created.is_none());
    assert_eq!(controller.store().total_enrollments(), 1);
    assert_eq!(controller.store().active_enrollments(), 1);
}

#[tokio::test]
async fn create_department_with_empty_answer_falls_back_to_refetch() {
    let (server, controller) = setup().await;

    Mock::given(method("POST"))
        .and(path("/student/Department/createDepartment"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(DEPARTMENTS))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "idDepartment": 2, "name": "Logic" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let draft = DepartmentDraft {
        name: "Logic".into(),
        ..DepartmentDraft::default()
    };
    assert!(controller.create_department(&draft).await.unwrap().is_none());
    assert!(
        controller
            .store()
            .department_by_id(DepartmentId::new(2))
            .is_some()
    );
}

#[tokio::test]
async fn refresh_twice_without_server_change_is_identical() {
    let (server, controller) = setup().await;
    mount_list(
        &server,
        ENROLLMENTS,
        json!([enrollment(1, "ACTIVE"), enrollment(2, "DROPPED")]),
    )
    .await;

    controller.refresh_enrollments().await.unwrap();
    let first = controller.enrollments_snapshot();
    controller.refresh_enrollments().await.unwrap();
    let second = controller.enrollments_snapshot();

    let a: Vec<_> = first.iter().map(|e| (**e).clone()).collect();
    let b: Vec<_> = second.iter().map(|e| (**e).clone()).collect();
    assert_eq!(a, b);
    assert!(controller.store().last_refresh(EntityKind::Enrollment).is_some());
}

#[tokio::test]
async fn failed_refresh_keeps_previous_contents() {
    let (server, controller) = setup().await;

    Mock::given(method("GET"))
        .and(path(COURSES))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "idCourse": 1, "name": "Analysis" }
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(COURSES))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    controller.refresh_courses().await.unwrap();
    let err = controller.refresh_courses().await.unwrap_err();

    assert!(matches!(err, CoreError::Network { status: Some(503), .. }));
    assert_eq!(controller.courses_snapshot().len(), 1);
    let failure = controller.store().last_failure().unwrap();
    assert_eq!(failure.kind, EntityKind::Course);
    assert_eq!(failure.operation, "refresh");
}

#[tokio::test]
async fn unknown_status_fails_the_whole_list() {
    let (server, controller) = setup().await;
    mount_list(
        &server,
        ENROLLMENTS,
        json!([enrollment(1, "ACTIVE"), enrollment(2, "ON_HOLD")]),
    )
    .await;

    let err = controller.refresh_enrollments().await.unwrap_err();
    assert!(matches!(err, CoreError::Decode { .. }));
    assert!(controller.enrollments_snapshot().is_empty());
}

// ── Delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_only_on_success() {
    let (server, controller) = setup().await;
    mount_list(
        &server,
        STUDENTS,
        json!([
            student(1, "Ada", "ada@uni.edu"),
            student(2, "Alan", "alan@uni.edu")
        ]),
    )
    .await;
    Mock::given(method("DELETE"))
        .and(path("/student/students/deleteStudent/1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/student/students/deleteStudent/2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    controller.refresh_students().await.unwrap();

    controller.delete_student(StudentId::new(1)).await.unwrap();
    assert!(controller.store().student_by_id(StudentId::new(1)).is_none());

    let err = controller.delete_student(StudentId::new(2)).await.unwrap_err();
    assert!(matches!(err, CoreError::Network { .. }));
    assert!(controller.store().student_by_id(StudentId::new(2)).is_some());
    assert_eq!(controller.store().total_students(), 1);
}

// ── Aggregates ──────────────────────────────────────────────────────

#[tokio::test]
async fn active_count_tracks_mutations() {
    let (server, controller) = setup().await;
    mount_list(
        &server,
        ENROLLMENTS,
        json!([
            enrollment(1, "ACTIVE"),
            enrollment(2, "ACTIVE"),
            enrollment(3, "COMPLETED"),
            enrollment(4, "WITHDRAWN")
        ]),
    )
    .await;
    Mock::given(method("DELETE"))
        .and(path("/student/Enrollment/deleteEnrollment/2"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let active = |c: &Controller| {
        c.enrollments_snapshot()
            .iter()
            .filter(|e| e.status == EnrollmentStatus::Active)
            .count()
    };

    controller.refresh_enrollments().await.unwrap();
    assert_eq!(controller.store().active_enrollments(), active(&controller));
    assert_eq!(controller.store().active_enrollments(), 2);

    controller
        .delete_enrollment(EnrollmentId::new(2))
        .await
        .unwrap();
    assert_eq!(controller.store().active_enrollments(), active(&controller));
    assert_eq!(controller.store().active_enrollments(), 1);
    assert_eq!(controller.store().total_enrollments(), 3);
}

// ── Status board ────────────────────────────────────────────────────

#[tokio::test]
async fn moving_a_card_to_completed() {
    let (server, controller) = setup().await;

    Mock::given(method("GET"))
        .and(path(ENROLLMENTS))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([enrollment(1, "ACTIVE"), enrollment(2, "COMPLETED")])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/student/Enrollment/getEnrollment/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "idEnrollment": 1,
            "enrollmentDate": "2024-09-01",
            "grade": 14.0,
            "status": "ACTIVE",
            "student": { "idStudent": 1, "firstName": "Ada", "lastName": "Lovelace", "email": "ada@uni.edu" },
            "courseId": 10
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/student/Enrollment/updateEnrollment"))
        .and(body_partial_json(json!({
            "idEnrollment": 1,
            "status": "COMPLETED",
            "grade": 14.0,
            "student": { "idStudent": 1 },
            "course": { "idCourse": 10 }
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ENROLLMENTS))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([enrollment(1, "COMPLETED"), enrollment(2, "COMPLETED")])),
        )
        .mount(&server)
        .await;

    controller.refresh_enrollments().await.unwrap();
    let board = unidesk_core::views::StatusBoard::new(controller.clone());
    assert_eq!(board.column(EnrollmentStatus::Active).len(), 1);

    let saved = board
        .move_status(EnrollmentId::new(1), EnrollmentStatus::Completed)
        .await
        .unwrap();
    assert_eq!(saved.status, EnrollmentStatus::Completed);

    let completed: Vec<i64> = board
        .column(EnrollmentStatus::Completed)
        .iter()
        .map(|e| e.id.get())
        .collect();
    assert_eq!(completed, vec![1, 2]);
    assert!(board.column(EnrollmentStatus::Active).is_empty());
    assert_eq!(board.columns().len(), 5);
}

#[tokio::test]
async fn moving_a_missing_enrollment_is_not_found() {
    let (server, controller) = setup().await;
    Mock::given(method("GET"))
        .and(path("/student/Enrollment/getEnrollment/77"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = controller
        .update_enrollment_status(EnrollmentId::new(77), EnrollmentStatus::Failed)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

// ── Departments merge ───────────────────────────────────────────────

#[tokio::test]
async fn department_writes_merge_without_refetch() {
    let (server, controller) = setup().await;

    Mock::given(method("GET"))
        .and(path(DEPARTMENTS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/student/Department/createDepartment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "idDepartment": 8,
            "name": "Physics",
            "location": "Building B"
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/student/Department/updateDepartment"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let draft = DepartmentDraft {
        name: "Physics".into(),
        location: Some("Building B".into()),
        ..DepartmentDraft::default()
    };
    let created = controller.create_department(&draft).await.unwrap().unwrap();
    assert_eq!(controller.store().total_departments(), 1);

    let renamed = DepartmentDraft {
        name: "Applied Physics".into(),
        ..draft
    }
    .with_id(created.id);
    controller.update_department(&renamed).await.unwrap();

    let stored = controller
        .store()
        .department_by_id(DepartmentId::new(8))
        .unwrap();
    assert_eq!(stored.name, "Applied Physics");
    assert_eq!(controller.store().total_departments(), 1);
}

// ── Initial load ────────────────────────────────────────────────────

#[tokio::test]
async fn load_initial_runs_in_order_and_collects_failures() {
    let (server, controller) = setup().await;
    mount_list(&server, DEPARTMENTS, json!([{ "idDepartment": 1, "name": "Maths" }])).await;
    Mock::given(method("GET"))
        .and(path(COURSES))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_list(&server, STUDENTS, json!([student(1, "Ada", "ada@uni.edu")])).await;
    mount_list(&server, ENROLLMENTS, json!([enrollment(1, "ACTIVE")])).await;

    let report = controller.load_initial().await;

    assert!(!report.is_complete());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, EntityKind::Course);
    assert_eq!(
        report.loaded,
        vec![
            EntityKind::Department,
            EntityKind::Student,
            EntityKind::Enrollment
        ]
    );

    let order: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_owned())
        .collect();
    assert_eq!(order, vec![DEPARTMENTS, COURSES, STUDENTS, ENROLLMENTS]);

    let counts = controller.store().counts();
    assert_eq!(counts.departments, 1);
    assert_eq!(counts.courses, 0);
    assert_eq!(counts.students, 1);
    assert_eq!(counts.active_enrollments, 1);
}

// ── Single-item fetch ───────────────────────────────────────────────

#[tokio::test]
async fn missing_record_is_none() {
    let (server, controller) = setup().await;
    Mock::given(method("GET"))
        .and(path("/student/students/getStudent/41"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(controller.get_student(StudentId::new(41)).await.unwrap().is_none());
    assert!(controller.store().last_failure().is_none());
}

// ── Subscriptions ───────────────────────────────────────────────────

#[tokio::test]
async fn subscribers_observe_refresh() {
    let (server, controller) = setup().await;
    mount_list(&server, STUDENTS, json!([student(1, "Ada", "ada@uni.edu")])).await;

    let mut stream = controller.students();
    let mut counts = controller.store().subscribe_counts();
    assert!(stream.current().is_empty());

    controller.refresh_students().await.unwrap();

    let snap = stream.changed().await.unwrap();
    assert_eq!(snap.len(), 1);
    assert_eq!(snap[0].first_name, "Ada");

    counts.changed().await.unwrap();
    assert_eq!(counts.borrow().students, 1);
}

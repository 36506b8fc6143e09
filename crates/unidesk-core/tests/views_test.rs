#![allow(clippy::unwrap_used)]
// Form modals and the dashboard against a mocked records backend.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use unidesk_core::views::{
    Dashboard, DepartmentForm, EnrollmentForm, FormModal, RECENT_LIMIT, StatusBoard, StudentForm,
};
use unidesk_core::{
    ClientConfig, Controller, CoreError, CourseId, DepartmentId, EnrollmentId, EnrollmentStatus,
    StudentId,
};

async fn setup() -> (MockServer, Controller) {
    let server = MockServer::start().await;
    let config = ClientConfig::new(Url::parse(&server.uri()).unwrap());
    (server, Controller::new(config).unwrap())
}

#[tokio::test]
async fn edit_of_missing_department_does_not_open() {
    let (server, controller) = setup().await;
    Mock::given(method("GET"))
        .and(path("/student/Department/getDepartment/999"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut modal: FormModal<DepartmentForm> = FormModal::new();
    let opened = modal.open_edit(&controller, DepartmentId::new(999)).await;

    assert!(!opened);
    assert!(!modal.is_open());
    assert!(modal.editing().is_none());
}

#[tokio::test]
async fn edit_after_fetch_failure_does_not_open() {
    let (server, controller) = setup().await;
    Mock::given(method("GET"))
        .and(path("/student/students/getStudent/5"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut modal: FormModal<StudentForm> = FormModal::new();
    assert!(!modal.open_edit(&controller, StudentId::new(5)).await);
    assert!(!modal.is_open());
}

#[tokio::test]
async fn edit_and_save_department() {
    let (server, controller) = setup().await;
    Mock::given(method("GET"))
        .and(path("/student/Department/getDepartment/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "idDepartment": 3,
            "name": "Physics",
            "head": "Dr. Curie"
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/student/Department/updateDepartment"))
        .and(body_json(json!({
            "idDepartment": 3,
            "name": "Physics",
            "location": "Building C",
            "head": "Dr. Curie"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut modal: FormModal<DepartmentForm> = FormModal::new();
    assert!(modal.open_edit(&controller, DepartmentId::new(3)).await);
    assert_eq!(modal.editing(), Some(DepartmentId::new(3)));
    assert_eq!(modal.form().head, "Dr. Curie");

    modal.form_mut().location = "Building C".into();
    modal.save(&controller).await.unwrap();

    assert!(!modal.is_open());
    let stored = controller
        .store()
        .department_by_id(DepartmentId::new(3))
        .unwrap();
    assert_eq!(stored.location.as_deref(), Some("Building C"));
}

#[tokio::test]
async fn invalid_form_sends_nothing_and_stays_open() {
    let (server, controller) = setup().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut modal: FormModal<StudentForm> = FormModal::new();
    modal.open_create();
    modal.form_mut().first_name = "Ada".into();

    let err = modal.save(&controller).await.unwrap_err();
    assert!(matches!(err, CoreError::Validation { .. }));
    assert!(modal.is_open());
    assert_eq!(modal.form().first_name, "Ada");
}

#[tokio::test]
async fn enrollment_update_sends_references_only() {
    let (server, controller) = setup().await;
    Mock::given(method("GET"))
        .and(path("/student/Enrollment/getEnrollment/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "idEnrollment": 4,
            "enrollmentDate": "2024-01-15",
            "grade": 11.5,
            "status": "ACTIVE",
            "student": { "idStudent": 2 },
            "course": { "idCourse": 6, "name": "Optics" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/student/Enrollment/updateEnrollment"))
        .and(body_json(json!({
            "idEnrollment": 4,
            "status": "DROPPED",
            "student": { "idStudent": 2 },
            "course": { "idCourse": 7 }
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/student/Enrollment/getAllEnrollment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let mut modal: FormModal<EnrollmentForm> = FormModal::new();
    assert!(modal.open_edit(&controller, EnrollmentId::new(4)).await);
    assert_eq!(modal.form().course_id, Some(CourseId::new(6)));

    modal.form_mut().course_id = Some(CourseId::new(7));
    modal.form_mut().status = EnrollmentStatus::Dropped;
    modal.save(&controller).await.unwrap();
    assert!(!modal.is_open());
}

#[tokio::test]
async fn cancel_closes_without_request() {
    let (_server, controller) = setup().await;
    let mut modal: FormModal<DepartmentForm> = FormModal::new();
    modal.open_create();
    assert!(modal.is_open());
    modal.cancel();
    assert!(!modal.is_open());
    assert_eq!(controller.store().total_departments(), 0);
}

#[tokio::test]
async fn dashboard_lists_first_five() {
    let (server, controller) = setup().await;
    let items: Vec<_> = (1..=7)
        .map(|i| {
            json!({
                "idEnrollment": i,
                "enrollmentDate": "2024-09-01",
                "status": if i % 2 == 0 { "ACTIVE" } else { "FAILED" },
                "student": { "idStudent": i, "firstName": "S", "lastName": format!("{i}") },
                "course": { "idCourse": 1, "name": "Analysis" }
            })
        })
        .collect();
    Mock::given(method("GET"))
        .and(path("/student/Enrollment/getAllEnrollment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items))
        .mount(&server)
        .await;

    controller.refresh_enrollments().await.unwrap();
    let dashboard = Dashboard::from_store(controller.store());

    assert_eq!(dashboard.recent_enrollments.len(), RECENT_LIMIT);
    assert_eq!(dashboard.recent_enrollments[0].id, EnrollmentId::new(1));
    assert_eq!(dashboard.counts.enrollments, 7);
    assert_eq!(dashboard.counts.active_enrollments, 3);
}

#[tokio::test]
async fn empty_board_still_has_five_columns_in_order() {
    let (_server, controller) = setup().await;
    let board = StatusBoard::new(controller);

    let titles: Vec<&str> = board.columns().iter().map(|c| c.title()).collect();
    assert_eq!(
        titles,
        vec!["Active", "Completed", "Failed", "Dropped", "Withdrawn"]
    );
    assert!(board.columns().iter().all(|c| c.cards.is_empty()));
    assert!(StatusBoard::allowed_moves(EnrollmentStatus::Completed).is_empty());
}

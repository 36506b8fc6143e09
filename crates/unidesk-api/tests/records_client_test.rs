#![allow(clippy::unwrap_used)]
// Integration tests for `RecordsClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use unidesk_api::records::types::{
    CoursePayload, CourseRef, DepartmentPayload, DepartmentRef, EnrollmentPayload, StudentPayload,
    StudentRef,
};
use unidesk_api::{Error, RecordsClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, RecordsClient) {
    let server = MockServer::start().await;
    let client = RecordsClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Students ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_students() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/student/students/getAllStudents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "idStudent": 1,
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@uni.edu",
                "phone": null,
                "department": { "idDepartment": 4, "name": "Mathematics" }
            },
            {
                "idStudent": 2,
                "firstName": "Alan",
                "lastName": "Turing",
                "email": "alan@uni.edu"
            }
        ])))
        .mount(&server)
        .await;

    let students = client.list_students().await.unwrap();

    assert_eq!(students.len(), 2);
    assert_eq!(students[0].first_name, "Ada");
    assert_eq!(
        students[0].department.as_ref().map(|d| d.name.as_str()),
        Some("Mathematics")
    );
    assert!(students[1].department.is_none());
}

#[tokio::test]
async fn test_create_student_sends_department_reference() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/student/students/createStudent"))
        .and(body_json(json!({
            "firstName": "Grace",
            "lastName": "Hopper",
            "email": "grace@uni.edu",
            "department": { "idDepartment": 9 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "idStudent": 30,
            "firstName": "Grace",
            "lastName": "Hopper",
            "email": "grace@uni.edu"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let payload = StudentPayload {
        id_student: None,
        first_name: "Grace".into(),
        last_name: "Hopper".into(),
        email: "grace@uni.edu".into(),
        phone: None,
        date_of_birth: None,
        address: None,
        department: Some(DepartmentRef { id_department: 9 }),
    };
    let created = client.create_student(&payload).await.unwrap().unwrap();
    assert_eq!(created.id_student, 30);
}

#[tokio::test]
async fn test_create_with_empty_body_is_not_an_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/student/courses/createCourse"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let payload = CoursePayload {
        id_course: None,
        name: "Topology".into(),
        code: None,
        credit: None,
        description: None,
    };
    assert!(client.create_course(&payload).await.unwrap().is_none());
}

#[tokio::test]
async fn test_get_student_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/student/students/getStudent/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client.get_student(404).await.unwrap_err();
    assert!(err.is_not_found(), "expected not-found, got: {err:?}");
}

#[tokio::test]
async fn test_delete_student_ignores_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/student/students/deleteStudent/5"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Student deleted"))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_student(5).await.unwrap();
}

// ── Courses ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_course_puts_to_id_path() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/student/courses/updateCourse/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "idCourse": 12,
            "name": "Compilers",
            "credit": 6
        })))
        .mount(&server)
        .await;

    let payload = unidesk_api::records::types::CoursePayload {
        id_course: Some(12),
        name: "Compilers".into(),
        code: None,
        credit: Some(6),
        description: None,
    };
    let echoed = client.update_course(12, &payload).await.unwrap().unwrap();
    assert_eq!(echoed.credit, Some(6));
}

// ── Departments ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_department_with_empty_body() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/student/Department/updateDepartment"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let payload = DepartmentPayload {
        id_department: Some(3),
        name: "Physics".into(),
        location: None,
        phone: None,
        head: None,
    };
    assert!(client.update_department(&payload).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_departments_decode_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/student/Department/getAllDepartment"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.list_departments().await;
    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_server_error_carries_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/student/Department/getDepartment/999"))
        .respond_with(ResponseTemplate::new(500).set_body_string("No value present"))
        .mount(&server)
        .await;

    let err = client.get_department(999).await.unwrap_err();
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "No value present");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

// ── Enrollments ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_enrollments_display_shape() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/student/Enrollment/getAllEnrollment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "idEnrollment": 1,
            "enrollmentDate": "2024-09-01",
            "grade": 15.5,
            "status": "ACTIVE",
            "student": { "idStudent": 2, "firstName": "Ada", "lastName": "Lovelace" },
            "course": { "idCourse": 3, "name": "Analysis" }
        }])))
        .mount(&server)
        .await;

    let items = client.list_enrollments().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].grade, Some(15.5));
    assert_eq!(items[0].course.name.as_deref(), Some("Analysis"));
}

#[tokio::test]
async fn test_update_enrollment_sends_references_only() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/student/Enrollment/updateEnrollment"))
        .and(body_json(json!({
            "idEnrollment": 1,
            "status": "COMPLETED",
            "student": { "idStudent": 2 },
            "course": { "idCourse": 3 }
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let payload = EnrollmentPayload {
        id_enrollment: Some(1),
        enrollment_date: None,
        grade: None,
        status: "COMPLETED".into(),
        student: StudentRef { id_student: 2 },
        course: CourseRef { id_course: 3 },
    };
    assert!(client.update_enrollment(&payload).await.unwrap().is_none());
}

// ── Transport ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind an ephemeral port and release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = RecordsClient::from_reqwest(&uri, reqwest::Client::new()).unwrap();
    let result = client.list_courses().await;
    assert!(
        matches!(result, Err(Error::Transport(_))),
        "expected Transport error, got: {result:?}"
    );
}

// Async HTTP client for the university records backend.
//
// Base path: /student/
// One fixed path template per entity and verb; JSON bodies both ways.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::types;
use crate::Error;
use crate::transport::TransportConfig;

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the records REST API.
///
/// Every public method performs exactly one HTTP round trip and returns the
/// decoded wire type. No retries, no caching.
pub struct RecordsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RecordsClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base URL ends with `/` so relative joins keep its path.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        let body = Self::success_body(resp).await?;
        decode(body)
    }

    /// POST returning the echoed entity, or `None` when the body is empty.
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        let body = Self::success_body(resp).await?;
        decode_echo(body)
    }

    /// PUT returning the echoed entity, or `None` when the body is empty.
    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        let body = Self::success_body(resp).await?;
        decode_echo(body)
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        Self::success_body(resp).await.map(|_| ())
    }

    // ── Response handling ────────────────────────────────────────────

    /// Read the body of a successful response, or turn the status into an error.
    async fn success_body(resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.text().await?);
        }

        let raw = resp.text().await.unwrap_or_default();
        Err(Error::Api {
            status: status.as_u16(),
            message: if raw.is_empty() {
                status.to_string()
            } else {
                raw.chars().take(200).collect()
            },
        })
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Students ─────────────────────────────────────────────────────

    pub async fn list_students(&self) -> Result<Vec<types::StudentResponse>, Error> {
        self.get("student/students/getAllStudents").await
    }

    pub async fn get_student(&self, id: i64) -> Result<types::StudentResponse, Error> {
        self.get(&format!("student/students/getStudent/{id}")).await
    }

    pub async fn create_student(
        &self,
        body: &types::StudentPayload,
    ) -> Result<Option<types::StudentResponse>, Error> {
        self.post("student/students/createStudent", body).await
    }

    pub async fn update_student(
        &self,
        body: &types::StudentPayload,
    ) -> Result<Option<types::StudentResponse>, Error> {
        self.put("student/students/updateStudent", body).await
    }

    pub async fn delete_student(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("student/students/deleteStudent/{id}"))
            .await
    }

    // ── Courses ──────────────────────────────────────────────────────

    pub async fn list_courses(&self) -> Result<Vec<types::CourseResponse>, Error> {
        self.get("student/courses/getAllCourses").await
    }

    pub async fn get_course(&self, id: i64) -> Result<types::CourseResponse, Error> {
        self.get(&format!("student/courses/getCourse/{id}")).await
    }

    pub async fn create_course(
        &self,
        body: &types::CoursePayload,
    ) -> Result<Option<types::CourseResponse>, Error> {
        self.post("student/courses/createCourse", body).await
    }

    /// The course update path carries the id as well as the body.
    pub async fn update_course(
        &self,
        id: i64,
        body: &types::CoursePayload,
    ) -> Result<Option<types::CourseResponse>, Error> {
        self.put(&format!("student/courses/updateCourse/{id}"), body)
            .await
    }

    pub async fn delete_course(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("student/courses/deleteCourse/{id}"))
            .await
    }

    // ── Departments ──────────────────────────────────────────────────

    pub async fn list_departments(&self) -> Result<Vec<types::DepartmentResponse>, Error> {
        self.get("student/Department/getAllDepartment").await
    }

    pub async fn get_department(&self, id: i64) -> Result<types::DepartmentResponse, Error> {
        self.get(&format!("student/Department/getDepartment/{id}"))
            .await
    }

    pub async fn create_department(
        &self,
        body: &types::DepartmentPayload,
    ) -> Result<Option<types::DepartmentResponse>, Error> {
        self.post("student/Department/createDepartment", body).await
    }

    pub async fn update_department(
        &self,
        body: &types::DepartmentPayload,
    ) -> Result<Option<types::DepartmentResponse>, Error> {
        self.put("student/Department/updateDepartment", body).await
    }

    pub async fn delete_department(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("student/Department/deleteDepartment/{id}"))
            .await
    }

    // ── Enrollments ──────────────────────────────────────────────────

    pub async fn list_enrollments(&self) -> Result<Vec<types::EnrollmentListItem>, Error> {
        self.get("student/Enrollment/getAllEnrollment").await
    }

    pub async fn get_enrollment(&self, id: i64) -> Result<types::EnrollmentResponse, Error> {
        self.get(&format!("student/Enrollment/getEnrollment/{id}"))
            .await
    }

    pub async fn create_enrollment(
        &self,
        body: &types::EnrollmentPayload,
    ) -> Result<Option<types::EnrollmentResponse>, Error> {
        self.post("student/Enrollment/createEnrollment", body).await
    }

    pub async fn update_enrollment(
        &self,
        body: &types::EnrollmentPayload,
    ) -> Result<Option<types::EnrollmentResponse>, Error> {
        self.put("student/Enrollment/updateEnrollment", body).await
    }

    pub async fn delete_enrollment(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("student/Enrollment/deleteEnrollment/{id}"))
            .await
    }
}

fn decode<T: DeserializeOwned>(body: String) -> Result<T, Error> {
    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body,
        }
    })
}

/// Write endpoints may answer 2xx with nothing; that is not a decode failure.
fn decode_echo<T: DeserializeOwned>(body: String) -> Result<Option<T>, Error> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    decode(body).map(Some)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let client =
            RecordsClient::from_reqwest("http://localhost:8089", reqwest::Client::new()).unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8089/");
    }

    #[test]
    fn base_url_path_is_kept_for_joins() {
        let client =
            RecordsClient::from_reqwest("http://host/api/", reqwest::Client::new()).unwrap();
        let url = client.url("student/courses/getAllCourses").unwrap();
        assert_eq!(url.as_str(), "http://host/api/student/courses/getAllCourses");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = RecordsClient::from_reqwest("not a url", reqwest::Client::new());
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }
}

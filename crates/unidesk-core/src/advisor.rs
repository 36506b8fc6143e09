// ── Academic advisor ──
//
// Thin layer over the generative-AI client. The `try_*` methods surface
// failures as `CoreError::AiUnavailable`; the plain methods degrade to an
// empty answer and log, which is what interactive callers want.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use unidesk_api::GenAiClient;
use unidesk_api::genai::types::GenerateContentRequest;
use unidesk_api::transport::TransportConfig;

use crate::config::AdvisorConfig;
use crate::error::CoreError;
use crate::model::{EnrollmentStatus, EntityKind, StudentId};
use crate::store::DataStore;

/// Fixed persona sent with every free-text question.
pub const SYSTEM_INSTRUCTION: &str = "You are an expert Academic Advisor for a university. \
Help with course selection, student performance analysis, and suggesting study paths. \
Keep tone professional and encouraging.";

/// Placeholder for a completed enrollment whose course name is unknown.
pub const UNKNOWN_COURSE: &str = "Unknown Course";

/// One suggested course or topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyPlanItem {
    pub title: String,
    pub reason: String,
}

/// Advisory queries against one generative model.
pub struct Advisor {
    client: GenAiClient,
}

impl Advisor {
    pub fn new(settings: &AdvisorConfig, transport: &TransportConfig) -> Result<Self, CoreError> {
        let client = GenAiClient::new(
            settings.endpoint.as_str(),
            &settings.model,
            &settings.api_key,
            transport,
        )?;
        Ok(Self { client })
    }

    pub fn from_client(client: GenAiClient) -> Self {
        Self { client }
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    // ── Free-text advice ─────────────────────────────────────────────

    /// Ask a question with the advisor persona. A blank prompt is rejected
    /// without a network call.
    pub async fn try_advise(&self, prompt: &str) -> Result<String, CoreError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(CoreError::validation("prompt is empty"));
        }
        let request = GenerateContentRequest::prompt(prompt).with_system_instruction(SYSTEM_INSTRUCTION);
        Ok(self.client.generate(&request).await?)
    }

    /// Like [`try_advise`](Self::try_advise), but any failure yields `""`.
    pub async fn advise(&self, prompt: &str) -> String {
        match self.try_advise(prompt).await {
            Ok(text) => text,
            Err(CoreError::Validation { .. }) => {
                debug!("blank prompt not sent");
                String::new()
            }
            Err(e) => {
                warn!(error = %e, "advice request failed");
                String::new()
            }
        }
    }

    // ── Study plans ──────────────────────────────────────────────────

    pub async fn try_suggest_study_plan(
        &self,
        student_name: &str,
        completed_courses: &[String],
    ) -> Result<Vec<StudyPlanItem>, CoreError> {
        let request =
            GenerateContentRequest::prompt(study_plan_prompt(student_name, completed_courses))
                .json_response();
        let text = self.client.generate(&request).await?;
        parse_study_plan(&text)
    }

    /// Three suggestions for a student, or an empty list on any failure,
    /// unparseable model output included.
    pub async fn suggest_study_plan(
        &self,
        student_name: &str,
        completed_courses: &[String],
    ) -> Vec<StudyPlanItem> {
        self.try_suggest_study_plan(student_name, completed_courses)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, student = student_name, "study plan request failed");
                Vec::new()
            })
    }

    /// Suggest a plan for a student known to the store, based on the
    /// courses of their COMPLETED enrollments. Unknown students get an
    /// empty plan and no AI call is made.
    pub async fn plan_for_student(&self, store: &DataStore, id: StudentId) -> Vec<StudyPlanItem> {
        let Some(student) = store.student_by_id(id) else {
            debug!(%id, "no such student in store; skipping study plan");
            return Vec::new();
        };
        let completed = completed_course_names(store, id);
        self.suggest_study_plan(&student.first_name, &completed).await
    }

    /// [`plan_for_student`](Self::plan_for_student) with failures surfaced.
    /// An unknown student is `NotFound` and no AI call is made.
    pub async fn try_plan_for_student(
        &self,
        store: &DataStore,
        id: StudentId,
    ) -> Result<Vec<StudyPlanItem>, CoreError> {
        let student = store
            .student_by_id(id)
            .ok_or_else(|| CoreError::NotFound {
                entity: EntityKind::Student.to_string(),
                id: id.to_string(),
            })?;
        let completed = completed_course_names(store, id);
        self.try_suggest_study_plan(&student.first_name, &completed)
            .await
    }
}

// ── Pure helpers ────────────────────────────────────────────────────

pub fn study_plan_prompt(student_name: &str, completed_courses: &[String]) -> String {
    format!(
        "Create a study plan for student {student_name} who has completed: {}.\n\
         Suggest 3 new topics/courses in JSON format: \
         [{{\"title\": \"Course Title\", \"reason\": \"Why take this\"}}]",
        completed_courses.join(", ")
    )
}

/// Names of the courses a student has completed, in container order.
pub fn completed_course_names(store: &DataStore, id: StudentId) -> Vec<String> {
    store
        .enrollments_snapshot()
        .iter()
        .filter(|e| e.student.id == id && e.status == EnrollmentStatus::Completed)
        .map(|e| {
            e.course
                .name
                .clone()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| UNKNOWN_COURSE.to_owned())
        })
        .collect()
}

/// Parse the model's JSON answer. Markdown code fences around the array
/// are tolerated.
pub fn parse_study_plan(text: &str) -> Result<Vec<StudyPlanItem>, CoreError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);
    serde_json::from_str(body.trim())
        .map_err(|e| CoreError::decode(format!("study plan is not a JSON list: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn prompt_lists_completed_courses() {
        let prompt = study_plan_prompt("Ada", &["Analysis".into(), "Algebra".into()]);
        assert!(prompt.starts_with("Create a study plan for student Ada who has completed: Analysis, Algebra."));
        assert!(prompt.contains(r#"[{"title": "Course Title", "reason": "Why take this"}]"#));
    }

    #[test]
    fn parses_plain_and_fenced_json() {
        let expected = vec![StudyPlanItem {
            title: "Topology".into(),
            reason: "Builds on analysis".into(),
        }];
        let plain = r#"[{"title": "Topology", "reason": "Builds on analysis"}]"#;
        assert_eq!(parse_study_plan(plain).unwrap(), expected);

        let fenced = format!("```json\n{plain}\n```");
        assert_eq!(parse_study_plan(&fenced).unwrap(), expected);
    }

    #[test]
    fn non_json_is_decode_error() {
        assert!(matches!(
            parse_study_plan("not-json"),
            Err(CoreError::Decode { .. })
        ));
    }
}

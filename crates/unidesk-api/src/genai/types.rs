// Request and response shapes for the Gemini `generateContent` REST call.
//
// Only the fields this workspace sends or reads are modelled; everything
// else in the response is ignored.

use serde::{Deserialize, Serialize};

// ── Request ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// A single-turn user prompt.
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user(text)],
            system_instruction: None,
            generation_config: None,
        }
    }

    /// Attach a fixed system instruction.
    pub fn with_system_instruction(mut self, text: impl Into<String>) -> Self {
        self.system_instruction = Some(Content {
            role: None,
            parts: vec![Part { text: text.into() }],
        });
        self
    }

    /// Ask the model to answer with `application/json`.
    pub fn json_response(mut self) -> Self {
        self.generation_config = Some(GenerationConfig {
            response_mime_type: Some("application/json".into()),
        });
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".into()),
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

// ── Response ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if there is one.
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let content = candidate.content.as_ref()?;
        Some(content.parts.iter().map(|p| p.text.as_str()).collect())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Error body: `{"error": {"code": 400, "message": "...", "status": "..."}}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

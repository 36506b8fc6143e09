// Async client for the Gemini `generateContent` REST endpoint.
//
// Auth: x-goog-api-key header

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use super::types::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};
use crate::Error;
use crate::transport::TransportConfig;

/// Public Gemini API root.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/";

/// Model used when the profile does not name one.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Async client for one generative model.
pub struct GenAiClient {
    http: reqwest::Client,
    url: Url,
    model: String,
}

impl GenAiClient {
    /// Build from an API key, endpoint root and model name.
    ///
    /// Injects `x-goog-api-key` as a default header on every request.
    pub fn new(
        endpoint: &str,
        model: &str,
        api_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut key_value =
            HeaderValue::from_str(api_key.expose_secret()).map_err(|_| Error::InvalidApiKey)?;
        key_value.set_sensitive(true);
        headers.insert("x-goog-api-key", key_value);

        let http = transport.build_client_with_headers(headers)?;
        let url = Self::generate_url(endpoint, model)?;

        Ok(Self {
            http,
            url,
            model: model.to_owned(),
        })
    }

    /// `{endpoint}/v1beta/models/{model}:generateContent`
    fn generate_url(endpoint: &str, model: &str) -> Result<Url, Error> {
        let mut root = Url::parse(endpoint)?;
        let path = root.path().trim_end_matches('/').to_owned();
        root.set_path(&format!("{path}/"));
        Ok(root.join(&format!("v1beta/models/{model}:generateContent"))?)
    }

    /// The model this client talks to.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one `generateContent` request and return the first candidate's text.
    ///
    /// A response without any candidate text is an error, not an empty string.
    pub async fn generate(&self, request: &GenerateContentRequest) -> Result<String, Error> {
        debug!(model = %self.model, "POST {}", self.url);

        let resp = self.http.post(self.url.clone()).json(request).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(Error::InvalidApiKey);
        }

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .ok()
                .and_then(|env| {
                    let status_name = env.error.status.unwrap_or_default();
                    env.error
                        .message
                        .map(|m| format!("{status_name} {m}").trim().to_owned())
                })
                .unwrap_or_else(|| status.to_string());
            return Err(Error::GenAi {
                message,
                status: Some(status.as_u16()),
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;

        parsed.text().ok_or_else(|| Error::GenAi {
            message: "response carried no candidate text".into(),
            status: None,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn generate_url_targets_model() {
        let url = GenAiClient::generate_url(DEFAULT_ENDPOINT, DEFAULT_MODEL).unwrap();
        assert_eq!(
            url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn generate_url_keeps_endpoint_path() {
        let url = GenAiClient::generate_url("http://127.0.0.1:9000/proxy", "m").unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9000/proxy/v1beta/models/m:generateContent"
        );
    }

    #[test]
    fn invalid_key_header_is_rejected() {
        let key = SecretString::from("bad\nkey".to_string());
        let result = GenAiClient::new(DEFAULT_ENDPOINT, DEFAULT_MODEL, &key, &TransportConfig::default());
        assert!(matches!(result, Err(Error::InvalidApiKey)));
    }
}

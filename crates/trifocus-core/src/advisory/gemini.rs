//! Gemini `generateContent` REST backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::backend::{GenerationBackend, GenerationRequest, ResponseSchema};
use crate::error::AdvisoryError;
use crate::storage::AdvisoryConfig;

pub struct GeminiBackend {
    client: Client,
    endpoint: String,
}

impl GeminiBackend {
    /// Backend talking to `endpoint` (scheme and host, no path).
    ///
    /// # Errors
    /// Returns [`AdvisoryError::Transport`] if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, AdvisoryError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AdvisoryError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &AdvisoryConfig) -> Result<Self, AdvisoryError> {
        Self::new(
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn url(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}:generateContent", self.endpoint)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
}

impl GenerationConfig {
    fn for_schema(schema: ResponseSchema) -> Self {
        match schema {
            ResponseSchema::StringList => Self {
                response_mime_type: "application/json",
                response_schema: serde_json::json!({
                    "type": "ARRAY",
                    "items": { "type": "STRING" }
                }),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if it has any.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    async fn generate(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<Option<String>, AdvisoryError> {
        let body = GenerateContentRequest {
            contents: [Content {
                role: "user",
                parts: [RequestPart {
                    text: &request.prompt,
                }],
            }],
            generation_config: request.response_schema.map(GenerationConfig::for_schema),
        };

        tracing::debug!(model = %request.model, "sending generateContent request");

        let resp = self
            .client
            .post(self.url(&request.model))
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AdvisoryError::Transport(format!("request timeout: {e}"))
                } else if e.is_connect() {
                    AdvisoryError::Transport(format!("connection failed: {e}"))
                } else {
                    AdvisoryError::Transport(format!("request failed: {e}"))
                }
            })?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| AdvisoryError::Transport(format!("failed to read body: {e}")))?;

        if !status.is_success() {
            return Err(AdvisoryError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| AdvisoryError::MalformedResponse(e.to_string()))?;
        Ok(parsed.into_text())
    }
}

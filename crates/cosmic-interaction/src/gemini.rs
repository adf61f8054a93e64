//! Gemini REST client.
//!
//! Calls the Gemini API directly over HTTP. Credentials come from
//! `secret.json` via the infrastructure crate, or are passed explicitly.

use std::time::Duration;

use cosmic_infrastructure::SecretStorage;
use reqwest::{Client, StatusCode, header::HeaderValue};
use serde::{Deserialize, Serialize};

use crate::error::AiError;

/// Model used when `secret.json` does not name one.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Client for the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    system_instruction: Option<String>,
}

impl GeminiClient {
    /// Creates a new client with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            system_instruction: None,
        }
    }

    /// Loads credentials from `secret.json`.
    ///
    /// The model defaults to [`DEFAULT_GEMINI_MODEL`] unless the secrets
    /// file names one.
    pub fn try_from_secrets() -> Result<Self, AiError> {
        let storage = SecretStorage::new().map_err(|e| {
            AiError::ExecutionFailed(format!("Failed to locate secret.json: {}", e))
        })?;
        let config = storage
            .load()
            .map_err(|e| AiError::ExecutionFailed(format!("Failed to load secret.json: {}", e)))?;

        let gemini = config.gemini.ok_or_else(|| {
            AiError::ExecutionFailed("Gemini configuration not found in secret.json".to_string())
        })?;

        let model = gemini.model.unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());
        Ok(Self::new(gemini.api_key, model))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Adds a system instruction that will be sent alongside every request.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// One-shot text generation with default settings.
    pub async fn generate(&self, prompt: impl Into<String>) -> Result<String, AiError> {
        self.generate_with_config(prompt, GenerationConfig::default()).await
    }

    /// One-shot text generation with explicit generation settings.
    pub async fn generate_with_config(
        &self,
        prompt: impl Into<String>,
        config: GenerationConfig,
    ) -> Result<String, AiError> {
        let request = self.build_request(
            vec![Content::user(prompt.into())],
            Some(config),
            false,
        );
        self.send_request(&request).await
    }

    /// Builds a request carrying the client's system instruction.
    pub(crate) fn build_request(
        &self,
        contents: Vec<Content>,
        generation_config: Option<GenerationConfig>,
        with_search: bool,
    ) -> GenerateContentRequest {
        let system_instruction = self
            .system_instruction
            .as_ref()
            .map(|text| Content::new("system", text.clone()));

        GenerateContentRequest {
            contents,
            system_instruction,
            generation_config,
            tools: with_search.then(|| vec![Tool::google_search()]),
        }
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String, AiError> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            BASE_URL,
            model = self.model,
            api_key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| AiError::Process {
                status_code: None,
                message: format!("Gemini API request failed: {err}"),
                is_retryable: err.is_connect() || err.is_timeout(),
                retry_after: None,
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text, retry_after));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| AiError::Parse(format!("Failed to parse Gemini response: {err}")))?;

        extract_text_response(parsed)
    }

    /// Opens a streaming generation request (SSE). The caller consumes the
    /// response body as a byte stream.
    pub(crate) async fn stream_generate(
        &self,
        body: &GenerateContentRequest,
    ) -> Result<reqwest::Response, AiError> {
        let url = format!(
            "{}/{model}:streamGenerateContent?alt=sse&key={api_key}",
            BASE_URL,
            model = self.model,
            api_key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| AiError::Process {
                status_code: None,
                message: format!("Gemini stream request failed: {err}"),
                is_retryable: err.is_connect() || err.is_timeout(),
                retry_after: None,
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text, retry_after));
        }

        Ok(response)
    }
}

/// Generation settings for one-shot calls.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

impl Content {
    pub(crate) fn new(role: impl Into<String>, text: String) -> Self {
        Self {
            role: role.into(),
            parts: vec![Part { text }],
        }
    }

    pub(crate) fn user(text: String) -> Self {
        Self::new("user", text)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct Part {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct Tool {
    pub google_search: serde_json::Map<String, serde_json::Value>,
}

impl Tool {
    fn google_search() -> Self {
        Self {
            google_search: serde_json::Map::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    pub content: Option<ContentResponse>,
    #[serde(rename = "groundingMetadata")]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContentResponse {
    #[serde(default)]
    pub parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PartResponse {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroundingMetadata {
    #[serde(rename = "groundingChunks")]
    pub grounding_chunks: Option<Vec<GroundingChunk>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroundingChunk {
    pub web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WebSource {
    pub title: Option<String>,
    pub uri: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

pub(crate) fn extract_text_response(response: GenerateContentResponse) -> Result<String, AiError> {
    response
        .candidates
        .and_then(|mut candidates| candidates.pop())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or_else(|| {
            AiError::ExecutionFailed(
                "Gemini API returned no text in the response candidates".into(),
            )
        })
}

pub(crate) fn map_http_error(
    status: StatusCode,
    body: String,
    retry_after: Option<Duration>,
) -> AiError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    AiError::Process {
        status_code: Some(status.as_u16()),
        message,
        is_retryable,
        retry_after,
    }
}

pub(crate) fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    if let Ok(seconds) = value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    // Retry-After HTTP-date parsing is omitted for simplicity
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_errors_are_retryable() {
        let err = map_http_error(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"error":{"message":"quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#.to_string(),
            None,
        );
        assert!(err.is_retryable());
        assert!(err.to_string().contains("RESOURCE_EXHAUSTED"));
    }

    #[test]
    fn test_client_errors_are_not_retryable() {
        let err = map_http_error(StatusCode::BAD_REQUEST, "bad field".to_string(), None);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_retry_after_header_is_carried() {
        let err = map_http_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "overloaded".to_string(),
            Some(Duration::from_secs(7)),
        );
        assert_eq!(err.retry_after(), Some(Duration::from_secs(7)));
    }

    #[test]
    fn test_parse_retry_after_seconds() {
        let header = HeaderValue::from_static("5");
        assert_eq!(parse_retry_after(Some(&header)), Some(Duration::from_secs(5)));
        let bad = HeaderValue::from_static("Wed, 21 Oct 2026 07:28:00 GMT");
        assert_eq!(parse_retry_after(Some(&bad)), None);
        assert_eq!(parse_retry_after(None), None);
    }

    #[test]
    fn test_extract_text_takes_last_candidate_text() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "hola" }] } }]
        }))
        .unwrap();
        assert_eq!(extract_text_response(response).unwrap(), "hola");
    }

    #[test]
    fn test_extract_text_fails_on_empty_candidates() {
        let response: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({ "candidates": [] })).unwrap();
        assert!(extract_text_response(response).is_err());
    }

    #[test]
    fn test_request_omits_absent_fields() {
        let client = GeminiClient::new("k", DEFAULT_GEMINI_MODEL);
        let request = client.build_request(vec![Content::user("hola".to_string())], None, false);
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("system_instruction").is_none());
        assert!(json.get("generation_config").is_none());
        assert!(json.get("tools").is_none());
    }

    #[test]
    fn test_request_with_search_carries_tool() {
        let client = GeminiClient::new("k", DEFAULT_GEMINI_MODEL).with_system_instruction("eres LUCAS");
        let request = client.build_request(vec![Content::user("hola".to_string())], None, true);
        let json = serde_json::to_value(&request).unwrap();
        assert!(json["tools"][0].get("google_search").is_some());
        assert_eq!(json["system_instruction"]["parts"][0]["text"], "eres LUCAS");
    }
}

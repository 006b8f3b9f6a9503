use async_trait::async_trait;
use interfaces::defs::{ServiceError, TextGenerator};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
    status: Option<String>,
    #[serde(default)]
    details: Vec<serde_json::Value>,
}

impl ApiError {
    fn is_auth(&self) -> bool {
        let status_says_auth = matches!(
            self.status.as_deref(),
            Some("UNAUTHENTICATED") | Some("PERMISSION_DENIED")
        );
        let reason_says_auth = self
            .details
            .iter()
            .filter_map(|detail| detail.get("reason").and_then(|r| r.as_str()))
            .any(|reason| reason == "API_KEY_INVALID");
        status_says_auth || reason_says_auth
    }
}

/// Client for the Generative Language `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: GEMINI_API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn generator_name(&self) -> String {
        format!("Gemini ({})", self.model)
    }

    async fn generate(&self, prompt: &str) -> Result<String, ServiceError> {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        debug!("Gemini replied with HTTP {} ({} bytes)", status, text.len());
        interpret_response(status, &text)
    }
}

/// Turn an HTTP status and body from `generateContent` into reply text or a classified error.
pub fn interpret_response(status: StatusCode, body: &str) -> Result<String, ServiceError> {
    if !status.is_success() {
        let api_error = serde_json::from_str::<ErrorEnvelope>(body).ok().map(|e| e.error);
        let message = api_error
            .as_ref()
            .map(|e| e.message.clone())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string());

        let auth = matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
            || api_error.as_ref().map(ApiError::is_auth).unwrap_or(false);

        return Err(if auth {
            ServiceError::Auth(format!("HTTP {}: {}", status.as_u16(), message))
        } else {
            ServiceError::Transport(format!("HTTP {}: {}", status.as_u16(), message))
        });
    }

    let parsed: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| ServiceError::Parse(format!("malformed generateContent body: {}", e)))?;

    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        let reason = parsed
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .map(|r| format!(" (blocked: {})", r))
            .unwrap_or_default();
        return Err(ServiceError::Parse(format!("reply contained no text{}", reason)));
    }

    Ok(text)
}

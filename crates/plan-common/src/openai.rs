use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::backend::CompletionBackend;
use crate::error::PlanError;
use crate::prompt::RenderedPrompt;

pub const DEFAULT_BASE_URL: &str = "https://api.together.xyz/v1";
pub const PLAN_MODEL: &str = "meta-llama/Llama-3-8b-chat-hf";
pub const PLAN_TEMPERATURE: f32 = 0.7;
pub const PLAN_MAX_TOKENS: u32 = 4000;

#[derive(Clone)]
pub struct OpenAiClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// `None` leaves the HTTP client's own behaviour in place.
    pub timeout: Option<Duration>,
    pub max_error_body_bytes: usize,
}

impl OpenAiClientConfig {
    /// Required:
    /// - `TOGETHER_API_KEY`
    ///
    /// Optional:
    /// - `PLANNER_LLM_BASE_URL` (default: Together AI)
    /// - `PLANNER_LLM_TIMEOUT_SECS`
    /// - `PLANNER_LLM_MAX_ERROR_BODY_BYTES` (default: 8 KiB)
    pub fn from_env() -> Result<Self, OpenAiClientError> {
        let api_key = std::env::var("TOGETHER_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                OpenAiClientError::Config(
                    "TOGETHER_API_KEY environment variable is required".to_string(),
                )
            })?;

        let base_url = std::env::var("PLANNER_LLM_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout = std::env::var("PLANNER_LLM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs);

        let max_error_body_bytes = std::env::var("PLANNER_LLM_MAX_ERROR_BODY_BYTES")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(8 * 1024);

        Ok(Self::new(base_url, api_key)
            .with_timeout(timeout)
            .with_max_error_body_bytes(max_error_body_bytes))
    }

    /// Plan defaults: fixed model, temperature and token budget.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: PLAN_MODEL.to_string(),
            temperature: PLAN_TEMPERATURE,
            max_tokens: PLAN_MAX_TOKENS,
            timeout: None,
            max_error_body_bytes: 8 * 1024,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_error_body_bytes(mut self, bytes: usize) -> Self {
        self.max_error_body_bytes = bytes;
        self
    }
}

impl fmt::Debug for OpenAiClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .field("max_error_body_bytes", &self.max_error_body_bytes)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OpenAiClientError {
    #[error("config error: {0}")]
    Config(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid response JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("upstream returned error: status={status} message={message}")]
    Upstream { status: StatusCode, message: String },

    #[error("upstream returned non-JSON error: status={status} body={body}")]
    UpstreamBody { status: StatusCode, body: String },

    #[error("response contained no completion text")]
    EmptyCompletion,
}

impl From<OpenAiClientError> for PlanError {
    fn from(err: OpenAiClientError) -> Self {
        match err {
            OpenAiClientError::Upstream { message, .. } => PlanError::Upstream(message),
            OpenAiClientError::UpstreamBody { body, .. } => PlanError::Upstream(body),
            // reqwest's text carries the request URL; the cause is logged in `complete`
            OpenAiClientError::Request(_) => {
                PlanError::Upstream("failed to reach the model provider".to_string())
            }
            OpenAiClientError::EmptyCompletion => PlanError::EmptyResult,
            e @ (OpenAiClientError::Config(_) | OpenAiClientError::InvalidJson(_)) => {
                PlanError::Internal(e.to_string())
            }
        }
    }
}

/// OpenAI-compatible chat completion client (Together AI by default).
#[derive(Clone)]
pub struct OpenAiClient {
    config: OpenAiClientConfig,
    http: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: OpenAiClientConfig) -> Result<Self, OpenAiClientError> {
        let mut builder = reqwest::Client::builder().user_agent("study-planner");
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            config,
            http: builder.build()?,
        })
    }

    pub fn config(&self) -> &OpenAiClientConfig {
        &self.config
    }

    pub async fn chat_completions(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, OpenAiClientError> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await?;
        Self::parse_json_response(resp, self.config.max_error_body_bytes).await
    }

    /// Single-turn request carrying `prompt` as the only user message.
    pub fn plan_request(&self, prompt: String) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt,
            }],
            temperature: Some(self.config.temperature),
            max_tokens: Some(self.config.max_tokens),
        }
    }

    async fn parse_json_response<T: for<'de> Deserialize<'de>>(
        resp: reqwest::Response,
        max_error_body_bytes: usize,
    ) -> Result<T, OpenAiClientError> {
        if resp.status().is_success() {
            let bytes = resp.bytes().await?;
            return Ok(serde_json::from_slice::<T>(&bytes)?);
        }
        Err(Self::to_upstream_error(resp, max_error_body_bytes).await)
    }

    async fn to_upstream_error(
        resp: reqwest::Response,
        max_error_body_bytes: usize,
    ) -> OpenAiClientError {
        let status = resp.status();
        let body = read_limited_text(resp, max_error_body_bytes).await;
        if let Ok(parsed) = serde_json::from_str::<OpenAiErrorEnvelope>(&body) {
            let message = parsed
                .error
                .message
                .unwrap_or_else(|| "unknown upstream error".to_string());
            return OpenAiClientError::Upstream { status, message };
        }
        OpenAiClientError::UpstreamBody { status, body }
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(&self, prompt: RenderedPrompt) -> Result<String, PlanError> {
        let request = self.plan_request(prompt.into_string());
        let response = self.chat_completions(&request).await.inspect_err(|e| {
            error!(model = %self.config.model, error = %e, "chat completion failed");
        })?;

        let text = first_completion_text(&response)
            .map(str::to_string)
            .ok_or(OpenAiClientError::EmptyCompletion)
            .inspect_err(|_| {
                warn!(
                    model = %self.config.model,
                    choices = response.choices.len(),
                    "chat completion returned no usable content"
                );
            })?;

        info!(
            model = %self.config.model,
            chars = text.len(),
            total_tokens = response.usage.as_ref().and_then(|u| u.total_tokens),
            "chat completion received"
        );
        Ok(text)
    }
}

/// Content of `choices[0].message`, if present and non-empty.
pub fn first_completion_text(response: &ChatCompletionResponse) -> Option<&str> {
    response
        .choices
        .first()
        .and_then(|c| c.message.as_ref())
        .and_then(|m| m.content.as_deref())
        .filter(|s| !s.is_empty())
}

async fn read_limited_text(resp: reqwest::Response, max_bytes: usize) -> String {
    match resp.bytes().await {
        Ok(mut b) => {
            if b.len() > max_bytes {
                b.truncate(max_bytes);
            }
            String::from_utf8_lossy(&b).to_string()
        }
        Err(e) => {
            warn!(error = %e, "failed to read upstream error body");
            "<failed to read error body>".to_string()
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorEnvelope {
    error: OpenAiErrorObject,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorObject {
    message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: Option<String>,
    #[serde(default)]
    pub choices: Vec<ChatCompletionChoice>,
    pub usage: Option<ChatCompletionUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionChoice {
    pub index: Option<u32>,
    pub message: Option<ChatCompletionMessage>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionMessage {
    pub role: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionUsage {
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
}

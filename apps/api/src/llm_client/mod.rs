//! LLM Client: the single point of entry for all completion calls.
//!
//! No other module talks to the Groq API directly. Analysis operations go
//! through `CompletionClient`, which renders a prompt template and issues one
//! call against whatever `CompletionBackend` the app state carries.
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::analysis::prompts::TemplateId;

pub mod prompts;
pub mod selector;

pub use selector::ModelHandle;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Anything that turns (model, prompt) into a completion.
///
/// Carried in `AppState` as `Arc<dyn CompletionBackend>` so tests can swap in doubles.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Groq (OpenAI-compatible chat completions)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Text of the first choice, if the provider sent any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct GroqError {
    error: GroqErrorBody,
}

#[derive(Debug, Deserialize)]
struct GroqErrorBody {
    message: String,
}

/// HTTP client for the Groq chat completions endpoint.
///
/// One request per call: no retries, and no timeout beyond reqwest's defaults.
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GroqClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Makes a raw call to the chat completions API, returning the full response object.
    pub async fn call(&self, model: &str, prompt: &str) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GroqError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat_response: ChatResponse = serde_json::from_str(&response.text().await?)?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "LLM call succeeded: model={}, prompt_tokens={}, completion_tokens={}",
                model, usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat_response)
    }
}

#[async_trait]
impl CompletionBackend for GroqClient {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        let response = self.call(model, prompt).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Completion client
// ────────────────────────────────────────────────────────────────────────────

/// Renders a prompt template and issues exactly one completion request.
///
/// Backend failures are returned as-is; turning unusable text into a default
/// is the result coercer's job, not this one's.
#[derive(Clone)]
pub struct CompletionClient {
    backend: Arc<dyn CompletionBackend>,
}

impl CompletionClient {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &dyn CompletionBackend {
        self.backend.as_ref()
    }

    /// Returns the raw completion text, unmodified.
    pub async fn complete(
        &self,
        template: TemplateId,
        fields: &[(&str, &str)],
        handle: &ModelHandle,
    ) -> Result<String, LlmError> {
        let prompt = template.render(fields);
        debug!(
            "Rendering {:?} prompt ({} chars) for model {}",
            template,
            prompt.len(),
            handle.model
        );
        self.backend.complete(&handle.model, &prompt).await
    }
}

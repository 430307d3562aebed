/// LLM Client — the single point of entry for all Mistral API calls.
///
/// ARCHITECTURAL RULE: No other module may call the completion API directly.
/// All LLM interactions MUST go through this module.
///
/// Each invocation makes exactly one attempt. Failures are surfaced to the
/// caller, never retried here: the per-request contract is one outbound call.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://api.mistral.ai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "mistral-small-latest";

/// Bounded timeout so a stalled upstream call cannot pin a handler forever.
const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed completion envelope: {message}")]
    Envelope { message: String, raw: String },

    #[error("completion contained no content")]
    EmptyContent,
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        LlmError::Transport(e.to_string())
    }
}

/// The seam between the evaluation pipeline and the outside world.
/// Production uses `MistralClient`; tests stub this with canned responses.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Sends one prompt and returns the assistant's raw text reply.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

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
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MistralErrorBody {
    message: String,
}

/// Extracts the upstream error message from an error body, falling back to
/// the raw body when it is not the expected JSON shape.
fn upstream_error_message(body: String) -> String {
    serde_json::from_str::<MistralErrorBody>(&body)
        .map(|e| e.message)
        .unwrap_or(body)
}

/// Client for the Mistral chat-completions API.
#[derive(Clone)]
pub struct MistralClient {
    client: Client,
    api_url: String,
    model: String,
    api_key: String,
}

impl MistralClient {
    pub fn new(api_url: String, model: String, api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_url,
            model,
            api_key,
        }
    }
}

#[async_trait]
impl CompletionBackend for MistralClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: upstream_error_message(body),
            });
        }

        let body = response.text().await?;
        let chat: ChatResponse = serde_json::from_str(&body).map_err(|e| LlmError::Envelope {
            message: format!("could not decode completion envelope: {e}"),
            raw: body.clone(),
        })?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(LlmError::EmptyContent)?;

        debug!("LLM call succeeded ({} chars of content)", content.len());

        Ok(content)
    }
}

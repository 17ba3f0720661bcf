//! Ollama Cloud provider (`/api/chat` with bearer token).

use serde::{Deserialize, Serialize};

use super::LlmProvider;
use crate::AiError;

/// Backend name for logs and errors.
const BACKEND: &str = "Ollama Cloud";

/// Chat endpoint.
const CHAT_URL: &str = "https://ollama.com/api/chat";

/// Default model when none is configured.
const DEFAULT_MODEL: &str = "gpt-oss:20b-cloud";

/// Ollama Cloud API provider.
#[derive(Debug)]
pub struct OllamaCloudProvider {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaCloudProvider {
    /// Creates a new Ollama Cloud provider. `None` model selects the
    /// default.
    #[must_use]
    pub fn new(api_key: String, model: Option<String>) -> Self {
        Self {
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct OllamaChatResponse {
    message: OllamaChatMessage,
}

#[derive(Deserialize)]
struct OllamaChatMessage {
    content: String,
}

#[derive(Deserialize)]
struct OllamaError {
    error: String,
}

#[async_trait::async_trait]
impl LlmProvider for OllamaCloudProvider {
    fn name(&self) -> &'static str {
        BACKEND
    }

    async fn generate(&self, system: &str, prompt: &str) -> Result<String, AiError> {
        let mut messages = Vec::with_capacity(2);
        if !system.is_empty() {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });

        let request = OllamaChatRequest {
            model: &self.model,
            messages,
            stream: false,
        };

        log::debug!("POST {CHAT_URL} model={}", self.model);

        let resp = self
            .client
            .post(CHAT_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AiError::unavailable(BACKEND, &e))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| AiError::unavailable(BACKEND, &e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<OllamaError>(&body)
                .map_or_else(|_| format!("HTTP {status}: {body}"), |e| e.error);
            return Err(AiError::BackendUnavailable {
                backend: BACKEND,
                message,
            });
        }

        let response: OllamaChatResponse = serde_json::from_str(&body)?;
        Ok(response.message.content.trim().to_owned())
    }
}

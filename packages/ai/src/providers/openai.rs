//! `OpenAI` chat completions provider.

use serde::{Deserialize, Serialize};

use super::LlmProvider;
use crate::AiError;

/// Backend name for logs and errors.
const BACKEND: &str = "OpenAI";

/// Chat completions endpoint.
const CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model when none is configured.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// `OpenAI` API provider.
#[derive(Debug)]
pub struct OpenAiProvider {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    /// Creates a new `OpenAI` provider. `None` model selects the default.
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
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAiMessage<'a>>,
}

#[derive(Serialize)]
struct OpenAiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct OpenAiError {
    error: OpenAiErrorDetail,
}

#[derive(Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

#[async_trait::async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        BACKEND
    }

    async fn generate(&self, system: &str, prompt: &str) -> Result<String, AiError> {
        let mut messages = Vec::with_capacity(2);
        if !system.is_empty() {
            messages.push(OpenAiMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(OpenAiMessage {
            role: "user",
            content: prompt,
        });

        let request = OpenAiRequest {
            model: &self.model,
            messages,
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
            let message = serde_json::from_str::<OpenAiError>(&body)
                .map_or_else(|_| format!("HTTP {status}: {body}"), |e| e.error.message);
            return Err(AiError::BackendUnavailable {
                backend: BACKEND,
                message,
            });
        }

        let response: OpenAiResponse = serde_json::from_str(&body)?;
        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(AiError::BackendUnavailable {
                backend: BACKEND,
                message: "No choices in response".to_owned(),
            })?;

        Ok(text.trim().to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_model_applies_when_unconfigured() {
        let provider = OpenAiProvider::new("sk-test".to_owned(), None);
        assert_eq!(provider.model, DEFAULT_MODEL);
    }

    #[test]
    fn decodes_chat_completion_body() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Summary."}}]}"#;
        let response: OpenAiResponse = serde_json::from_str(body).unwrap();
        let text = response.choices[0].message.content.as_deref().unwrap();
        assert_eq!(text, "Summary.");
    }
}

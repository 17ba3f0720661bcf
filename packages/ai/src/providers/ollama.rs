//! Local Ollama provider (`/api/generate`).

use serde::{Deserialize, Serialize};

use super::LlmProvider;
use crate::AiError;

/// Backend name for logs and errors.
const BACKEND: &str = "Ollama";

/// Default local server address.
const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Default model when none is configured.
const DEFAULT_MODEL: &str = "gemma3:latest";

/// Local Ollama server provider.
///
/// `/api/generate` takes a single prompt with no system/user role split,
/// so the system instruction is prepended to the prompt text.
#[derive(Debug)]
pub struct OllamaLocalProvider {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaLocalProvider {
    /// Creates a new local Ollama provider. `None` arguments select the
    /// default base URL and model.
    #[must_use]
    pub fn new(base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            client: reqwest::Client::new(),
        }
    }
}

/// Joins the system instruction and user prompt into the single prompt
/// `/api/generate` expects.
pub(crate) fn compose_prompt(system: &str, prompt: &str) -> String {
    if system.is_empty() {
        prompt.to_owned()
    } else {
        format!("{system}\n\n{prompt}")
    }
}

#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

#[derive(Deserialize)]
struct OllamaError {
    error: String,
}

#[async_trait::async_trait]
impl LlmProvider for OllamaLocalProvider {
    fn name(&self) -> &'static str {
        BACKEND
    }

    async fn generate(&self, system: &str, prompt: &str) -> Result<String, AiError> {
        let request = OllamaGenerateRequest {
            model: &self.model,
            prompt: compose_prompt(system, prompt),
            stream: false,
        };

        let url = format!("{}/api/generate", self.base_url);
        log::debug!("POST {url} model={}", self.model);

        let resp = self
            .client
            .post(&url)
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

        let response: OllamaGenerateResponse = serde_json::from_str(&body)?;
        Ok(response.response.trim().to_owned())
    }
}

//! LLM provider abstraction and implementations.
//!
//! Each backend is a thin adapter over its HTTP API: the request body
//! carries the model name and prompt, and the generated text sits at a
//! backend-specific JSON path. That path knowledge lives entirely in the
//! adapter; callers only see [`LlmProvider::generate`].

pub mod ollama;
pub mod ollama_cloud;
pub mod openai;

use crate::config::{BackendConfig, BackendKind};
use crate::AiError;

/// Trait for LLM backends.
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync + std::fmt::Debug {
    /// Human-readable backend name, used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Sends one generation request and returns the response text.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::BackendUnavailable`] if the backend cannot be
    /// reached or returns a non-2xx status, or [`AiError::Json`] if the
    /// response body cannot be decoded.
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, AiError>;
}

/// Creates the provider selected by the configuration.
///
/// Cloud backends are validated here: a missing or empty key fails with
/// [`AiError::Authentication`] before any network call is made.
///
/// # Errors
///
/// Returns [`AiError::Authentication`] if a cloud backend has no API key.
pub fn create_provider(config: &BackendConfig) -> Result<Box<dyn LlmProvider>, AiError> {
    match config.kind {
        BackendKind::OllamaLocal => Ok(Box::new(ollama::OllamaLocalProvider::new(
            config.base_url.clone(),
            config.model.clone(),
        ))),
        BackendKind::OllamaCloud => {
            let api_key = require_key(config)?;
            Ok(Box::new(ollama_cloud::OllamaCloudProvider::new(
                api_key,
                config.model.clone(),
            )))
        }
        BackendKind::OpenAi => {
            let api_key = require_key(config)?;
            Ok(Box::new(openai::OpenAiProvider::new(
                api_key,
                config.model.clone(),
            )))
        }
    }
}

/// Extracts the API key or fails with an authentication error naming the
/// backend.
fn require_key(config: &BackendConfig) -> Result<String, AiError> {
    config
        .api_key
        .clone()
        .filter(|k| !k.trim().is_empty())
        .ok_or(AiError::Authentication {
            backend: config.kind.name(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_ollama_needs_no_key() {
        let config = BackendConfig::new(BackendKind::OllamaLocal);
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.name(), "Ollama");
    }

    #[test]
    fn openai_without_key_is_authentication_error() {
        let config = BackendConfig::new(BackendKind::OpenAi);
        let err = create_provider(&config).unwrap_err();
        assert!(matches!(
            err,
            AiError::Authentication { backend: "OpenAI" }
        ));
    }

    #[test]
    fn ollama_cloud_without_key_is_authentication_error() {
        let config = BackendConfig::new(BackendKind::OllamaCloud);
        let err = create_provider(&config).unwrap_err();
        assert!(matches!(
            err,
            AiError::Authentication {
                backend: "Ollama Cloud"
            }
        ));
    }

    #[test]
    fn cloud_backends_with_keys_construct() {
        let config =
            BackendConfig::new(BackendKind::OpenAi).with_api_key(Some("sk-test".to_owned()));
        assert_eq!(create_provider(&config).unwrap().name(), "OpenAI");

        let config =
            BackendConfig::new(BackendKind::OllamaCloud).with_api_key(Some("key".to_owned()));
        assert_eq!(create_provider(&config).unwrap().name(), "Ollama Cloud");
    }
}

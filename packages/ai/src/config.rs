//! Backend selection and configuration.
//!
//! Configuration is read from the environment once at startup and passed
//! into the pipeline as an immutable value, never consulted as ambient
//! global state mid-run.

use crate::AiError;

/// Which AI backend to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Local Ollama server (`/api/generate`).
    OllamaLocal,
    /// Ollama Cloud (`/api/chat`, bearer token).
    OllamaCloud,
    /// `OpenAI` chat completions (bearer token).
    OpenAi,
}

impl BackendKind {
    /// Parses the `AI_BACKEND` value.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::Config`] for unrecognized values.
    pub fn parse(s: &str) -> Result<Self, AiError> {
        match s.trim().to_lowercase().as_str() {
            "ollama" | "ollama_local" => Ok(Self::OllamaLocal),
            "ollama_cloud" => Ok(Self::OllamaCloud),
            "openai" | "gpt" => Ok(Self::OpenAi),
            other => Err(AiError::Config {
                message: format!(
                    "Unknown AI backend: {other}. Use 'ollama', 'ollama_cloud', or 'openai'."
                ),
            }),
        }
    }

    /// Human-readable backend name, used in logs and error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::OllamaLocal => "Ollama",
            Self::OllamaCloud => "Ollama Cloud",
            Self::OpenAi => "OpenAI",
        }
    }
}

/// Immutable backend configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// The backend to call.
    pub kind: BackendKind,
    /// API key; required for cloud backends.
    pub api_key: Option<String>,
    /// Model name; backend default when unset.
    pub model: Option<String>,
    /// Base URL override for the local Ollama server.
    pub base_url: Option<String>,
}

impl BackendConfig {
    /// Creates a configuration for the given backend with no key, default
    /// model, and default base URL.
    #[must_use]
    pub const fn new(kind: BackendKind) -> Self {
        Self {
            kind,
            api_key: None,
            model: None,
            base_url: None,
        }
    }

    /// Sets the API key. Blank keys are treated as absent.
    #[must_use]
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    /// Sets the model name.
    #[must_use]
    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model.filter(|m| !m.trim().is_empty());
        self
    }

    /// Sets the base URL for the local Ollama server.
    #[must_use]
    pub fn with_base_url(mut self, url: Option<String>) -> Self {
        self.base_url = url.filter(|u| !u.trim().is_empty());
        self
    }

    /// Builds the configuration from environment variables: `AI_BACKEND`
    /// (default `ollama`), the backend's key variable (`OLLAMA_API_KEY`
    /// or `OPENAI_API_KEY`), `AI_MODEL`, and `OLLAMA_BASE_URL`.
    ///
    /// A missing key is not an error here — it only matters for cloud
    /// backends, and is reported when the provider is constructed.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::Config`] if `AI_BACKEND` holds an unrecognized
    /// value.
    pub fn from_env() -> Result<Self, AiError> {
        Self::from_env_with(None)
    }

    /// Like [`Self::from_env`], but with an explicit backend selection
    /// taking precedence over `AI_BACKEND` (e.g. from a CLI flag).
    ///
    /// # Errors
    ///
    /// Returns [`AiError::Config`] if no override is given and
    /// `AI_BACKEND` holds an unrecognized value.
    pub fn from_env_with(kind: Option<BackendKind>) -> Result<Self, AiError> {
        let kind = match kind {
            Some(kind) => kind,
            None => {
                let backend = std::env::var("AI_BACKEND").unwrap_or_else(|_| "ollama".to_owned());
                BackendKind::parse(&backend)?
            }
        };

        let api_key = match kind {
            BackendKind::OllamaLocal => None,
            BackendKind::OllamaCloud => std::env::var("OLLAMA_API_KEY").ok(),
            BackendKind::OpenAi => std::env::var("OPENAI_API_KEY").ok(),
        };

        Ok(Self::new(kind)
            .with_api_key(api_key)
            .with_model(std::env::var("AI_MODEL").ok())
            .with_base_url(std::env::var("OLLAMA_BASE_URL").ok()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_names() {
        assert_eq!(BackendKind::parse("ollama").unwrap(), BackendKind::OllamaLocal);
        assert_eq!(
            BackendKind::parse("ollama_cloud").unwrap(),
            BackendKind::OllamaCloud
        );
        assert_eq!(BackendKind::parse("openai").unwrap(), BackendKind::OpenAi);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(BackendKind::parse(" OpenAI ").unwrap(), BackendKind::OpenAi);
    }

    #[test]
    fn rejects_unknown_backend() {
        assert!(matches!(
            BackendKind::parse("bard").unwrap_err(),
            AiError::Config { .. }
        ));
    }

    #[test]
    fn blank_api_key_is_absent() {
        let config = BackendConfig::new(BackendKind::OpenAi).with_api_key(Some("  ".to_owned()));
        assert!(config.api_key.is_none());
    }
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! LLM backend abstraction for report summarization.
//!
//! Supports a local Ollama server, Ollama Cloud, and `OpenAI` behind the
//! [`LlmProvider`](providers::LlmProvider) trait. Backend selection is a
//! fixed, explicit choice per run — there is no fallback from one backend
//! to another, and cloud backends refuse to construct without a key so no
//! doomed network call is ever made.

pub mod config;
pub mod prompt;
pub mod providers;

pub use config::{BackendConfig, BackendKind};
pub use providers::{LlmProvider, create_provider};

use thiserror::Error;

/// Errors that can occur during AI operations.
#[derive(Debug, Error)]
pub enum AiError {
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required backend credential is missing or empty.
    #[error("Missing API key for {backend}")]
    Authentication {
        /// The backend that required the credential.
        backend: &'static str,
    },

    /// The backend could not be reached or returned a failure.
    #[error("{backend} backend unavailable: {message}")]
    BackendUnavailable {
        /// The backend that failed.
        backend: &'static str,
        /// Underlying cause.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// Description.
        message: String,
    },
}

impl AiError {
    /// Wraps a transport error as a backend-unavailable failure.
    #[must_use]
    pub fn unavailable(backend: &'static str, cause: &dyn std::fmt::Display) -> Self {
        Self::BackendUnavailable {
            backend,
            message: cause.to_string(),
        }
    }
}

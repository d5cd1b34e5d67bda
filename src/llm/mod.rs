//! LLM completion backends.
//!
//! Every backend takes a single prompt and hands back whatever text the
//! provider generated. Clients are built per request from the caller's own
//! API key, on top of the shared HTTP client.

pub mod gemini;
pub mod groq;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;

pub use gemini::GeminiClient;
pub use groq::GroqClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Gemini,
    Groq,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Gemini, Provider::Groq];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::Groq => "groq",
        }
    }

    /// Model ids offered for this provider.
    pub fn models(&self) -> &'static [&'static str] {
        match self {
            Provider::Gemini => &["gemini-1.5-pro", "gemini-1.5-flash", "gemini-1.5-flash-8b"],
            Provider::Groq => &["llama-3.3-70b-versatile"],
        }
    }
}

/// Text produced by one completion call. `content` is `None` when the
/// provider answered but generated nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Completion {
    pub content: Option<String>,
}

impl Completion {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
        }
    }

    pub fn empty() -> Self {
        Self { content: None }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("LLM API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid LLM endpoint: {0}")]
    Endpoint(String),
}

#[async_trait]
pub trait CompletionModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<Completion, LlmError>;

    /// Model id, for logging.
    fn model_id(&self) -> &str;
}

/// Builds the completion client for a request.
pub fn build_model(
    provider: Provider,
    model_name: &str,
    api_key: &str,
    client: &Client,
    config: &Config,
) -> Arc<dyn CompletionModel> {
    match provider {
        Provider::Gemini => Arc::new(GeminiClient::new(
            client.clone(),
            api_key,
            model_name,
            &config.gemini_api_base,
        )),
        Provider::Groq => Arc::new(GroqClient::new(
            client.clone(),
            api_key,
            model_name,
            &config.groq_api_base,
        )),
    }
}

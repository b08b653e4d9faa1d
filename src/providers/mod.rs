//! Completion service backends.
//!
//! Every backend receives a prompt plus the JSON schema its answer must
//! satisfy, and returns the raw text of the answer. Decoding that text is the
//! caller's job.

mod anthropic;
mod factory;
mod fallback;
mod google;
mod ollama;
mod open_ai;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use fallback::FallbackProvider;
pub use google::GoogleProvider;
pub use ollama::OllamaProvider;
pub use open_ai::OpenAIProvider;

use async_trait::async_trait;
use serde_json::Value;
use std::error::Error;

pub type ProviderError = Box<dyn Error + Send + Sync>;

/// One request to a completion service
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt_text: String,
    /// JSON schema the response must conform to
    pub output_schema: Value,
}

impl CompletionRequest {
    pub fn new(prompt_text: impl Into<String>, output_schema: Value) -> Self {
        CompletionRequest {
            prompt_text: prompt_text.into(),
            output_schema,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    pub text: String,
}

impl CompletionResponse {
    pub fn new(text: impl Into<String>) -> Self {
        CompletionResponse { text: text.into() }
    }
}

/// Unified trait for all completion providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn provider_name(&self) -> &str;

    /// Send the prompt and return the raw answer text
    async fn complete(&self, request: &CompletionRequest)
        -> Result<CompletionResponse, ProviderError>;
}

/// Error responses carry either `{"error": {"message": ...}}` or a bare string.
pub(crate) fn api_error_message(body: &Value) -> Option<String> {
    let error = body.get("error")?;
    error["message"]
        .as_str()
        .or_else(|| error.as_str())
        .map(str::to_string)
        .or_else(|| Some(error.to_string()))
}

/// Gemini's responseSchema dialect wants upper-case type names.
pub(crate) fn to_gemini_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(key, _)| key.as_str() != "additionalProperties")
                .map(|(key, value)| {
                    let value = match (key.as_str(), value) {
                        ("type", Value::String(kind)) => Value::String(kind.to_uppercase()),
                        _ => to_gemini_schema(value),
                    };
                    (key.clone(), value)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(to_gemini_schema).collect()),
        other => other.clone(),
    }
}

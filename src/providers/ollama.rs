use crate::config::ProviderConfig;
use crate::providers::{
    api_error_message, CompletionRequest, CompletionResponse, LlmProvider, ProviderError,
};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OllamaProvider {
    /// Create a new Ollama provider from configuration. No key is needed.
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "http://localhost:11434".to_string());

        Ok(OllamaProvider {
            client: Client::new(),
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String, model: String) -> Self {
        OllamaProvider {
            client: Client::new(),
            base_url,
            model,
            temperature: 0.2,
            max_tokens: 4096,
        }
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "user", "content": request.prompt_text}
                ],
                "format": request.output_schema,
                "stream": false,
                "options": {
                    "temperature": self.temperature,
                    "num_predict": self.max_tokens
                }
            }))
            .send()
            .await?;

        let response_body: Value = response.json().await?;
        debug!("Ollama response: {:?}", response_body);

        // Check for API error response
        if let Some(message) = api_error_message(&response_body) {
            return Err(format!("Ollama API error: {}", message).into());
        }

        let text = response_body["message"]["content"]
            .as_str()
            .ok_or("Failed to extract content from Ollama response")?;

        Ok(CompletionResponse::new(text))
    }
}

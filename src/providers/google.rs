use crate::config::ProviderConfig;
use crate::providers::{
    api_error_message, to_gemini_schema, CompletionRequest, CompletionResponse, LlmProvider,
    ProviderError,
};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub struct GoogleProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GoogleProvider {
    /// Create a new Google Gemini provider from configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .ok_or("GOOGLE_API_KEY not found in config or environment")?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(GoogleProvider {
            client: Client::new(),
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        GoogleProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.2,
            max_tokens: 4096,
        }
    }
}

#[async_trait]
impl LlmProvider for GoogleProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&json!({
                "contents": [{
                    "parts": [{"text": request.prompt_text}]
                }],
                "generationConfig": {
                    "temperature": self.temperature,
                    "maxOutputTokens": self.max_tokens,
                    "responseMimeType": "application/json",
                    "responseSchema": to_gemini_schema(&request.output_schema)
                }
            }))
            .send()
            .await?;

        let status = response.status();
        let response_body: Value = response.json().await?;
        debug!("{:?}", response_body);

        if !status.is_success() {
            let message = api_error_message(&response_body).unwrap_or_default();
            return Err(format!("Google Gemini API error ({}): {}", status, message).into());
        }

        let text = response_body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or("Failed to extract content from Google Gemini response")?;

        Ok(CompletionResponse::new(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_provider_name() {
        let mut config = ProviderConfig::for_model("gemini-2.5-flash");
        config.api_key = Some("test-key".to_string());

        let provider = GoogleProvider::new(&config).unwrap();
        assert_eq!(provider.provider_name(), "google");
    }

    #[tokio::test]
    async fn test_complete_requests_json_output() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_query(Matcher::UrlEncoded("key".into(), "fake_api_key".into()))
            .match_body(Matcher::PartialJson(json!({
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": {"type": "OBJECT"}
                }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"candidates": [{"content": {"parts": [{"text": "{\"recipeName\": \"Soup\"}"}]}}]}"#,
            )
            .create_async()
            .await;

        let provider = GoogleProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gemini-2.5-flash".to_string(),
        );
        let request = CompletionRequest::new("Parse this", json!({"type": "object"}));

        let response = provider.complete(&request).await.unwrap();
        assert_eq!(response.text, r#"{"recipeName": "Soup"}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_api_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_query(Matcher::Any)
            .with_status(429)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": {"message": "Resource exhausted"}}"#)
            .create_async()
            .await;

        let provider = GoogleProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gemini-2.5-flash".to_string(),
        );
        let request = CompletionRequest::new("Parse this", json!({"type": "object"}));

        let err = provider.complete(&request).await.unwrap_err();
        assert!(err.to_string().contains("Resource exhausted"));
        mock.assert_async().await;
    }
}

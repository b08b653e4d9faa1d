use crate::config::SourcesConfig;
use crate::error::FetchError;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;

/// Plain HTTP GET with the configured timeout and user agent.
#[derive(Clone)]
pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    pub fn new(config: &SourcesConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::Failure(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Body of a successful response. Non-2xx statuses are failures.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Failure(format!(
                "Failed to fetch webpage: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            )
            .trim_end()
            .to_string()));
        }

        Ok(response.text().await?)
    }
}

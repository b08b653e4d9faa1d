use std::sync::Arc;
use std::time::Duration;

use crate::config::{ImportConfig, ProviderConfig};
use crate::error::ImportError;
use crate::pipelines::{self, ImportOutcome, ParseMode, Parsers};
use crate::providers::LlmProvider;
use crate::quantity::QuantityRecovery;
use crate::sources::{TranscriptFetcher, VideoSource, WebsiteSource};

/// Where the recipe text comes from
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Recipe text the caller already has
    Text(String),
    /// A recipe web page
    Website(String),
    /// A video URL or bare video id; its transcript is parsed
    Video(String),
}

/// Completion services the builder can select by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Google,
    OpenAI,
    Anthropic,
    Ollama,
}

impl ProviderKind {
    /// Name used in configuration and by the provider factory
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Google => "google",
            ProviderKind::OpenAI => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Ollama => "ollama",
        }
    }

    fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Google => "gemini-2.5-flash",
            ProviderKind::OpenAI => "gpt-4.1-mini",
            ProviderKind::Anthropic => "claude-3-5-haiku-latest",
            ProviderKind::Ollama => "llama3.1",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "google" => Some(ProviderKind::Google),
            "openai" => Some(ProviderKind::OpenAI),
            "anthropic" => Some(ProviderKind::Anthropic),
            "ollama" => Some(ProviderKind::Ollama),
            _ => None,
        }
    }
}

/// Builder for configuring and running a recipe import
#[derive(Default)]
pub struct RecipeImporterBuilder {
    source: Option<InputSource>,
    mode: ParseMode,
    provider: Option<ProviderKind>,
    timeout: Option<Duration>,
    api_key: Option<String>,
    model: Option<String>,
    config: Option<ImportConfig>,
    completion: Option<Arc<dyn LlmProvider>>,
    transcripts: Option<Arc<dyn TranscriptFetcher>>,
}

impl RecipeImporterBuilder {
    /// Parse recipe text directly
    ///
    /// # Example
    /// ```
    /// use recipe_import::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .text("Clătite\n2 ouă\n250 ml lapte\n100 g făină");
    /// ```
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.source = Some(InputSource::Text(text.into()));
        self
    }

    /// Fetch a recipe web page and parse its visible text
    ///
    /// # Example
    /// ```
    /// use recipe_import::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .website("https://example.com/ciorba-de-perisoare");
    /// ```
    pub fn website(mut self, url: impl Into<String>) -> Self {
        self.source = Some(InputSource::Website(url.into()));
        self
    }

    /// Fetch a video transcript and parse it
    ///
    /// Watch, short-link, embed and shorts URLs are accepted, as is a bare
    /// eleven-character video id.
    pub fn video(mut self, url: impl Into<String>) -> Self {
        self.source = Some(InputSource::Video(url.into()));
        self
    }

    /// Choose the parser to start with (structured by default)
    ///
    /// # Example
    /// ```
    /// use recipe_import::{ParseMode, RecipeImporter};
    ///
    /// let builder = RecipeImporter::builder()
    ///     .text("Pancakes: flour, milk, eggs")
    ///     .mode(ParseMode::Legacy);
    /// ```
    pub fn mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    /// Use a specific completion service, bypassing any configured fallback chain
    pub fn provider(mut self, provider: ProviderKind) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Timeout for website and transcript requests
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// API key for the completion service
    ///
    /// This allows passing the key directly instead of relying on
    /// environment variables or config files.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Model name for the completion service
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Use this configuration instead of loading `config.toml` and the environment
    pub fn config(mut self, config: ImportConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use an already constructed completion service
    ///
    /// `provider`, `api_key` and `model` are ignored when this is set.
    pub fn completion_provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.completion = Some(provider);
        self
    }

    /// Use a custom transcript source for `.video()` imports
    pub fn transcript_fetcher(mut self, fetcher: Arc<dyn TranscriptFetcher>) -> Self {
        self.transcripts = Some(fetcher);
        self
    }

    /// Build and run the import
    ///
    /// # Errors
    /// Returns `ImportError` if:
    /// - No input source was specified
    /// - Configuration cannot be loaded or names no usable provider
    /// - The source cannot be fetched or holds too little text
    /// - Both structured and legacy parsing fail
    ///
    /// Validation findings are not errors; they are returned in the outcome's
    /// report.
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_import::RecipeImporter;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let outcome = RecipeImporter::builder()
    ///     .website("https://example.com/recipe")
    ///     .build()
    ///     .await?;
    /// println!("{}", outcome.recipe.recipe_name());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<ImportOutcome, ImportError> {
        let source = self.source.clone().ok_or_else(|| {
            ImportError::Builder(
                "No input source specified. Use .text(), .website() or .video()".to_string(),
            )
        })?;

        let config = self.resolve_config()?;

        let parsers = match &self.completion {
            Some(provider) => Parsers::new(provider.clone()).with_recovery(
                QuantityRecovery::from_codes(&config.parsing.languages),
            ),
            None => Parsers::from_config(&config)?,
        };

        match source {
            InputSource::Text(text) => pipelines::text::process(&text, self.mode, &parsers).await,
            InputSource::Website(url) => {
                let website = WebsiteSource::new(&config.sources)?;
                pipelines::website::process(&url, self.mode, &website, &parsers).await
            }
            InputSource::Video(url) => {
                let video = match self.transcripts {
                    Some(fetcher) => VideoSource::new(fetcher),
                    None => VideoSource::from_config(&config.sources)?,
                };
                pipelines::video::process(&url, self.mode, &video, &parsers).await
            }
        }
    }

    /// Explicit configuration or the loaded one, with builder overrides applied.
    fn resolve_config(&self) -> Result<ImportConfig, ImportError> {
        let mut config = match &self.config {
            Some(config) => config.clone(),
            None => ImportConfig::load()?,
        };

        if let Some(timeout) = self.timeout {
            config.sources.timeout_secs = timeout.as_secs().max(1);
        }

        if self.completion.is_some() {
            return Ok(config);
        }

        if let Some(kind) = self.provider {
            config.default_provider = kind.as_str().to_string();
            config.fallback.enabled = false;
        }

        if self.api_key.is_some() || self.model.is_some() {
            let name = config.default_provider.clone();
            let default_model = ProviderKind::from_name(&name)
                .map(|kind| kind.default_model())
                .ok_or_else(|| ImportError::Provider(format!("Unknown provider: {}", name)))?;

            let entry = config
                .providers
                .entry(name)
                .or_insert_with(|| ProviderConfig::for_model(default_model));
            if let Some(key) = &self.api_key {
                entry.api_key = Some(key.clone());
            }
            if let Some(model) = &self.model {
                entry.model = model.clone();
            }
            entry.enabled = true;
        }

        Ok(config)
    }
}

/// Main entry point for the builder API
pub struct RecipeImporter;

impl RecipeImporter {
    /// Creates a new builder for importing recipes
    ///
    /// # Example
    /// ```
    /// use recipe_import::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder();
    /// ```
    pub fn builder() -> RecipeImporterBuilder {
        RecipeImporterBuilder::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chaining() {
        let builder = RecipeImporter::builder()
            .website("https://example.com/recipe")
            .mode(ParseMode::Legacy)
            .provider(ProviderKind::Anthropic)
            .timeout(Duration::from_secs(30));

        assert!(matches!(builder.source, Some(InputSource::Website(_))));
        assert_eq!(builder.mode, ParseMode::Legacy);
        assert_eq!(builder.provider, Some(ProviderKind::Anthropic));
        assert_eq!(builder.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_later_source_replaces_earlier() {
        let builder = RecipeImporter::builder().text("a recipe").video("dQw4w9WgXcQ");
        assert!(matches!(builder.source, Some(InputSource::Video(_))));
    }

    #[test]
    fn test_overrides_applied_to_config() {
        let config = RecipeImporter::builder()
            .config(ImportConfig::default())
            .provider(ProviderKind::OpenAI)
            .api_key("sk-test")
            .timeout(Duration::from_millis(200))
            .resolve_config()
            .unwrap();

        assert_eq!(config.default_provider, "openai");
        let openai = config.providers.get("openai").unwrap();
        assert_eq!(openai.model, "gpt-4.1-mini");
        assert_eq!(openai.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.sources.timeout_secs, 1);
        assert!(!config.fallback.enabled);
    }

    #[test]
    fn test_model_override_keeps_configured_key() {
        let mut base = ImportConfig::default();
        base.providers.get_mut("google").unwrap().api_key = Some("g-key".to_string());

        let config = RecipeImporter::builder()
            .config(base)
            .model("gemini-2.5-pro")
            .resolve_config()
            .unwrap();

        let google = config.providers.get("google").unwrap();
        assert_eq!(google.model, "gemini-2.5-pro");
        assert_eq!(google.api_key.as_deref(), Some("g-key"));
    }

    #[tokio::test]
    async fn test_missing_source_is_builder_error() {
        let err = RecipeImporter::builder()
            .config(ImportConfig::default())
            .build()
            .await
            .unwrap_err();
        assert!(matches!(err, ImportError::Builder(_)));
    }
}

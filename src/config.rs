use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Top-level configuration for recipe imports
#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    /// Default provider to use when not specified
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Fallback configuration for automatic provider switching
    #[serde(default)]
    pub fallback: FallbackConfig,
    /// Website and transcript fetching
    #[serde(default)]
    pub sources: SourcesConfig,
    /// Recipe text parsing
    #[serde(default)]
    pub parsing: ParsingConfig,
}

/// Configuration for a specific completion provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier (e.g., "gemini-2.5-flash", "gpt-4.1-mini")
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl ProviderConfig {
    /// Enabled provider with default tuning for the given model
    pub fn for_model(model: impl Into<String>) -> Self {
        ProviderConfig {
            enabled: true,
            model: model.into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        }
    }
}

/// Configuration for provider fallback and retry behavior
#[derive(Debug, Deserialize, Clone)]
pub struct FallbackConfig {
    /// Whether fallback is enabled
    #[serde(default)]
    pub enabled: bool,
    /// Order of providers to try (first to last)
    #[serde(default)]
    pub order: Vec<String>,
    /// Number of attempts per provider before moving on
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    /// Delay between attempts in milliseconds, multiplied by the attempt number
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            order: Vec::new(),
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

/// Configuration for website and video content sources
#[derive(Debug, Deserialize, Clone)]
pub struct SourcesConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// User agent sent with website requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Cleaned website text shorter than this is rejected
    #[serde(default = "default_min_content_length")]
    pub min_content_length: usize,
    /// Origin used for watch pages and caption downloads
    #[serde(default = "default_youtube_base_url")]
    pub youtube_base_url: String,
    /// Preferred caption language
    #[serde(default = "default_transcript_language")]
    pub transcript_language: String,
}

impl SourcesConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            min_content_length: default_min_content_length(),
            youtube_base_url: default_youtube_base_url(),
            transcript_language: default_transcript_language(),
        }
    }
}

/// Configuration for recipe text parsing
#[derive(Debug, Deserialize, Clone)]
pub struct ParsingConfig {
    /// Lexicon language codes consulted by quantity recovery, in order
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            languages: default_languages(),
        }
    }
}

// Default value functions
fn default_provider() -> String {
    "google".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; RecipeImportBot/1.0)".to_string()
}

fn default_min_content_length() -> usize {
    50
}

fn default_youtube_base_url() -> String {
    "https://www.youtube.com".to_string()
}

fn default_transcript_language() -> String {
    "en".to_string()
}

fn default_languages() -> Vec<String> {
    vec!["ro".to_string(), "en".to_string()]
}

impl Default for ImportConfig {
    fn default() -> Self {
        let mut providers = HashMap::new();
        providers.insert(
            default_provider(),
            ProviderConfig::for_model("gemini-2.5-flash"),
        );

        Self {
            default_provider: default_provider(),
            providers,
            fallback: FallbackConfig::default(),
            sources: SourcesConfig::default(),
            parsing: ParsingConfig::default(),
        }
    }
}

impl ImportConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_IMPORT__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_IMPORT__PROVIDERS__GOOGLE__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// When no provider is configured anywhere, Gemini is assumed, with its key
/// taken from `GOOGLE_API_KEY`.
pub fn load_config() -> Result<ImportConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPE_IMPORT__PROVIDERS__GOOGLE__API_KEY
        .add_source(
            Environment::with_prefix("RECIPE_IMPORT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut config: ImportConfig = settings.try_deserialize()?;
    if config.providers.is_empty() {
        config.providers = ImportConfig::default().providers;
    }
    Ok(config)
}

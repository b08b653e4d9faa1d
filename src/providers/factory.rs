use crate::config::{ImportConfig, ProviderConfig};
use crate::providers::{
    AnthropicProvider, FallbackProvider, GoogleProvider, LlmProvider, OllamaProvider,
    OpenAIProvider, ProviderError,
};
use log::debug;
use std::sync::Arc;

/// Names accepted in `default_provider`, `fallback.order` and the builder.
pub const PROVIDER_NAMES: [&str; 4] = ["google", "openai", "anthropic", "ollama"];

pub struct ProviderFactory;

impl ProviderFactory {
    /// Construct the backend called `name` from its configuration block.
    pub fn create(
        name: &str,
        config: &ProviderConfig,
    ) -> Result<Box<dyn LlmProvider>, ProviderError> {
        if !config.enabled {
            return Err(format!("Provider '{}' is not enabled in configuration", name).into());
        }

        debug!("Creating {} provider with model {}", name, config.model);
        let provider: Box<dyn LlmProvider> = match name {
            "google" => Box::new(GoogleProvider::new(config)?),
            "openai" => Box::new(OpenAIProvider::new(config)?),
            "anthropic" => Box::new(AnthropicProvider::new(config)?),
            "ollama" => Box::new(OllamaProvider::new(config)?),
            _ => {
                return Err(format!(
                    "Unknown provider: {} (expected one of {})",
                    name,
                    PROVIDER_NAMES.join(", ")
                )
                .into())
            }
        };
        Ok(provider)
    }

    /// The backend named by `default_provider`.
    pub fn default_provider(config: &ImportConfig) -> Result<Box<dyn LlmProvider>, ProviderError> {
        let name = config.default_provider.as_str();
        match config.providers.get(name) {
            Some(provider_config) => Self::create(name, provider_config),
            None => Err(format!("Default provider '{}' not found in configuration", name).into()),
        }
    }

    /// What the parsers talk to: the fallback chain when it is enabled,
    /// otherwise the default backend alone.
    pub fn from_config(config: &ImportConfig) -> Result<Arc<dyn LlmProvider>, ProviderError> {
        if config.fallback.enabled {
            return Ok(Arc::new(FallbackProvider::new(config)?));
        }
        Self::default_provider(config).map(Arc::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FallbackConfig;

    fn keyed(model: &str) -> ProviderConfig {
        let mut config = ProviderConfig::for_model(model);
        config.api_key = Some("test-key".to_string());
        config
    }

    fn creation_error(result: Result<Box<dyn LlmProvider>, ProviderError>) -> String {
        match result {
            Ok(provider) => panic!("expected an error, built {}", provider.provider_name()),
            Err(e) => e.to_string(),
        }
    }

    fn import_config(default: &str, names: &[&str]) -> ImportConfig {
        ImportConfig {
            default_provider: default.to_string(),
            providers: names
                .iter()
                .map(|name| (name.to_string(), keyed("test-model")))
                .collect(),
            ..ImportConfig::default()
        }
    }

    #[test]
    fn test_every_known_name_builds() {
        for name in PROVIDER_NAMES {
            let provider = ProviderFactory::create(name, &keyed("test-model")).unwrap();
            assert_eq!(provider.provider_name(), name);
        }
    }

    #[test]
    fn test_unknown_and_disabled_providers() {
        let err = creation_error(ProviderFactory::create("mistral", &keyed("m")));
        assert!(err.starts_with("Unknown provider: mistral"));

        let mut disabled = keyed("gpt-4.1-mini");
        disabled.enabled = false;
        let err = creation_error(ProviderFactory::create("openai", &disabled));
        assert!(err.contains("not enabled in configuration"));
    }

    #[test]
    fn test_default_provider_must_be_configured() {
        let config = import_config("anthropic", &["openai"]);
        let err = creation_error(ProviderFactory::default_provider(&config));
        assert!(err.contains("'anthropic' not found"));

        let config = import_config("openai", &["openai"]);
        assert_eq!(
            ProviderFactory::default_provider(&config)
                .unwrap()
                .provider_name(),
            "openai"
        );
    }

    #[test]
    fn test_from_config_wraps_chain_only_when_enabled() {
        let mut config = import_config("ollama", &["ollama", "openai"]);
        assert_eq!(
            ProviderFactory::from_config(&config).unwrap().provider_name(),
            "ollama"
        );

        config.fallback = FallbackConfig {
            enabled: true,
            order: vec!["ollama".to_string(), "openai".to_string()],
            retry_attempts: 1,
            retry_delay_ms: 0,
        };
        assert_eq!(
            ProviderFactory::from_config(&config).unwrap().provider_name(),
            "fallback"
        );
    }
}

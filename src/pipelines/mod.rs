//! End-to-end imports: source adapter, parser, validation.
//!
//! This is the only place that decides to retry a failed structured parse
//! with the legacy parser. The parsers themselves never fall back.

pub mod text;
pub mod video;
pub mod website;

use crate::config::ImportConfig;
use crate::error::{ImportError, ParseError};
use crate::model::{ParsedRecipe, ValidationReport};
use crate::parsing::{LegacyParser, StructuredParser};
use crate::providers::{LlmProvider, ProviderFactory};
use crate::quantity::QuantityRecovery;
use crate::sources::ContentAssessment;
use crate::validation::validate;
use log::{info, warn};
use serde::Serialize;
use std::sync::Arc;

/// Which parser a pipeline starts with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Structured parsing, falling back to legacy on failure
    #[default]
    Structured,
    /// Legacy parsing only
    Legacy,
}

/// A parsed recipe together with its validation findings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub recipe: ParsedRecipe,
    pub report: ValidationReport,
    /// The text the recipe was parsed from, after source cleanup
    pub source_text: String,
    /// How recipe-like the fetched text looked; absent for direct text input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<ContentAssessment>,
}

impl ImportOutcome {
    /// True when the recipe went through the legacy parser.
    pub fn used_legacy(&self) -> bool {
        !self.recipe.is_structured()
    }
}

/// Both parsers, sharing one completion provider.
#[derive(Clone)]
pub struct Parsers {
    structured: StructuredParser,
    legacy: LegacyParser,
}

impl Parsers {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Parsers {
            structured: StructuredParser::new(provider.clone()),
            legacy: LegacyParser::new(provider),
        }
    }

    pub fn from_config(config: &ImportConfig) -> Result<Self, ImportError> {
        let provider = ProviderFactory::from_config(config)
            .map_err(|e| ImportError::Provider(e.to_string()))?;
        Ok(Self::new(provider).with_recovery(QuantityRecovery::from_codes(
            &config.parsing.languages,
        )))
    }

    pub fn with_recovery(mut self, recovery: QuantityRecovery) -> Self {
        self.structured = self.structured.with_recovery(recovery);
        self
    }

    pub fn structured(&self) -> &StructuredParser {
        &self.structured
    }

    pub fn legacy(&self) -> &LegacyParser {
        &self.legacy
    }

    /// Parse `text` in `mode`, retrying with the legacy parser when a
    /// structured parse fails for any reason other than blank input.
    pub async fn parse_with_fallback(
        &self,
        text: &str,
        mode: ParseMode,
    ) -> Result<ParsedRecipe, ParseError> {
        if mode == ParseMode::Structured {
            match self.structured.parse(text).await {
                Ok(recipe) => return Ok(ParsedRecipe::Structured(recipe)),
                Err(ParseError::EmptyInput) => return Err(ParseError::EmptyInput),
                Err(e) => {
                    info!("Structured parsing failed ({}), falling back to legacy parsing", e)
                }
            }
        }

        self.legacy.parse(text).await.map(ParsedRecipe::Legacy)
    }
}

/// Parse, validate and package `text`.
pub(crate) async fn run(
    text: String,
    mode: ParseMode,
    parsers: &Parsers,
    assessment: Option<ContentAssessment>,
) -> Result<ImportOutcome, ImportError> {
    let recipe = parsers.parse_with_fallback(&text, mode).await?;
    let report = validate(&recipe);

    if report.is_valid {
        info!("Imported recipe '{}'", recipe.recipe_name());
    } else {
        warn!(
            "Recipe '{}' imported with {} validation finding(s)",
            recipe.recipe_name(),
            report.errors.len()
        );
    }

    Ok(ImportOutcome {
        recipe,
        report,
        source_text: text,
        assessment,
    })
}

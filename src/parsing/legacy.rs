use super::prompt::legacy_prompt;
use super::schema::legacy_recipe_schema;
use super::{missing_fields, or_default, request_json, require_text};
use crate::config::ImportConfig;
use crate::error::{ImportError, ParseError};
use crate::model::{LegacyRecipe, DEFAULT_SERVINGS, NOT_SPECIFIED};
use crate::providers::{LlmProvider, ProviderFactory};
use log::debug;
use std::sync::Arc;

/// Parses recipe text into a [`LegacyRecipe`].
///
/// Measurements are discarded on this path and no quantity recovery runs.
#[derive(Clone)]
pub struct LegacyParser {
    provider: Arc<dyn LlmProvider>,
}

impl LegacyParser {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        LegacyParser { provider }
    }

    pub fn from_config(config: &ImportConfig) -> Result<Self, ImportError> {
        let provider =
            ProviderFactory::from_config(config).map_err(|e| ImportError::Provider(e.to_string()))?;
        Ok(Self::new(provider))
    }

    pub async fn parse(&self, text: &str) -> Result<LegacyRecipe, ParseError> {
        let text = require_text(text)?;

        debug!("Requesting legacy parse from {}", self.provider.provider_name());
        let json = request_json(
            self.provider.as_ref(),
            legacy_prompt(text),
            legacy_recipe_schema(),
        )
        .await?;

        let candidate: LegacyRecipe = serde_json::from_str(&json)?;
        let recipe = normalize(candidate);

        if let Some(missing) = missing_fields(&[
            ("recipeName", !recipe.recipe_name.is_empty()),
            ("cleanIngredientNames", !recipe.clean_ingredient_names.is_empty()),
            ("instructions", !recipe.instructions.is_empty()),
        ]) {
            return Err(ParseError::MissingFields(missing));
        }

        Ok(recipe)
    }
}

/// Trim and lowercase names, drop blank entries, fill defaults.
fn normalize(candidate: LegacyRecipe) -> LegacyRecipe {
    LegacyRecipe {
        recipe_name: candidate.recipe_name.trim().to_string(),
        prep_time: or_default(candidate.prep_time, NOT_SPECIFIED),
        cook_time: or_default(candidate.cook_time, NOT_SPECIFIED),
        servings: if candidate.servings < 1 {
            DEFAULT_SERVINGS
        } else {
            candidate.servings
        },
        clean_ingredient_names: candidate
            .clean_ingredient_names
            .iter()
            .map(|name| name.trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect(),
        instructions: candidate
            .instructions
            .iter()
            .map(|step| step.trim().to_string())
            .filter(|step| !step.is_empty())
            .collect(),
    }
}

use super::prompt::{detect_lexicon_code, structured_prompt};
use super::schema::structured_recipe_schema;
use super::{missing_fields, or_default, request_json, require_text};
use crate::config::ImportConfig;
use crate::error::{ImportError, ParseError};
use crate::model::{StructuredRecipe, DEFAULT_SERVINGS, NOT_SPECIFIED};
use crate::providers::{LlmProvider, ProviderFactory};
use crate::quantity::{needs_repair, QuantityRecovery};
use log::{debug, info};
use std::sync::Arc;

/// Parses recipe text into a [`StructuredRecipe`], repairing lost quantities.
#[derive(Clone)]
pub struct StructuredParser {
    provider: Arc<dyn LlmProvider>,
    recovery: QuantityRecovery,
}

impl StructuredParser {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        StructuredParser {
            provider,
            recovery: QuantityRecovery::default(),
        }
    }

    /// Build the provider (or fallback chain) and lexicons from configuration.
    pub fn from_config(config: &ImportConfig) -> Result<Self, ImportError> {
        let provider =
            ProviderFactory::from_config(config).map_err(|e| ImportError::Provider(e.to_string()))?;
        Ok(Self::new(provider).with_recovery(QuantityRecovery::from_codes(
            &config.parsing.languages,
        )))
    }

    pub fn with_recovery(mut self, recovery: QuantityRecovery) -> Self {
        self.recovery = recovery;
        self
    }

    pub async fn parse(&self, text: &str) -> Result<StructuredRecipe, ParseError> {
        let text = require_text(text)?;

        debug!("Requesting structured parse from {}", self.provider.provider_name());
        let json = request_json(
            self.provider.as_ref(),
            structured_prompt(text),
            structured_recipe_schema(),
        )
        .await?;

        let candidate: StructuredRecipe = serde_json::from_str(&json)?;

        if let Some(missing) = missing_fields(&[
            ("recipeName", !candidate.recipe_name.trim().is_empty()),
            ("ingredients", !candidate.ingredients.is_empty()),
            ("instructions", !candidate.instructions.trim().is_empty()),
        ]) {
            return Err(ParseError::MissingFields(missing));
        }

        let mut recipe = normalize(candidate);
        if recipe
            .ingredients
            .iter()
            .any(|ingredient| needs_repair(&ingredient.quantity))
        {
            let recovery = match detect_lexicon_code(text) {
                Some(code) => self.recovery.prioritized(code),
                None => self.recovery.clone(),
            };
            info!("Running quantity recovery for {}", recipe.recipe_name);
            recipe.ingredients = recovery.recover(text, &recipe.ingredients);
        }

        Ok(recipe)
    }
}

fn normalize(recipe: StructuredRecipe) -> StructuredRecipe {
    StructuredRecipe {
        recipe_name: recipe.recipe_name.trim().to_string(),
        prep_time: or_default(recipe.prep_time, NOT_SPECIFIED),
        cook_time: or_default(recipe.cook_time, NOT_SPECIFIED),
        servings: or_default(recipe.servings, &DEFAULT_SERVINGS.to_string()),
        instructions: recipe.instructions.trim().to_string(),
        ingredients: recipe
            .ingredients
            .into_iter()
            .map(|ingredient| ingredient.normalized())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::ParsedIngredient;
    use crate::parsing::tests::StubProvider;

    const RESPONSE: &str = r#"{
        "recipeName": "Ciorbă de pui",
        "prepTime": "",
        "cookTime": "1 hour",
        "servings": 6,
        "instructions": "Fierbe carnea.\nAdaugă legumele.",
        "ingredients": [
            {"cleanName": " Carne de Pui ", "quantity": "not specified", "notes": "cu os"},
            {"cleanName": "ceapă", "quantity": " 1 ", "notes": "  "}
        ]
    }"#;

    const TEXT: &str = "Ciorbă de pui\n700 g de carne de pui cu os\n1 ceapă\nFierbe carnea.";

    #[tokio::test]
    async fn test_parse_normalizes_and_repairs() {
        let provider = StubProvider::answering(RESPONSE);
        let parser = StructuredParser::new(provider.clone());

        let recipe = parser.parse(TEXT).await.unwrap();
        assert_eq!(provider.call_count(), 1);
        assert_eq!(recipe.prep_time, "Not specified");
        assert_eq!(recipe.servings, "6");
        assert_eq!(
            recipe.ingredients,
            vec![
                ParsedIngredient::new("carne de pui", "700g").with_notes("cu os"),
                ParsedIngredient::new("ceapă", "1"),
            ]
        );
    }

    #[tokio::test]
    async fn test_prompt_contains_recipe_text() {
        let provider = StubProvider::answering(RESPONSE);
        StructuredParser::new(provider.clone()).parse(TEXT).await.unwrap();

        let prompt = provider.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("700 g de carne de pui cu os"));
    }

    #[tokio::test]
    async fn test_empty_input_skips_provider() {
        let provider = StubProvider::answering(RESPONSE);
        let parser = StructuredParser::new(provider.clone());

        let err = parser.parse("   ").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyInput);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_error() {
        let parser = StructuredParser::new(StubProvider::answering("not json"));
        let err = parser.parse(TEXT).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeError);
    }

    #[tokio::test]
    async fn test_missing_fields_are_named() {
        let parser = StructuredParser::new(StubProvider::answering(
            r#"{"recipeName": "", "instructions": "Boil.", "ingredients": []}"#,
        ));
        match parser.parse(TEXT).await {
            Err(ParseError::MissingFields(fields)) => {
                assert_eq!(fields, "recipeName, ingredients");
            }
            other => panic!("expected missing fields, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_provider_failure() {
        let parser = StructuredParser::new(StubProvider::failing("quota exceeded"));
        let err = parser.parse(TEXT).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Provider);
        assert!(err.to_string().contains("quota exceeded"));
    }
}

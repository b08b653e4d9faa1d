//! Turn free-form recipe text, recipe web pages and cooking videos into
//! structured recipes.
//!
//! Text is sent to a completion service (Gemini, OpenAI, Anthropic or Ollama)
//! with a JSON schema. Quantities the service drops are recovered from the
//! original text with a per-language regex cascade, and the result is
//! validated before it is handed back.

pub mod builder;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod model;
pub mod parsing;
pub mod pipelines;
pub mod providers;
pub mod quantity;
pub mod sources;
pub mod validation;

// Re-export commonly used types
pub use builder::{InputSource, ProviderKind, RecipeImporter, RecipeImporterBuilder};
pub use config::ImportConfig;
pub use error::{ErrorKind, FetchError, ImportError, ParseError};
pub use model::{
    LegacyRecipe, ParsedIngredient, ParsedRecipe, Severity, StructuredRecipe, ValidationReport,
};
pub use parsing::{LegacyParser, StructuredParser};
pub use pipelines::{ImportOutcome, ParseMode, Parsers};
pub use quantity::{recover_quantities, QuantityRecovery};
pub use validation::{validate, validate_legacy, validate_structured};

/// Parse recipe text into a structured recipe using the configured provider.
///
/// No fallback to legacy parsing happens here; use [`import_text`] for that.
///
/// # Example
/// ```no_run
/// use recipe_import::parse_recipe_text_structured;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let recipe = parse_recipe_text_structured("Ciorbă\n700 g de carne de pui\n1 ceapă").await?;
///     for ingredient in &recipe.ingredients {
///         println!("{}: {}", ingredient.clean_name, ingredient.quantity);
///     }
///     Ok(())
/// }
/// ```
pub async fn parse_recipe_text_structured(text: &str) -> Result<StructuredRecipe, ImportError> {
    let config = ImportConfig::load()?;
    let parser = StructuredParser::from_config(&config)?;
    Ok(parser.parse(text).await?)
}

/// Parse recipe text into a legacy recipe with a flat ingredient-name list.
pub async fn parse_recipe_text(text: &str) -> Result<LegacyRecipe, ImportError> {
    let config = ImportConfig::load()?;
    let parser = LegacyParser::from_config(&config)?;
    Ok(parser.parse(text).await?)
}

/// Parse recipe text, falling back to legacy parsing, and validate it.
pub async fn import_text(text: &str) -> Result<ImportOutcome, ImportError> {
    RecipeImporter::builder().text(text).build().await
}

/// Fetch a recipe web page, parse it and validate the result.
///
/// # Example
/// ```no_run
/// use recipe_import::import_from_website;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let outcome = import_from_website("https://example.com/recipe").await?;
///     if !outcome.report.is_valid {
///         eprintln!("{:?}", outcome.report.errors);
///     }
///     Ok(())
/// }
/// ```
pub async fn import_from_website(url: &str) -> Result<ImportOutcome, ImportError> {
    RecipeImporter::builder().website(url).build().await
}

/// Fetch a video transcript, parse it and validate the result.
pub async fn import_from_video(url: &str) -> Result<ImportOutcome, ImportError> {
    RecipeImporter::builder().video(url).build().await
}

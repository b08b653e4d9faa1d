use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Literal used for times the source text does not mention.
pub const NOT_SPECIFIED: &str = "Not specified";
/// Servings used when the source text does not mention them.
pub const DEFAULT_SERVINGS: u32 = 4;

/// One ingredient split into name, amount and preparation notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ParsedIngredient {
    /// Ingredient name with no quantity or unit tokens, lower-cased
    #[serde(default, deserialize_with = "lenient_string")]
    pub clean_name: String,
    /// Amount including its unit, e.g. "700g", "2 cups", "3-4 linguri"
    #[serde(default, deserialize_with = "lenient_string")]
    pub quantity: String,
    /// Preparation modifiers such as "diced" or "at room temperature"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ParsedIngredient {
    pub fn new(clean_name: impl Into<String>, quantity: impl Into<String>) -> Self {
        ParsedIngredient {
            clean_name: clean_name.into(),
            quantity: quantity.into(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Lower-case and trim the name, trim the quantity, drop blank notes.
    ///
    /// Applying this twice gives the same result as applying it once.
    pub fn normalized(self) -> Self {
        let notes = self
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        ParsedIngredient {
            clean_name: self.clean_name.trim().to_lowercase(),
            quantity: self.quantity.trim().to_string(),
            notes,
        }
    }
}

/// Recipe whose ingredients carry separated name, quantity and notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StructuredRecipe {
    #[serde(default, deserialize_with = "lenient_string")]
    pub recipe_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub prep_time: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cook_time: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub servings: String,
    /// Steps as one string separated by line breaks
    #[serde(default, deserialize_with = "lenient_string")]
    pub instructions: String,
    #[serde(default)]
    pub ingredients: Vec<ParsedIngredient>,
}

/// Recipe with a flat ingredient-name list; measurements are discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LegacyRecipe {
    #[serde(default, deserialize_with = "lenient_string")]
    pub recipe_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub prep_time: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cook_time: String,
    #[serde(default = "default_servings", deserialize_with = "lenient_servings")]
    pub servings: u32,
    #[serde(default)]
    pub clean_ingredient_names: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

/// Result of either parser, as handed to validation and persistence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum ParsedRecipe {
    Structured(StructuredRecipe),
    Legacy(LegacyRecipe),
}

impl ParsedRecipe {
    pub fn recipe_name(&self) -> &str {
        match self {
            ParsedRecipe::Structured(r) => &r.recipe_name,
            ParsedRecipe::Legacy(r) => &r.recipe_name,
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, ParsedRecipe::Structured(_))
    }
}

/// How serious a validation finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A required field is missing or malformed
    Error,
    /// A plausibility heuristic fired; the data may still be usable
    Warning,
}

/// Outcome of validating a parsed recipe.
///
/// Every finding lands in `errors`, so `is_valid` is false as soon as any
/// check fires, warnings included. `warnings()` lets callers tell the
/// heuristic findings apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    #[serde(skip)]
    severities: Vec<Severity>,
}

impl ValidationReport {
    pub(crate) fn from_findings(findings: Vec<(Severity, String)>) -> Self {
        let (severities, errors): (Vec<_>, Vec<_>) = findings.into_iter().unzip();
        ValidationReport {
            is_valid: errors.is_empty(),
            errors,
            severities,
        }
    }

    /// Findings produced by plausibility heuristics rather than hard rules
    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.errors
            .iter()
            .zip(&self.severities)
            .filter(|(_, s)| **s == Severity::Warning)
            .map(|(e, _)| e.as_str())
    }

    /// True when at least one finding is a hard error, not just a warning
    pub fn has_blocking_errors(&self) -> bool {
        self.severities.contains(&Severity::Error)
    }
}

fn default_servings() -> u32 {
    DEFAULT_SERVINGS
}

// Models occasionally answer with numbers where strings were requested and
// vice versa; accept both rather than failing the whole decode.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(|i| i.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    })
}

fn lenient_servings<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(0),
        Value::String(s) => s
            .split(|c: char| !c.is_ascii_digit())
            .find(|part| !part.is_empty())
            .and_then(|part| part.parse().ok())
            .unwrap_or(DEFAULT_SERVINGS),
        _ => DEFAULT_SERVINGS,
    })
}

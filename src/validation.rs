//! Completeness and plausibility checks for parsed recipes.
//!
//! Validation never fails. Every problem found is collected into one
//! [`ValidationReport`], so a single call shows the caller everything that
//! needs fixing. Plausibility heuristics are tagged [`Severity::Warning`]
//! but still count against `is_valid`.

use crate::lexicon::{self, fold_diacritics, Lexicon, DEFAULT_LANGUAGE};
use crate::model::{
    LegacyRecipe, ParsedIngredient, ParsedRecipe, Severity, StructuredRecipe, ValidationReport,
};

/// Validate either recipe shape.
pub fn validate(recipe: &ParsedRecipe) -> ValidationReport {
    match recipe {
        ParsedRecipe::Structured(recipe) => validate_structured(recipe),
        ParsedRecipe::Legacy(recipe) => validate_legacy(recipe),
    }
}

pub fn validate_structured(recipe: &StructuredRecipe) -> ValidationReport {
    let mut findings = Vec::new();
    let mut require = |value: &str, message: &str| {
        if value.trim().is_empty() {
            findings.push((Severity::Error, message.to_string()));
        }
    };

    require(&recipe.recipe_name, "Recipe name is required");
    require(&recipe.prep_time, "Prep time is required");
    require(&recipe.cook_time, "Cook time is required");
    require(&recipe.servings, "Servings is required");
    if recipe.ingredients.is_empty() {
        findings.push((
            Severity::Error,
            "At least one ingredient is required".to_string(),
        ));
    }
    if recipe.instructions.trim().is_empty() {
        findings.push((Severity::Error, "Instructions are required".to_string()));
    }

    for (index, ingredient) in recipe.ingredients.iter().enumerate() {
        check_ingredient(index + 1, ingredient, &mut findings);
    }

    ValidationReport::from_findings(findings)
}

pub fn validate_legacy(recipe: &LegacyRecipe) -> ValidationReport {
    let mut findings = Vec::new();

    if recipe.recipe_name.trim().is_empty() {
        findings.push((Severity::Error, "Recipe name is required".to_string()));
    }
    if recipe.prep_time.trim().is_empty() {
        findings.push((Severity::Error, "Prep time is required".to_string()));
    }
    if recipe.cook_time.trim().is_empty() {
        findings.push((Severity::Error, "Cook time is required".to_string()));
    }
    if recipe.servings < 1 {
        findings.push((
            Severity::Error,
            "Servings must be a positive number".to_string(),
        ));
    }
    if recipe.clean_ingredient_names.is_empty() {
        findings.push((
            Severity::Error,
            "At least one ingredient is required".to_string(),
        ));
    }
    if recipe.instructions.is_empty() {
        findings.push((
            Severity::Error,
            "At least one instruction step is required".to_string(),
        ));
    }

    for name in &recipe.clean_ingredient_names {
        if has_default_quantity_token(&words(name)) {
            findings.push((
                Severity::Error,
                format!(
                    "Ingredient \"{}\" appears to contain quantities or measurements",
                    name
                ),
            ));
        }
    }

    ValidationReport::from_findings(findings)
}

fn check_ingredient(
    position: usize,
    ingredient: &ParsedIngredient,
    findings: &mut Vec<(Severity, String)>,
) {
    let name = &ingredient.clean_name;
    let quantity = ingredient.quantity.trim();

    if name.trim().is_empty() {
        findings.push((
            Severity::Error,
            format!("Ingredient {}: Clean name is required", position),
        ));
    }
    if quantity.is_empty() {
        findings.push((
            Severity::Error,
            format!("Ingredient {} ({}): Quantity is required", position, name),
        ));
    }

    let name_words = words(name);

    if quantity == "1" && is_typically_measured(&name_words) {
        findings.push((
            Severity::Warning,
            format!(
                "Ingredient \"{}\" has quantity \"1\" - this might indicate a missing measurement unit",
                name
            ),
        ));
    }

    // Secondary-language number and unit words mark a name written in that
    // language, where the default-language tokens are likely coincidence.
    if has_default_quantity_token(&name_words) && !has_secondary_quantity_word(&name_words) {
        findings.push((
            Severity::Error,
            format!(
                "Ingredient \"{}\" appears to contain quantities in the clean name - quantities should be in the quantity field",
                name
            ),
        ));
    }

    let mut chars = quantity.chars();
    if let (Some(only), None) = (chars.next(), chars.next()) {
        if !only.is_ascii_digit() {
            findings.push((
                Severity::Warning,
                format!(
                    "Ingredient \"{}\" has suspicious quantity \"{}\" - check if measurement was lost",
                    name, quantity
                ),
            ));
        }
    }
}

/// Lower-cased words of `text`, split on anything that is not a letter or digit.
fn words(text: &str) -> Vec<String> {
    fold_diacritics(text)
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

fn secondary_lexicons() -> impl Iterator<Item = &'static Lexicon> {
    lexicon::ALL
        .iter()
        .copied()
        .filter(|l| l.code != DEFAULT_LANGUAGE.code)
}

/// Digits, or a number or unit word of the default language.
fn has_default_quantity_token(words: &[String]) -> bool {
    let lexicon = DEFAULT_LANGUAGE;
    words.iter().any(|word| {
        if word.chars().all(|c| c.is_ascii_digit()) {
            return true;
        }
        // Single letters ("l", "g") are too ambiguous inside names
        if word.chars().count() < 2 {
            return false;
        }
        lexicon.numbers.iter().any(|(w, _)| *w == word.as_str())
            || lexicon
                .metric_units
                .iter()
                .chain(lexicon.volume_units)
                // "glass noodles"
                .filter(|(_, canonical)| *canonical != "glass")
                .any(|(w, _)| *w == word.as_str())
    })
}

fn has_secondary_quantity_word(words: &[String]) -> bool {
    secondary_lexicons().any(|lexicon| {
        words.iter().any(|word| {
            lexicon.numbers.iter().any(|(w, _)| *w == word.as_str())
                || lexicon
                    .fractions
                    .iter()
                    .any(|(phrase, _)| phrase.split_whitespace().any(|w| w == word.as_str()))
                || lexicon
                    .volume_units
                    .iter()
                    .chain(lexicon.count_units)
                    .any(|(w, _)| *w == word.as_str())
        })
    })
}

/// Matches a typically measured keyword and no typically counted one.
fn is_typically_measured(words: &[String]) -> bool {
    let matches_any = |keywords: fn(&Lexicon) -> &'static [&'static str]| {
        lexicon::ALL
            .iter()
            .any(|l| {
                words
                    .iter()
                    .any(|word| keywords(*l).iter().any(|k| *k == word.as_str()))
            })
    };

    matches_any(|l| l.measured_keywords) && !matches_any(|l| l.counted_keywords)
}

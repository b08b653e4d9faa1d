use whatlang::{detect, Lang};

/// Instructions for structured parsing, with worked Romanian and English
/// examples of the name/quantity/notes split.
///
/// Contains `{{RECIPE}}` and `{{LANGUAGE}}` placeholders, filled in by
/// [`structured_prompt`].
pub const STRUCTURED_PROMPT: &str = include_str!("structured_prompt.txt");

/// Instructions for legacy parsing. Same placeholders as [`STRUCTURED_PROMPT`].
pub const LEGACY_PROMPT: &str = include_str!("legacy_prompt.txt");

/// Detects the language of the given text and returns a human-readable language name.
pub fn detect_language(text: &str) -> String {
    detect(text)
        .map(|info| info.lang().eng_name().to_string())
        .unwrap_or_else(|| "the original language".to_string())
}

/// Lexicon code for the detected language, when one is shipped.
pub fn detect_lexicon_code(text: &str) -> Option<&'static str> {
    match detect(text)?.lang() {
        Lang::Ron => Some("ro"),
        Lang::Eng => Some("en"),
        _ => None,
    }
}

fn inject_recipe(template: &str, recipe_text: &str) -> String {
    let language = detect_language(recipe_text);
    template
        .replace("{{LANGUAGE}}", &language)
        .replace("{{RECIPE}}", recipe_text)
}

pub fn structured_prompt(recipe_text: &str) -> String {
    inject_recipe(STRUCTURED_PROMPT, recipe_text)
}

pub fn legacy_prompt(recipe_text: &str) -> String {
    inject_recipe(LEGACY_PROMPT, recipe_text)
}

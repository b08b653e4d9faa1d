//! Heuristic score of how much a fetched text looks like a recipe.

use regex::Regex;
use serde::Serialize;

/// Thresholds for one kind of source text.
#[derive(Debug, Clone)]
pub struct ContentProfile {
    noun: &'static str,
    keywords: &'static [&'static str],
    min_words: usize,
    high_density: f64,
    moderate_density: f64,
    many_keywords: usize,
    some_keywords: usize,
    good_length: usize,
    adequate_length: usize,
    patterns: &'static [&'static str],
    min_pattern_matches: usize,
    pattern_reason: &'static str,
    threshold: f64,
}

impl ContentProfile {
    /// Scraped web pages: long, with headings and numbered steps.
    pub fn website() -> Self {
        ContentProfile {
            noun: "content",
            keywords: &[
                "recipe", "ingredients", "instructions", "cook", "bake", "prepare", "cup",
                "tablespoon", "teaspoon", "tbsp", "tsp", "ounce", "pound", "gram", "oven", "heat",
                "mix", "stir", "add", "pour", "chop", "dice", "slice", "minute", "hour",
                "temperature", "degrees", "fahrenheit", "celsius", "flour", "salt", "pepper",
                "oil", "butter", "onion", "garlic", "serve", "dish", "meal", "servings",
                "prep time", "cook time",
            ],
            min_words: 100,
            high_density: 0.03,
            moderate_density: 0.015,
            many_keywords: 15,
            some_keywords: 8,
            good_length: 500,
            adequate_length: 200,
            patterns: &[
                r"ingredients?:?\s*\n",
                r"instructions?:?\s*\n",
                r"directions?:?\s*\n",
                r"\b\d+\.\s",
                r"\b(step|first|then|next|after|finally)\b",
                r"\b\d+\s*(cup|tablespoon|teaspoon|ounce|pound|gram)",
            ],
            min_pattern_matches: 3,
            pattern_reason: "Contains recipe structure patterns",
            threshold: 0.4,
        }
    }

    /// Spoken transcripts: shorter, no headings, lots of verbs.
    pub fn transcript() -> Self {
        ContentProfile {
            noun: "transcript",
            keywords: &[
                "recipe", "cook", "bake", "ingredient", "cup", "tablespoon", "teaspoon", "oven",
                "heat", "mix", "stir", "add", "pour", "chop", "dice", "slice", "minute", "hour",
                "temperature", "degrees", "flour", "salt", "pepper", "oil", "butter", "onion",
                "garlic", "serve", "dish", "meal",
            ],
            min_words: 50,
            high_density: 0.05,
            moderate_density: 0.02,
            many_keywords: 10,
            some_keywords: 5,
            good_length: 200,
            adequate_length: 100,
            patterns: &[
                r"\b(first|then|next|after|finally|meanwhile)\b",
                r"\b(add|mix|stir|cook|bake|fry|boil|simmer)\b",
                r"\b\d+\s*(minute|hour|degree|cup|tablespoon|teaspoon)",
            ],
            min_pattern_matches: 2,
            pattern_reason: "Contains cooking instruction patterns",
            threshold: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAssessment {
    pub is_valid: bool,
    /// Between 0.0 and 1.0
    pub confidence: f64,
    pub reasons: Vec<String>,
}

/// Score `text` against `profile`. Never fails.
pub fn assess_content(text: &str, profile: &ContentProfile) -> ContentAssessment {
    let lower = text.to_lowercase();
    let total_words = lower.split_whitespace().count();

    if total_words < profile.min_words {
        let mut subject = profile.noun.to_string();
        subject[..1].make_ascii_uppercase();
        return ContentAssessment {
            is_valid: false,
            confidence: 0.0,
            reasons: vec![format!("{} too short", subject)],
        };
    }

    let mut keyword_count = 0usize;
    let mut unique_keywords = 0usize;
    for keyword in profile.keywords {
        let pattern = format!(r"\b{}\b", regex::escape(keyword).replace(' ', r"\s+"));
        let Ok(re) = Regex::new(&pattern) else {
            continue;
        };
        let matches = re.find_iter(&lower).count();
        if matches > 0 {
            keyword_count += matches;
            unique_keywords += 1;
        }
    }

    let density = keyword_count as f64 / total_words as f64;
    let mut confidence = 0.0;
    let mut reasons = Vec::new();

    if density >= profile.high_density {
        confidence += 0.4;
        reasons.push("High recipe keyword density".to_string());
    } else if density >= profile.moderate_density {
        confidence += 0.2;
        reasons.push("Moderate recipe keyword density".to_string());
    } else {
        reasons.push("Low recipe keyword density".to_string());
    }

    if unique_keywords >= profile.many_keywords {
        confidence += 0.3;
        reasons.push("Many recipe keywords found".to_string());
    } else if unique_keywords >= profile.some_keywords {
        confidence += 0.2;
        reasons.push("Some recipe keywords found".to_string());
    } else {
        reasons.push("Few recipe keywords found".to_string());
    }

    if total_words >= profile.good_length {
        confidence += 0.2;
        reasons.push(format!("Good {} length", profile.noun));
    } else if total_words >= profile.adequate_length {
        confidence += 0.1;
        reasons.push(format!("Adequate {} length", profile.noun));
    } else {
        reasons.push(format!("Short {}", profile.noun));
    }

    let pattern_matches = profile
        .patterns
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .filter(|re| re.is_match(&lower))
        .count();
    if pattern_matches >= profile.min_pattern_matches {
        confidence += 0.1;
        reasons.push(profile.pattern_reason.to_string());
    }

    ContentAssessment {
        // Tolerate float error in sums like 0.2 + 0.1
        is_valid: confidence + 1e-9 >= profile.threshold,
        confidence: confidence.min(1.0),
        reasons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe_transcript() -> String {
        let sentence = "First add the flour and salt to the bowl, then mix and stir for 2 minutes. \
                        Next heat the oil, add the onion and garlic and cook until golden. ";
        sentence.repeat(6)
    }

    #[test]
    fn test_short_text_is_rejected() {
        let result = assess_content("Add flour.", &ContentProfile::transcript());
        assert!(!result.is_valid);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.reasons, vec!["Transcript too short"]);

        let result = assess_content("Add flour.", &ContentProfile::website());
        assert_eq!(result.reasons, vec!["Content too short"]);
    }

    #[test]
    fn test_cooking_transcript_is_valid() {
        let result = assess_content(&recipe_transcript(), &ContentProfile::transcript());
        assert!(result.is_valid, "{:?}", result);
        assert!(result.confidence >= 0.7);
        assert!(result.reasons.contains(&"High recipe keyword density".to_string()));
        assert!(result
            .reasons
            .contains(&"Contains cooking instruction patterns".to_string()));
    }

    #[test]
    fn test_unrelated_text_is_not_valid() {
        let text = "The quarterly report shows steady growth across every region we track. ".repeat(12);
        let result = assess_content(&text, &ContentProfile::website());
        assert!(!result.is_valid);
        assert!(result.confidence < 0.4);
        assert!(result.reasons.contains(&"Low recipe keyword density".to_string()));
    }

    #[test]
    fn test_multi_word_keywords() {
        let text = format!("Prep time: 10 min. Cook   time: 20 min. {}", "word ".repeat(100));
        let result = assess_content(&text, &ContentProfile::website());
        assert!(result.reasons.contains(&"Few recipe keywords found".to_string()));
        assert!(result.confidence <= 1.0);
    }
}

//! Turning recipe text into structured recipes with a completion service.
//!
//! [`StructuredParser`] is the primary path: it separates each ingredient
//! into name, quantity and notes and repairs quantities the service dropped.
//! [`LegacyParser`] produces a flat name list and is kept as a fallback.
//! Neither parser falls back to the other; that decision belongs to the
//! caller (see [`crate::pipelines`]).

mod legacy;
pub mod prompt;
pub mod schema;
mod structured;

pub use legacy::LegacyParser;
pub use structured::StructuredParser;

use crate::error::ParseError;
use crate::providers::{CompletionRequest, LlmProvider};
use log::debug;
use serde_json::Value;

/// Blank input is rejected before any request is made.
fn require_text(text: &str) -> Result<&str, ParseError> {
    if text.trim().is_empty() {
        Err(ParseError::EmptyInput)
    } else {
        Ok(text)
    }
}

/// Send one completion request and return the JSON payload it carried.
async fn request_json(
    provider: &dyn LlmProvider,
    prompt_text: String,
    output_schema: Value,
) -> Result<String, ParseError> {
    let request = CompletionRequest::new(prompt_text, output_schema);
    let response = provider
        .complete(&request)
        .await
        .map_err(|e| ParseError::Provider(e.to_string()))?;

    debug!(
        "{} returned {} bytes",
        provider.provider_name(),
        response.text.len()
    );
    Ok(extract_json(&response.text).to_string())
}

/// Strip a markdown code fence some models wrap around JSON output.
fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Skip the opening fence line ("```" or "```json")
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().trim_end_matches("```").trim()
}

/// Comma-separated names of the fields whose check failed, if any.
fn missing_fields(checks: &[(&str, bool)]) -> Option<String> {
    let missing: Vec<&str> = checks
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        None
    } else {
        Some(missing.join(", "))
    }
}

/// Replace a blank string with `default`.
fn or_default(value: String, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

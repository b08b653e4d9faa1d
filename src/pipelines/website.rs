use super::{run, ImportOutcome, ParseMode, Parsers};
use crate::error::{FetchError, ImportError};
use crate::sources::{assess_content, ContentProfile, WebsiteSource};
use log::{debug, warn};

/// Cleaned page text shorter than this is not worth a completion request.
pub const MIN_TEXT_CHARS: usize = 100;

/// Fetch a recipe page and parse its text.
pub async fn process(
    url: &str,
    mode: ParseMode,
    source: &WebsiteSource,
    parsers: &Parsers,
) -> Result<ImportOutcome, ImportError> {
    let text = source.extract_text(url).await?;
    if text.chars().count() < MIN_TEXT_CHARS {
        return Err(FetchError::InsufficientContent(
            "Website content too short or doesn't contain meaningful recipe content".to_string(),
        )
        .into());
    }

    let assessment = assess_content(&text, &ContentProfile::website());
    if assessment.is_valid {
        debug!("Page content looks like a recipe ({:.2})", assessment.confidence);
    } else {
        warn!(
            "Page content does not look like a recipe ({:.2}): {}",
            assessment.confidence,
            assessment.reasons.join(", ")
        );
    }

    run(text, mode, parsers, Some(assessment)).await
}

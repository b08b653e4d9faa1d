use super::{run, ImportOutcome, ParseMode, Parsers};
use crate::error::{FetchError, ImportError};
use crate::sources::{assess_content, ContentProfile, VideoSource};
use log::{debug, warn};

/// Cleaned transcripts shorter than this are not worth a completion request.
pub const MIN_TRANSCRIPT_CHARS: usize = 50;

/// Fetch a video transcript and parse it.
pub async fn process(
    url: &str,
    mode: ParseMode,
    source: &VideoSource,
    parsers: &Parsers,
) -> Result<ImportOutcome, ImportError> {
    let transcript = source.extract_text(url).await?;
    if transcript.chars().count() < MIN_TRANSCRIPT_CHARS {
        return Err(FetchError::InsufficientContent(
            "Transcript too short or doesn't contain meaningful recipe content".to_string(),
        )
        .into());
    }

    let assessment = assess_content(&transcript, &ContentProfile::transcript());
    if assessment.is_valid {
        debug!("Transcript looks like a recipe ({:.2})", assessment.confidence);
    } else {
        warn!(
            "Transcript does not look like a recipe ({:.2}): {}",
            assessment.confidence,
            assessment.reasons.join(", ")
        );
    }

    run(transcript, mode, parsers, Some(assessment)).await
}

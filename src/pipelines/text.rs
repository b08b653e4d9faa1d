use super::{run, ImportOutcome, ParseMode, Parsers};
use crate::error::ImportError;

/// Parse recipe text the caller already has.
pub async fn process(
    text: &str,
    mode: ParseMode,
    parsers: &Parsers,
) -> Result<ImportOutcome, ImportError> {
    run(text.trim().to_string(), mode, parsers, None).await
}

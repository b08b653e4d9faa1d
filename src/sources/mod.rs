//! Content source adapters: turn a website or video URL into recipe text.
//!
//! Adapters know nothing about recipes beyond basic cleanup; their output is
//! handed unchanged to the parsers.

pub mod assessment;
mod fetch;
pub mod video;
pub mod website;

pub use assessment::{assess_content, ContentAssessment, ContentProfile};
pub use fetch::RequestFetcher;
pub use video::{
    clean_transcript, extract_video_id, TranscriptFetcher, TranscriptSegment, VideoSource,
    YoutubeTranscriptFetcher,
};
pub use website::{html_to_text, validate_url, WebsiteSource};

//! Plain prose from a YouTube video's captions.

use super::fetch::RequestFetcher;
use crate::config::SourcesConfig;
use crate::error::FetchError;
use async_trait::async_trait;
use html_escape::decode_html_entities;
use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;
use reqwest::Url;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

lazy_static! {
    static ref VIDEO_URL: Regex = Regex::new(
        r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/|youtube\.com/shorts/)([a-zA-Z0-9_-]{11})"
    )
    .expect("video url pattern should be valid");
    static ref VIDEO_QUERY: Regex = Regex::new(r"youtube\.com/.*[?&]v=([a-zA-Z0-9_-]{11})")
        .expect("video query pattern should be valid");
    static ref BARE_ID: Regex =
        Regex::new(r"^[a-zA-Z0-9_-]{11}$").expect("video id pattern should be valid");
    static ref TIMED_TEXT: Selector =
        Selector::parse("text").expect("timed text selector should be valid");
    static ref CHATTER: Regex = Regex::new(
        r"(?i)\b(like and subscribe|don't forget to subscribe|hit the bell|comment below)\b"
    )
    .expect("chatter pattern should be valid");
    static ref SPEAKER: Regex =
        Regex::new(r"(?m)^[ \t]*[A-Z][A-Z \t]*:").expect("speaker pattern should be valid");
    static ref TIMESTAMP: Regex = Regex::new(r"\[\d{2}:\d{2}:\d{2}\]|\(\d{2}:\d{2}\)")
        .expect("timestamp pattern should be valid");
}

/// Canonical 11-character video id from a watch, short-link, embed, `/v/`
/// or shorts URL, or from a bare id.
pub fn extract_video_id(url: &str) -> Option<String> {
    let url = url.trim();

    for pattern in [&*VIDEO_URL, &*VIDEO_QUERY] {
        if let Some(caps) = pattern.captures(url) {
            return Some(caps[1].to_string());
        }
    }

    if BARE_ID.is_match(url) {
        return Some(url.to_string());
    }

    None
}

/// Remove channel chatter, speaker labels and timestamp markers, then
/// collapse whitespace.
pub fn clean_transcript(transcript: &str) -> String {
    let text = CHATTER.replace_all(transcript, "");
    let text = SPEAKER.replace_all(&text, "");
    let text = TIMESTAMP.replace_all(&text, "");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// One caption line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptSegment {
    pub text: String,
    /// Start, in seconds from the beginning of the video
    pub offset: f64,
    /// Length in seconds, when the caption track gives one
    pub duration: Option<f64>,
}

/// Source of caption segments for a video id.
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    async fn fetch_segments(&self, video_id: &str) -> Result<Vec<TranscriptSegment>, FetchError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    #[serde(default)]
    language_code: String,
    #[serde(default)]
    kind: Option<String>,
}

/// Reads captions the way the YouTube web player does: the watch page
/// lists the caption tracks, each of which is a timed-text XML document.
pub struct YoutubeTranscriptFetcher {
    fetcher: RequestFetcher,
    base_url: String,
    language: String,
}

impl YoutubeTranscriptFetcher {
    pub fn new(config: &SourcesConfig) -> Result<Self, FetchError> {
        Ok(YoutubeTranscriptFetcher {
            fetcher: RequestFetcher::new(config)?,
            base_url: config.youtube_base_url.trim_end_matches('/').to_string(),
            language: config.transcript_language.clone(),
        })
    }

    /// Prefer a manual track in the configured language, then an
    /// auto-generated one, then whatever comes first.
    fn choose_track<'a>(&self, tracks: &'a [CaptionTrack]) -> Option<&'a CaptionTrack> {
        let in_language = |t: &&CaptionTrack| t.language_code.starts_with(&self.language);
        tracks
            .iter()
            .filter(in_language)
            .find(|t| t.kind.as_deref() != Some("asr"))
            .or_else(|| tracks.iter().find(in_language))
            .or_else(|| tracks.first())
    }

    /// Caption downloads go through the configured origin, so a proxy or
    /// test server sees them too.
    fn caption_url(&self, track_url: &str) -> Result<String, FetchError> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| FetchError::Failure(format!("Invalid YouTube base URL: {}", e)))?;
        let track = base
            .join(track_url)
            .map_err(|e| FetchError::Failure(format!("Invalid caption track URL: {}", e)))?;

        Ok(match track.query() {
            Some(query) => format!("{}{}?{}", self.base_url, track.path(), query),
            None => format!("{}{}", self.base_url, track.path()),
        })
    }
}

#[async_trait]
impl TranscriptFetcher for YoutubeTranscriptFetcher {
    async fn fetch_segments(&self, video_id: &str) -> Result<Vec<TranscriptSegment>, FetchError> {
        let page = self
            .fetcher
            .fetch(&format!("{}/watch?v={}", self.base_url, video_id))
            .await?;

        let tracks = caption_tracks(&page)?;
        let track = self.choose_track(&tracks).ok_or_else(|| {
            FetchError::Failure("No transcript available for this video".to_string())
        })?;
        debug!(
            "Using caption track '{}' for {}",
            track.language_code, video_id
        );

        let xml = self.fetcher.fetch(&self.caption_url(&track.base_url)?).await?;
        Ok(parse_timed_text(&xml))
    }
}

/// Caption tracks listed in a watch page's player response.
fn caption_tracks(page: &str) -> Result<Vec<CaptionTrack>, FetchError> {
    const MARKER: &str = "\"captionTracks\":";

    let Some(start) = page.find(MARKER) else {
        if is_unavailable(page) {
            return Err(FetchError::Failure(
                "Video is unavailable or private".to_string(),
            ));
        }
        return Err(FetchError::Failure(
            "Transcript is disabled for this video".to_string(),
        ));
    };

    serde_json::Deserializer::from_str(&page[start + MARKER.len()..])
        .into_iter::<Vec<CaptionTrack>>()
        .next()
        .ok_or_else(|| {
            FetchError::Failure(
                "Failed to fetch transcript: malformed caption track list".to_string(),
            )
        })?
        .map_err(|e| FetchError::Failure(format!("Failed to fetch transcript: {}", e)))
}

fn is_unavailable(page: &str) -> bool {
    ["\"status\":\"ERROR\"", "\"status\":\"LOGIN_REQUIRED\"", "\"status\":\"UNPLAYABLE\""]
        .iter()
        .any(|status| page.contains(status))
}

/// Segments of a timed-text XML document, in document order.
fn parse_timed_text(xml: &str) -> Vec<TranscriptSegment> {
    let document = Html::parse_document(xml);
    document
        .select(&TIMED_TEXT)
        .filter_map(|element| {
            // Caption text is entity-encoded twice; the parser undoes one layer
            let raw = element.text().collect::<String>();
            let text = decode_html_entities(&raw).trim().to_string();
            if text.is_empty() {
                return None;
            }
            let seconds = |name: &str| -> Option<f64> {
                element.value().attr(name).and_then(|v| v.parse().ok())
            };
            Some(TranscriptSegment {
                text,
                offset: seconds("start").unwrap_or(0.0),
                duration: seconds("dur"),
            })
        })
        .collect()
}

pub struct VideoSource {
    fetcher: Arc<dyn TranscriptFetcher>,
}

impl VideoSource {
    pub fn new(fetcher: Arc<dyn TranscriptFetcher>) -> Self {
        VideoSource { fetcher }
    }

    pub fn from_config(config: &SourcesConfig) -> Result<Self, FetchError> {
        Ok(Self::new(Arc::new(YoutubeTranscriptFetcher::new(config)?)))
    }

    /// Transcript of the video at `url` (or bare id), cleaned for parsing.
    pub async fn extract_text(&self, url: &str) -> Result<String, FetchError> {
        let video_id = extract_video_id(url)
            .ok_or_else(|| FetchError::InvalidUrl("Invalid YouTube URL format".to_string()))?;

        let segments = self.fetcher.fetch_segments(&video_id).await?;
        if segments.is_empty() {
            return Err(FetchError::Failure(
                "No transcript available for this video".to_string(),
            ));
        }
        info!("Fetched {} caption segments for {}", segments.len(), video_id);

        let raw = segments
            .iter()
            .map(|segment| segment.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Ok(clean_transcript(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_video_id() {
        let id = Some("dQw4w9WgXcQ".to_string());
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), id);
        assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ?t=42"), id);
        assert_eq!(extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ"), id);
        assert_eq!(extract_video_id("https://youtube.com/shorts/dQw4w9WgXcQ"), id);
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ"),
            id
        );
        assert_eq!(extract_video_id("  dQw4w9WgXcQ "), id);
        assert_eq!(extract_video_id("https://vimeo.com/123456"), None);
        assert_eq!(extract_video_id("short"), None);
    }

    #[test]
    fn test_clean_transcript() {
        let raw = "CHEF ANA: Hi everyone, like and subscribe!\n[00:01:05] Add 2 cups of flour (01:10)\nthen hit the bell";
        assert_eq!(
            clean_transcript(raw),
            "Hi everyone, ! Add 2 cups of flour then"
        );
    }

    #[test]
    fn test_caption_tracks_stop_at_end_of_list() {
        let page = r#"var player = {"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"/api/timedtext?v=x&lang=en","name":{"runs":[{"text":"English ]"}]},"languageCode":"en"},{"baseUrl":"/api/timedtext?v=x&lang=ro","languageCode":"ro","kind":"asr"}],"audioTracks":[]}}};"#;

        let tracks = caption_tracks(page).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].base_url, "/api/timedtext?v=x&lang=en");
        assert_eq!(tracks[1].kind.as_deref(), Some("asr"));

        let err = caption_tracks(r#""captionTracks":[{"baseUrl": "#).unwrap_err();
        assert!(err.to_string().starts_with("Failed to fetch transcript"));
    }

    #[test]
    fn test_caption_tracks_errors() {
        let err = caption_tracks(r#"{"playabilityStatus":{"status":"ERROR"}}"#).unwrap_err();
        assert_eq!(err.to_string(), "Video is unavailable or private");

        let err = caption_tracks(r#"{"playabilityStatus":{"status":"OK"}}"#).unwrap_err();
        assert_eq!(err.to_string(), "Transcript is disabled for this video");
    }

    #[test]
    fn test_parse_timed_text() {
        let xml = r#"<?xml version="1.0" encoding="utf-8" ?><transcript>
            <text start="0.5" dur="2.1">Today we make &amp;quot;ciorbă&amp;quot;</text>
            <text start="2.6" dur="1.9">it&amp;#39;s easy</text>
            <text start="4.5">   </text>
        </transcript>"#;

        let segments = parse_timed_text(xml);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "Today we make \"ciorbă\"");
        assert_eq!(segments[0].offset, 0.5);
        assert_eq!(segments[0].duration, Some(2.1));
        assert_eq!(segments[1].text, "it's easy");
    }
}

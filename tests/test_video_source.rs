use async_trait::async_trait;
use mockito::{Matcher, Server};
use recipe_import::config::{ImportConfig, SourcesConfig};
use recipe_import::providers::{CompletionRequest, CompletionResponse, LlmProvider, ProviderError};
use recipe_import::sources::{
    TranscriptFetcher, TranscriptSegment, VideoSource, YoutubeTranscriptFetcher,
};
use recipe_import::{ErrorKind, FetchError, ParseMode, RecipeImporter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const VIDEO_ID: &str = "abcDEF12345";

fn watch_page(tracks: &str) -> String {
    format!(
        r#"<html><body><script>var ytInitialPlayerResponse = {{"playabilityStatus":{{"status":"OK"}},"captions":{{"playerCaptionsTracklistRenderer":{{"captionTracks":{tracks},"audioTracks":[]}}}}}};</script></body></html>"#
    )
}

const TIMED_TEXT: &str = r#"<?xml version="1.0" encoding="utf-8" ?><transcript>
<text start="0.0" dur="3.2">CHEF: Welcome back, don&amp;#39;t forget to subscribe</text>
<text start="3.2" dur="4.0">First add two cups of flour and a teaspoon of salt to the bowl</text>
<text start="7.2" dur="4.5">then pour in the warm water and mix until smooth</text>
</transcript>"#;

fn sources_config(server: &Server) -> SourcesConfig {
    SourcesConfig {
        youtube_base_url: server.url(),
        ..SourcesConfig::default()
    }
}

#[tokio::test]
async fn test_transcript_from_watch_page() {
    let mut server = Server::new_async().await;
    let tracks = format!(
        r#"[{{"baseUrl":"https://www.youtube.com/api/timedtext?v={id}&lang=de","languageCode":"de"}},{{"baseUrl":"https://www.youtube.com/api/timedtext?v={id}&lang=en","languageCode":"en","kind":"asr"}}]"#,
        id = VIDEO_ID
    );
    let page = server
        .mock("GET", "/watch")
        .match_query(Matcher::UrlEncoded("v".into(), VIDEO_ID.into()))
        .with_status(200)
        .with_body(watch_page(&tracks))
        .create_async()
        .await;
    let captions = server
        .mock("GET", "/api/timedtext")
        .match_query(Matcher::UrlEncoded("lang".into(), "en".into()))
        .with_status(200)
        .with_header("content-type", "text/xml")
        .with_body(TIMED_TEXT)
        .create_async()
        .await;

    let source = VideoSource::from_config(&sources_config(&server)).unwrap();
    let text = source
        .extract_text(&format!("https://www.youtube.com/watch?v={}", VIDEO_ID))
        .await
        .unwrap();

    assert!(text.starts_with("Welcome back, First add two cups of flour"));
    assert!(!text.contains("subscribe"));
    assert!(text.ends_with("mix until smooth"));
    assert!(!text.contains("CHEF"));
    page.assert_async().await;
    captions.assert_async().await;
}

#[tokio::test]
async fn test_disabled_captions() {
    let mut server = Server::new_async().await;
    let _page = server
        .mock("GET", "/watch")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"<script>var ytInitialPlayerResponse = {"playabilityStatus":{"status":"OK"}};</script>"#)
        .create_async()
        .await;

    let fetcher = YoutubeTranscriptFetcher::new(&sources_config(&server)).unwrap();
    let err = fetcher.fetch_segments(VIDEO_ID).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FetchFailure);
    assert_eq!(err.to_string(), "Transcript is disabled for this video");
}

#[tokio::test]
async fn test_unrecognised_url_is_invalid() {
    let source = VideoSource::new(Arc::new(NoTranscript));

    let err = source
        .extract_text("https://vimeo.com/76979871")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidUrl);
    assert_eq!(err.to_string(), "Invalid URL: Invalid YouTube URL format");
}

#[tokio::test]
async fn test_empty_transcript() {
    let source = VideoSource::new(Arc::new(NoTranscript));

    let err = source.extract_text(VIDEO_ID).await.unwrap_err();

    assert_eq!(err.to_string(), "No transcript available for this video");
}

struct NoTranscript;

#[async_trait]
impl TranscriptFetcher for NoTranscript {
    async fn fetch_segments(&self, _video_id: &str) -> Result<Vec<TranscriptSegment>, FetchError> {
        Ok(Vec::new())
    }
}

struct FixedTranscript;

#[async_trait]
impl TranscriptFetcher for FixedTranscript {
    async fn fetch_segments(&self, video_id: &str) -> Result<Vec<TranscriptSegment>, FetchError> {
        assert_eq!(video_id, VIDEO_ID);
        Ok(vec![
            TranscriptSegment {
                text: "Today we are making a quick flatbread, two cups of flour and a pinch of salt.".to_string(),
                offset: 0.0,
                duration: Some(4.0),
            },
            TranscriptSegment {
                text: "Mix with warm water, then cook in a hot pan for two minutes per side.".to_string(),
                offset: 4.0,
                duration: Some(5.0),
            },
        ])
    }
}

/// First answer lacks ingredients (structured fails), second is legacy-shaped.
struct LegacyOnlyProvider {
    calls: AtomicUsize,
}

#[async_trait]
impl LlmProvider for LegacyOnlyProvider {
    fn provider_name(&self) -> &str {
        "legacy-only"
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<CompletionResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(CompletionResponse::new(
            r#"{
                "recipeName": "Flatbread",
                "prepTime": "5 minutes",
                "cookTime": "4 minutes",
                "servings": 2,
                "cleanIngredientNames": ["flour", "salt", "water"],
                "instructions": ["Mix with warm water.", "Cook in a hot pan."]
            }"#,
        ))
    }
}

#[tokio::test]
async fn test_video_import_falls_back_to_legacy() {
    let provider = Arc::new(LegacyOnlyProvider {
        calls: AtomicUsize::new(0),
    });

    let outcome = RecipeImporter::builder()
        .config(ImportConfig::default())
        .completion_provider(provider.clone())
        .transcript_fetcher(Arc::new(FixedTranscript))
        .video(format!("https://youtu.be/{}", VIDEO_ID))
        .mode(ParseMode::Structured)
        .build()
        .await
        .unwrap();

    assert!(outcome.used_legacy());
    assert_eq!(outcome.recipe.recipe_name(), "Flatbread");
    assert!(outcome.report.is_valid, "{:?}", outcome.report.errors);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
}

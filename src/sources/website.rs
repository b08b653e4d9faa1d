//! Plain prose from a recipe web page.

use super::fetch::RequestFetcher;
use crate::config::SourcesConfig;
use crate::error::FetchError;
use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;
use reqwest::Url;
use scraper::{ElementRef, Html, Node};

lazy_static! {
    static ref BOILERPLATE: Regex = Regex::new(
        r"(?i)\b(subscribe|newsletter|follow us|social media|advertisement|cookie policy|privacy policy)\b"
    )
    .expect("boilerplate pattern should be valid");
    static ref DOTS: Regex = Regex::new(r"\.{3,}").expect("dots pattern should be valid");
    static ref DASHES: Regex = Regex::new(r"-{3,}").expect("dashes pattern should be valid");
}

/// Accept only absolute http(s) URLs.
pub fn validate_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url.trim())
        .map_err(|_| FetchError::InvalidUrl("Invalid website URL format".to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(FetchError::InvalidUrl(format!(
            "Unsupported URL scheme '{}', expected http or https",
            scheme
        ))),
    }
}

pub struct WebsiteSource {
    fetcher: RequestFetcher,
    min_content_length: usize,
}

impl WebsiteSource {
    pub fn new(config: &SourcesConfig) -> Result<Self, FetchError> {
        Ok(WebsiteSource {
            fetcher: RequestFetcher::new(config)?,
            min_content_length: config.min_content_length,
        })
    }

    /// Fetch `url` and return its visible text, ready for parsing.
    pub async fn extract_text(&self, url: &str) -> Result<String, FetchError> {
        let url = validate_url(url)?;

        let html = self.fetcher.fetch(url.as_str()).await?;
        if html.trim().is_empty() {
            return Err(FetchError::InsufficientContent(
                "Webpage returned empty content".to_string(),
            ));
        }

        let text = html_to_text(&html);
        debug!("Extracted {} characters from {}", text.len(), url);
        if text.chars().count() < self.min_content_length {
            return Err(FetchError::InsufficientContent(
                "Insufficient content found on webpage".to_string(),
            ));
        }

        info!("Fetched recipe page {}", url);
        Ok(strip_boilerplate(&text))
    }
}

/// Visible text of an HTML document, one line per block element.
///
/// Script, style and page chrome (nav, header, footer) are dropped along with
/// their content. Entities are decoded by the HTML parser.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut lines = vec![String::new()];
    collect_text(&document.root_element(), &mut lines);

    lines
        .iter()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_text(element: &ElementRef, lines: &mut Vec<String>) {
    let tag_name = element.value().name().to_lowercase();
    if should_skip_element(&tag_name) {
        return;
    }
    if tag_name == "br" {
        lines.push(String::new());
        return;
    }

    let block = is_block_element(&tag_name);
    if block {
        lines.push(String::new());
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                if let Some(line) = lines.last_mut() {
                    line.push_str(text);
                }
            }
            Node::Element(_) => {
                if let Some(child_ref) = ElementRef::wrap(child) {
                    collect_text(&child_ref, lines);
                }
            }
            _ => {}
        }
    }

    if block {
        lines.push(String::new());
    }
}

fn should_skip_element(tag: &str) -> bool {
    matches!(
        tag,
        "script" | "style" | "noscript" | "iframe" | "svg" | "nav" | "header" | "footer" | "head"
    )
}

fn is_block_element(tag: &str) -> bool {
    matches!(
        tag,
        "article"
            | "aside"
            | "blockquote"
            | "dd"
            | "div"
            | "dl"
            | "dt"
            | "figcaption"
            | "figure"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "hr"
            | "li"
            | "main"
            | "ol"
            | "p"
            | "pre"
            | "section"
            | "table"
            | "td"
            | "th"
            | "tr"
            | "ul"
    )
}

/// Remove newsletter and cookie-banner phrases and runs of dots or dashes.
pub fn strip_boilerplate(text: &str) -> String {
    let text = BOILERPLATE.replace_all(text, "");
    let text = DOTS.replace_all(&text, "...");
    let text = DASHES.replace_all(&text, "---");

    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

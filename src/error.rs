use thiserror::Error;

/// Coarse classification shared by every error type in the crate, so callers
/// can branch on the failure without matching message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyInput,
    DecodeError,
    MissingFields,
    InvalidUrl,
    FetchFailure,
    Provider,
    Config,
    Builder,
}

/// Errors returned by the structured and legacy recipe parsers
#[derive(Error, Debug)]
pub enum ParseError {
    /// Input text was blank; the completion service was never called
    #[error("Recipe text cannot be empty")]
    EmptyInput,

    /// The completion payload was not the JSON document we asked for
    #[error("Failed to parse AI response as JSON: {0}")]
    Decode(String),

    /// The decoded recipe lacks a required top-level field
    #[error("Invalid recipe data: missing required fields ({0})")]
    MissingFields(String),

    /// The completion service itself failed
    #[error("Completion request failed: {0}")]
    Provider(String),
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::EmptyInput => ErrorKind::EmptyInput,
            ParseError::Decode(_) => ErrorKind::DecodeError,
            ParseError::MissingFields(_) => ErrorKind::MissingFields,
            ParseError::Provider(_) => ErrorKind::Provider,
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        ParseError::Decode(e.to_string())
    }
}

/// Errors returned by the website and video content sources
#[derive(Error, Debug)]
pub enum FetchError {
    /// The URL could not be recognised or normalised
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Network or upstream failure, with a user-facing description
    #[error("{0}")]
    Failure(String),

    /// The source answered but left too little text to parse
    #[error("{0}")]
    InsufficientContent(String),
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::InvalidUrl(_) => ErrorKind::InvalidUrl,
            FetchError::Failure(_) | FetchError::InsufficientContent(_) => ErrorKind::FetchFailure,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Failure(describe_request_failure(&e))
    }
}

/// Errors that can occur while running a full import
#[derive(Error, Debug)]
pub enum ImportError {
    /// Recipe parsing failed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Fetching the source content failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// No completion provider could be constructed
    #[error("Provider error: {0}")]
    Provider(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    Builder(String),
}

impl ImportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImportError::Parse(e) => e.kind(),
            ImportError::Fetch(e) => e.kind(),
            ImportError::Config(_) => ErrorKind::Config,
            ImportError::Provider(_) => ErrorKind::Provider,
            ImportError::Builder(_) => ErrorKind::Builder,
        }
    }
}

/// Turn a transport error into a message a person can act on.
///
/// DNS failures, refused connections and timeouts get their own wording;
/// anything else is passed through.
pub(crate) fn describe_request_failure(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        return "Request timeout - website took too long to respond".to_string();
    }

    let chain = error_chain(e).to_lowercase();
    if e.is_connect() {
        if chain.contains("dns") || chain.contains("lookup") || chain.contains("resolve") {
            return "Website not found or DNS resolution failed".to_string();
        }
        if chain.contains("refused") {
            return "Connection refused by website".to_string();
        }
    }

    format!("Failed to fetch content: {}", e)
}

fn error_chain(e: &dyn std::error::Error) -> String {
    let mut parts = vec![e.to_string()];
    let mut source = e.source();
    while let Some(inner) = source {
        parts.push(inner.to_string());
        source = inner.source();
    }
    parts.join(": ")
}

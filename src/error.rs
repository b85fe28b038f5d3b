use thiserror::Error;

#[derive(Error, Debug)]
pub enum YttextError {
    #[error("Invalid URL: could not extract video ID from {0}")]
    InvalidUrl(String),

    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Too many requests: YouTube answered with a CAPTCHA")]
    RateLimited,

    #[error("Video unavailable: {0}")]
    VideoUnavailable(String),

    #[error("Transcripts are disabled for video {0}")]
    CaptionsDisabled(String),

    #[error("No transcript available for video {0}")]
    NoTranscriptAvailable(String),

    #[error("No suitable caption track found")]
    NoSuitableTrack,

    #[error("Failed to extract captions JSON: {0}")]
    Extraction(String),

    #[error("No transcript text found in caption body")]
    NoTranscriptText,

    #[error("Failed to parse any transcript entries")]
    ParseFailure,

    #[error("Unknown format: {0}. Use 'text', 'json', 'srt', or 'readable'")]
    UnknownFormat(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl YttextError {
    pub(crate) fn fetch(url: impl Into<String>, reason: impl ToString) -> Self {
        YttextError::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, YttextError>;

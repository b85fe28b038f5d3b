//! Caption extraction: watch page scraping, track selection and cue parsing.

pub mod client;
pub mod locator;
pub mod parser;
pub mod track;
pub mod video_id;

pub use client::TranscriptClient;
pub use locator::{CaptionConfig, TrackLocator, WatchPageLocator};
pub use parser::parse_caption_body;
pub use track::{select_track, CaptionTrack, DEFAULT_LANGUAGE};
pub use video_id::extract_video_id;

use serde::{Deserialize, Serialize};

/// One parsed caption cue.
///
/// `offset` and `start` always carry the same value; both are kept because
/// downstream JSON consumers expect both names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedTextSegment {
    text: String,
    duration: f64,
    offset: f64,
    start: f64,
}

impl TimedTextSegment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            duration,
            offset: start,
            start,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Start time in seconds.
    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// End time in seconds (`start + duration`).
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// What the caller asked to extract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionRequest {
    VideoId(String),
    Url(String),
}

impl ExtractionRequest {
    /// Classify raw user input: a bare 11-character ID is taken as-is,
    /// anything else is treated as a URL.
    pub fn from_input(input: &str) -> Self {
        let input = input.trim();
        if is_bare_video_id(input) {
            ExtractionRequest::VideoId(input.to_string())
        } else {
            ExtractionRequest::Url(input.to_string())
        }
    }

    /// Resolve to a video ID, parsing the URL form if needed.
    pub fn video_id(&self) -> crate::Result<String> {
        match self {
            ExtractionRequest::VideoId(id) => Ok(id.clone()),
            ExtractionRequest::Url(url) => extract_video_id(url),
        }
    }
}

fn is_bare_video_id(s: &str) -> bool {
    s.len() == 11
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

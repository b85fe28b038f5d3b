use super::locator::{TrackLocator, WatchPageLocator};
use super::parser::parse_caption_body;
use super::track::{select_track, CaptionTrack};
use super::{ExtractionRequest, TimedTextSegment};
use crate::config::Config;
use crate::error::{Result, YttextError};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info};

/// Fetches transcripts: locate tracks, pick one, download and parse its body.
///
/// Every call does at most two sequential requests and keeps no state
/// between calls.
pub struct TranscriptClient {
    http: Client,
    locator: Box<dyn TrackLocator>,
}

impl Default for TranscriptClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptClient {
    /// Create a client with default HTTP settings.
    pub fn new() -> Self {
        let http = Client::new();
        Self {
            locator: Box::new(WatchPageLocator::new(http.clone())),
            http,
        }
    }

    /// Create a client using the timeout, user agent and locale from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(ref agent) = config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        let http = builder
            .build()
            .map_err(|e| YttextError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let locator =
            WatchPageLocator::new(http.clone()).with_accept_language(&config.accept_language);

        Ok(Self {
            http,
            locator: Box::new(locator),
        })
    }

    /// Replace the track locator.
    pub fn with_locator(mut self, locator: impl TrackLocator + 'static) -> Self {
        self.locator = Box::new(locator);
        self
    }

    /// Fetch the transcript for a video ID.
    pub async fn get_transcript(
        &self,
        video_id: &str,
        language: &str,
    ) -> Result<Vec<TimedTextSegment>> {
        debug!("Locating caption tracks via {}", self.locator.name());
        let config = self.locator.locate(video_id).await?;
        let selected = select_track(&config.tracks, language)?;
        info!(
            "Using '{}' caption track for {}",
            selected.track.language_code, video_id
        );

        let body = self.fetch_caption_body(selected.base_url).await?;
        let segments = parse_caption_body(&body)?;
        debug!("Parsed {} segments", segments.len());
        Ok(segments)
    }

    /// Fetch the transcript for a watch page or short-link URL.
    pub async fn get_transcript_by_url(
        &self,
        video_url: &str,
        language: &str,
    ) -> Result<Vec<TimedTextSegment>> {
        let video_id = super::extract_video_id(video_url)?;
        self.get_transcript(&video_id, language).await
    }

    /// Fetch the transcript for either form of request.
    pub async fn fetch(
        &self,
        request: &ExtractionRequest,
        language: &str,
    ) -> Result<Vec<TimedTextSegment>> {
        let video_id = request.video_id()?;
        self.get_transcript(&video_id, language).await
    }

    /// List the caption tracks a video offers without downloading any.
    pub async fn list_tracks(&self, request: &ExtractionRequest) -> Result<Vec<CaptionTrack>> {
        let video_id = request.video_id()?;
        Ok(self.locator.locate(&video_id).await?.tracks)
    }

    async fn fetch_caption_body(&self, base_url: &str) -> Result<String> {
        debug!("Fetching caption body: {}", base_url);

        let response = self
            .http
            .get(base_url)
            .send()
            .await
            .map_err(|e| YttextError::fetch(base_url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(YttextError::fetch(
                base_url,
                format!("failed to fetch transcript (HTTP {})", status.as_u16()),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| YttextError::fetch(base_url, e))?;
        debug!("Caption body is {} bytes", body.len());
        Ok(body)
    }
}
